use anyhow::{anyhow, bail, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use std::fmt::Write;

pub mod export;
pub mod reporter;
pub mod table;

pub use reporter::Reporter;

use crate::history::FullHistory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub label: &'static str,
    pub align: Align,
}

impl Column {
    const fn left(label: &'static str) -> Self {
        Self {
            label,
            align: Align::Left,
        }
    }

    const fn right(label: &'static str) -> Self {
        Self {
            label,
            align: Align::Right,
        }
    }
}

pub const AUTHOR_COLUMNS: [Column; 6] = [
    Column::left("Email"),
    Column::left("Name"),
    Column::left("First commit"),
    Column::left("Last commit"),
    Column::right("Commit count"),
    Column::left("Repos"),
];

pub const REPOSITORY_COLUMNS: [Column; 4] = [
    Column::left("Repository"),
    Column::left("First commit"),
    Column::left("Last commit"),
    Column::right("Commit count"),
];

/// A titled table of already formatted cells.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: &'static str,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    pub fn headers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.label)
    }
}

pub trait OutputGenerator {
    fn generate(&mut self, report: &Report) -> Result<()>;
}

/// Reject strftime patterns chrono cannot render.
///
/// Some specifiers parse but only work for parsing (`%#z`), so a sample
/// timestamp is rendered as well.
pub fn validate_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        bail!("Invalid date format: {}", format);
    }

    let mut sample = String::new();
    write!(&mut sample, "{}", DateTime::<Utc>::default().format(format))
        .map_err(|_| anyhow!("Date format cannot be rendered: {}", format))?;
    Ok(())
}

pub fn format_timestamp(timestamp: &DateTime<Utc>, format: &str) -> String {
    timestamp.format(format).to_string()
}

fn format_optional(timestamp: Option<&DateTime<Utc>>, format: &str) -> String {
    timestamp
        .map(|ts| format_timestamp(ts, format))
        .unwrap_or_default()
}

/// One row per author, oldest first commit first.
pub fn author_report(history: &FullHistory, date_format: &str) -> Report {
    let mut authors: Vec<_> = history.all_author_histories.values().collect();
    // Map iteration is by email, so the stable sort breaks ties on email.
    authors.sort_by_key(|author| author.first_commit_at);

    let rows = authors
        .into_iter()
        .map(|author| {
            vec![
                author.email().to_string(),
                author.name().to_string(),
                format_optional(author.first_commit_at.as_ref(), date_format),
                format_optional(author.last_commit_at.as_ref(), date_format),
                author.commit_count.to_string(),
                author.repos().collect::<Vec<_>>().join(", "),
            ]
        })
        .collect();

    Report {
        title: "All authors",
        columns: AUTHOR_COLUMNS.to_vec(),
        rows,
    }
}

/// One row per repository, least recently active first.
pub fn repository_report(history: &FullHistory, date_format: &str) -> Report {
    let mut repos: Vec<_> = history.repos.iter().collect();
    repos.sort_by_key(|repo| repo.last_commit_at);

    let rows = repos
        .into_iter()
        .map(|repo| {
            vec![
                repo.name.clone(),
                format_timestamp(&repo.first_commit_at, date_format),
                format_timestamp(&repo.last_commit_at, date_format),
                repo.commit_count.to_string(),
            ]
        })
        .collect();

    Report {
        title: "All repositories",
        columns: REPOSITORY_COLUMNS.to_vec(),
        rows,
    }
}
