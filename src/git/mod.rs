use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod extractor;
pub mod stats;

pub use extractor::HistoryExtractor;

/// A single commit on the designated branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author: String,
    pub author_email: String,
    pub committed_date: DateTime<Utc>,
    pub message: String,
}

/// Activity of one author (keyed by email) inside one repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorHistory {
    pub repo: String,
    pub name: String,
    pub email: String,
    pub first_commit_at: DateTime<Utc>,
    pub first_commit_message: String,
    pub last_commit_at: DateTime<Utc>,
    pub last_commit_message: String,
    pub commit_count: usize,
}

impl AuthorHistory {
    fn new(repo: &str, commit: &CommitRecord) -> Self {
        Self {
            repo: repo.to_string(),
            name: commit.author.clone(),
            email: commit.author_email.clone(),
            first_commit_at: commit.committed_date,
            first_commit_message: commit.message.clone(),
            last_commit_at: commit.committed_date,
            last_commit_message: commit.message.clone(),
            commit_count: 1,
        }
    }

    fn record(&mut self, commit: &CommitRecord) {
        // Commits arrive oldest first, so ties go to the later commit.
        if commit.committed_date >= self.last_commit_at {
            self.last_commit_at = commit.committed_date;
            self.last_commit_message = commit.message.clone();
        }
        if commit.committed_date < self.first_commit_at {
            self.first_commit_at = commit.committed_date;
            self.first_commit_message = commit.message.clone();
        }
        self.commit_count += 1;
    }

    /// Fold another record of the same author into this one.
    pub(crate) fn merge(&mut self, other: &AuthorHistory) {
        if other.last_commit_at > self.last_commit_at {
            self.last_commit_at = other.last_commit_at;
            self.last_commit_message = other.last_commit_message.clone();
        }
        if other.first_commit_at < self.first_commit_at {
            self.first_commit_at = other.first_commit_at;
            self.first_commit_message = other.first_commit_message.clone();
        }
        self.commit_count += other.commit_count;
    }
}

/// History of a single repository's designated branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryHistory {
    pub name: String,
    pub commit_count: usize,
    pub first_commit_at: DateTime<Utc>,
    pub last_commit_at: DateTime<Utc>,
    /// email -> history
    pub authors: HashMap<String, AuthorHistory>,
}

impl RepositoryHistory {
    /// Build the author roster in one pass over `commits` (oldest first).
    ///
    /// Returns `None` when there are no commits at all.
    pub fn from_commits<I>(name: impl Into<String>, commits: I) -> Option<Self>
    where
        I: IntoIterator<Item = CommitRecord>,
    {
        let mut commits = commits.into_iter();
        let first = commits.next()?;

        let mut history = Self {
            name: name.into(),
            commit_count: 0,
            first_commit_at: first.committed_date,
            last_commit_at: first.committed_date,
            authors: HashMap::new(),
        };

        history.record(&first);
        for commit in commits {
            history.record(&commit);
        }

        Some(history)
    }

    fn record(&mut self, commit: &CommitRecord) {
        if commit.committed_date < self.first_commit_at {
            self.first_commit_at = commit.committed_date;
        }
        if commit.committed_date > self.last_commit_at {
            self.last_commit_at = commit.committed_date;
        }

        let repo = &self.name;
        self.authors
            .entry(commit.author_email.clone())
            .and_modify(|author| author.record(commit))
            .or_insert_with(|| AuthorHistory::new(repo, commit));

        self.commit_count += 1;
    }
}
