use super::*;
use crate::config::OutputConfig;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use super::export::{write_json, CsvGenerator};
use super::table::ConsoleTable;

pub struct Reporter {
    output: OutputConfig,
}

impl Reporter {
    pub fn new(output: &OutputConfig) -> Result<Self> {
        validate_date_format(&output.date_format)?;

        Ok(Self {
            output: output.clone(),
        })
    }

    /// Print both reports to `out` and write them as CSV.
    ///
    /// Returns the files written. Any write failure aborts the remaining
    /// output.
    pub fn generate_report<W: Write>(
        &self,
        history: &FullHistory,
        out: &mut W,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output.directory).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.output.directory.display()
            )
        })?;

        let reports = [
            (
                author_report(history, &self.output.date_format),
                &self.output.authors_file,
            ),
            (
                repository_report(history, &self.output.date_format),
                &self.output.repos_file,
            ),
        ];

        let mut written = Vec::new();
        for (report, file_name) in &reports {
            ConsoleTable::new(&mut *out).generate(report)?;

            let mut csv = CsvGenerator::new(self.output.directory.join(file_name));
            csv.generate(report)?;
            info!("Report saved to {}", csv.path().display());
            written.push(csv.path().to_path_buf());
        }

        if self.output.json {
            let path = self.output.directory.join(&self.output.json_file);
            write_json(history, &path)?;
            info!("History saved to {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}
