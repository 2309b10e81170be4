use super::*;
use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes a report as CSV with its column labels as the header row.
pub struct CsvGenerator {
    path: PathBuf,
}

impl CsvGenerator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputGenerator for CsvGenerator {
    fn generate(&mut self, report: &Report) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;

        writer.write_record(report.headers())?;
        for row in &report.rows {
            writer.write_record(row)?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }
}

/// Dump the whole history, commit messages included, as pretty JSON.
pub fn write_json(history: &FullHistory, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, history)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer.flush()?;
    Ok(())
}
