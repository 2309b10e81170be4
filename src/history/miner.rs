use super::*;
use crate::config::Config;
use crate::git::HistoryExtractor;
use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

/// Extract history from multiple git repositories.
///
/// Paths that cannot be opened as a repository, or have nothing on any
/// branch, are skipped with a warning. A missing designated branch aborts.
pub fn mine_data<P: AsRef<Path>>(paths: &[P], config: &Config) -> Result<FullHistory> {
    info!("Working on {} repositories", paths.len());

    let mut repos = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();

        let extractor = match HistoryExtractor::open(path) {
            Ok(extractor) => extractor.with_progress(config.output.progress),
            Err(e) => {
                warn!("Skipping {}: {:#}", path.display(), e);
                continue;
            }
        };

        if let Some(history) = extractor.extract(&config.history.branch)? {
            repos.push(history);
        }
    }

    let history = FullHistory::new(repos);
    info!(
        "Collected {} repositories and {} authors",
        history.repos.len(),
        history.all_author_histories.len()
    );

    Ok(history)
}
