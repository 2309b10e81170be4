//! Commit authorship statistics across git repositories.
//!
//! [`history::mine_data`] walks the designated branch of every repository,
//! folds authors by email across repositories and hands a
//! [`history::FullHistory`] to [`output::Reporter`] for the author and
//! repository reports.

pub mod config;
pub mod git;
pub mod history;
pub mod output;
