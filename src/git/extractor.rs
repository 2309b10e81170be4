use super::*;
use anyhow::{anyhow, Context, Result};
use chrono::TimeZone;
use git2::{BranchType, Commit, Oid, Repository, Sort};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Reads the designated branch of one repository into a [`RepositoryHistory`].
pub struct HistoryExtractor {
    repo: Repository,
    path: PathBuf,
    name: String,
    show_progress: bool,
}

// Below this many commits a progress bar is just flicker.
const PROGRESS_THRESHOLD: usize = 1000;

impl HistoryExtractor {
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path).with_context(|| {
            format!(
                "Failed to open repository at {}\n Is it really a git repo?",
                path.display()
            )
        })?;

        debug!("Opened Git repository at {}", path.display());

        Ok(Self {
            repo,
            path: path.to_path_buf(),
            name: repository_name(path),
            show_progress: true,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extract the history of `branch`.
    ///
    /// `Ok(None)` means the repository has no usable history: it has no
    /// branch heads at all, or the branch has no commits. A repository that
    /// has heads but lacks `branch` is an error.
    pub fn extract(&self, branch: &str) -> Result<Option<RepositoryHistory>> {
        info!("Extracting history from {}", self.path.display());

        if self.count_branch_heads()? == 0 {
            warn!("No branch heads in {}, skipping", self.path.display());
            return Ok(None);
        }

        let commits = self.branch_commits(branch)?;
        info!(
            "Found {} commits on {} in {}",
            commits.len(),
            branch,
            self.name
        );

        let history = RepositoryHistory::from_commits(self.name.clone(), commits);
        match &history {
            Some(history) => debug!(
                "{}: {} authors, {} commits",
                history.name,
                history.author_count(),
                history.authored_commits()
            ),
            None => warn!("Branch {} of {} has no commits", branch, self.path.display()),
        }

        Ok(history)
    }

    fn count_branch_heads(&self) -> Result<usize> {
        let mut heads = 0;
        for branch in self.repo.branches(Some(BranchType::Local))? {
            branch?;
            heads += 1;
        }
        debug!("Found {} branch heads", heads);
        Ok(heads)
    }

    fn branch_commits(&self, branch: &str) -> Result<Vec<CommitRecord>> {
        let tip = self
            .repo
            .find_branch(branch, BranchType::Local)
            .with_context(|| {
                format!(
                    "Branch {} not found in repository {}",
                    branch,
                    self.path.display()
                )
            })?
            .get()
            .peel_to_commit()
            .with_context(|| format!("Branch {} does not point to a commit", branch))?
            .id();

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(tip)?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE)?;

        let oids = revwalk.collect::<std::result::Result<Vec<Oid>, _>>()?;

        let pb = if self.show_progress && oids.len() >= PROGRESS_THRESHOLD {
            let pb = ProgressBar::new(oids.len() as u64);
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} commits ({eta})",
                )?
                .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut commits = Vec::with_capacity(oids.len());
        for oid in oids {
            let commit = self.repo.find_commit(oid)?;
            commits.push(commit_record(&commit)?);
            pb.inc(1);
        }
        pb.finish_and_clear();

        Ok(commits)
    }
}

fn commit_record(commit: &Commit) -> Result<CommitRecord> {
    let author = commit.author();
    let seconds = commit.time().seconds();
    let committed_date = Utc
        .timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| anyhow!("Commit {} has invalid time {}", commit.id(), seconds))?;

    Ok(CommitRecord {
        author: String::from_utf8_lossy(author.name_bytes()).to_string(),
        author_email: String::from_utf8_lossy(author.email_bytes()).to_string(),
        committed_date,
        message: String::from_utf8_lossy(commit.message_bytes()).to_string(),
    })
}

/// Last path component, resolving `.` and `..` through the filesystem.
pub fn repository_name(path: &Path) -> String {
    let resolved = match path.file_name() {
        Some(_) => path.to_path_buf(),
        None => path.canonicalize().unwrap_or_else(|_| path.to_path_buf()),
    };

    resolved
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
