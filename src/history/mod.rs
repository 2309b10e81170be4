use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod miner;

pub use miner::mine_data;

use crate::git::{AuthorHistory, RepositoryHistory};

/// One author's activity folded over every processed repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorHistoryOverMultipleRepos {
    /// Per-repository records in processing order, one per repository name.
    pub histories: Vec<AuthorHistory>,
    pub first_commit_at: Option<DateTime<Utc>>,
    pub last_commit_at: Option<DateTime<Utc>>,
    pub commit_count: usize,
}

impl AuthorHistoryOverMultipleRepos {
    pub fn email(&self) -> &str {
        self.histories
            .first()
            .map(|h| h.email.as_str())
            .unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.histories
            .first()
            .map(|h| h.name.as_str())
            .unwrap_or_default()
    }

    #[cfg(test)]
    fn history(&self, repo: &str) -> Option<&AuthorHistory> {
        self.histories.iter().find(|h| h.repo == repo)
    }

    pub fn repos(&self) -> impl Iterator<Item = &str> {
        self.histories.iter().map(|h| h.repo.as_str())
    }

    pub fn absorb(&mut self, history: &AuthorHistory) {
        self.first_commit_at = Some(match self.first_commit_at {
            Some(current) => current.min(history.first_commit_at),
            None => history.first_commit_at,
        });
        self.last_commit_at = Some(match self.last_commit_at {
            Some(current) => current.max(history.last_commit_at),
            None => history.last_commit_at,
        });
        self.commit_count += history.commit_count;

        // Two input paths can end in the same directory name.
        match self.histories.iter_mut().find(|h| h.repo == history.repo) {
            Some(existing) => existing.merge(history),
            None => self.histories.push(history.clone()),
        }
    }
}

/// History of a project spanning multiple repositories
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FullHistory {
    pub repos: Vec<RepositoryHistory>,

    /// email -> cross-repository history
    pub all_author_histories: BTreeMap<String, AuthorHistoryOverMultipleRepos>,
}

impl FullHistory {
    pub fn new(repos: Vec<RepositoryHistory>) -> Self {
        let all_author_histories = mine_authors_over_repos(&repos);
        Self {
            repos,
            all_author_histories,
        }
    }
}

/// Merge per-repository author records by email.
pub fn mine_authors_over_repos(
    repos: &[RepositoryHistory],
) -> BTreeMap<String, AuthorHistoryOverMultipleRepos> {
    let mut all_author_histories: BTreeMap<String, AuthorHistoryOverMultipleRepos> =
        BTreeMap::new();

    for repo in repos {
        for (email, history) in &repo.authors {
            all_author_histories
                .entry(email.clone())
                .or_default()
                .absorb(history);
        }
    }

    all_author_histories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::CommitRecord;
    use chrono::TimeZone;

    fn repo(name: &str, commits: &[(&str, i64)]) -> RepositoryHistory {
        let records = commits.iter().map(|(email, secs)| CommitRecord {
            author: email.split('@').next().unwrap_or_default().to_string(),
            author_email: email.to_string(),
            committed_date: Utc.timestamp_opt(*secs, 0).unwrap(),
            message: format!("{name} at {secs}"),
        });
        RepositoryHistory::from_commits(name, records).unwrap()
    }

    #[test]
    fn single_repository_passes_counts_through() {
        let a = repo("A", &[("alice@x", 1), ("bob@x", 2), ("alice@x", 3)]);
        let merged = mine_authors_over_repos(std::slice::from_ref(&a));

        assert_eq!(merged.len(), 2);
        for (email, author) in &merged {
            assert_eq!(author.commit_count, a.authors[email].commit_count);
            assert_eq!(author.histories.len(), 1);
            assert_eq!(author.email(), email);
        }
    }

    #[test]
    fn shared_author_is_summed_across_repositories() {
        let a = repo("A", &[("alice@x", 10), ("alice@x", 20)]);
        let b = repo("B", &[("alice@x", 5), ("alice@x", 15), ("alice@x", 30)]);

        let merged = mine_authors_over_repos(&[a, b]);
        let alice = &merged["alice@x"];

        assert_eq!(alice.commit_count, 5);
        assert_eq!(alice.first_commit_at.unwrap().timestamp(), 5);
        assert_eq!(alice.last_commit_at.unwrap().timestamp(), 30);
        assert_eq!(alice.repos().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(alice.history("B").unwrap().commit_count, 3);
    }

    #[test]
    fn processing_order_does_not_change_totals() {
        let a = repo("A", &[("alice@x", 10), ("bob@x", 40)]);
        let b = repo("B", &[("alice@x", 5), ("bob@x", 50)]);

        let forward = mine_authors_over_repos(&[a.clone(), b.clone()]);
        let backward = mine_authors_over_repos(&[b, a]);

        for email in ["alice@x", "bob@x"] {
            assert_eq!(forward[email].commit_count, backward[email].commit_count);
            assert_eq!(forward[email].first_commit_at, backward[email].first_commit_at);
            assert_eq!(forward[email].last_commit_at, backward[email].last_commit_at);
        }
    }

    #[test]
    fn repositories_with_same_name_fold_into_one_entry() {
        let first = repo("core", &[("alice@x", 10)]);
        let second = repo("core", &[("alice@x", 20), ("alice@x", 30)]);

        let merged = mine_authors_over_repos(&[first, second]);
        let alice = &merged["alice@x"];

        assert_eq!(alice.histories.len(), 1);
        assert_eq!(alice.commit_count, 3);
        assert_eq!(alice.history("core").unwrap().commit_count, 3);
    }

    #[test]
    fn unset_author_has_no_range() {
        let author = AuthorHistoryOverMultipleRepos::default();
        assert!(author.first_commit_at.is_none());
        assert!(author.last_commit_at.is_none());
        assert_eq!(author.email(), "");
    }
}
