use super::*;

// Derived figures over a repository's author roster

impl RepositoryHistory {
    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    /// Sum of per-author commit counts; always equals `commit_count`.
    pub fn authored_commits(&self) -> usize {
        self.authors.values().map(|a| a.commit_count).sum()
    }
}
