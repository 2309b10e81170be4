#![allow(dead_code)]

use anyhow::Result;
use git2::{Commit, Oid, Repository, Signature, Time};
use std::path::{Path, PathBuf};

/// Base timestamp for test commits (2020-09-13 12:26:40 UTC).
pub const T0: i64 = 1_600_000_000;

pub fn init_repo(base: &Path, name: &str) -> Result<PathBuf> {
    let path = base.join(name);
    std::fs::create_dir_all(&path)?;
    Repository::init(&path)?;
    Ok(path)
}

/// Commit an empty tree on `branch` with the given author and commit time.
pub fn commit_on(
    path: &Path,
    branch: &str,
    name: &str,
    email: &str,
    seconds: i64,
    message: &str,
) -> Result<Oid> {
    let repo = Repository::open(path)?;
    let signature = Signature::new(name, email, &Time::new(seconds, 0))?;

    let tree_id = {
        let mut index = repo.index()?;
        index.write_tree()?
    };
    let tree = repo.find_tree(tree_id)?;

    let refname = format!("refs/heads/{branch}");
    let parent = match repo.find_reference(&refname) {
        Ok(reference) => Some(reference.peel_to_commit()?),
        Err(_) => None,
    };
    let parents: Vec<&Commit> = parent.iter().collect();

    let oid = repo.commit(
        Some(&refname),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )?;
    Ok(oid)
}

pub fn commit(path: &Path, name: &str, email: &str, seconds: i64, message: &str) -> Result<Oid> {
    commit_on(path, "master", name, email, seconds, message)
}

/// Repositories A and B: alice commits three times in A, bob once after
/// her, then alice twice more in B.
pub fn two_repo_fixture(base: &Path) -> Result<(PathBuf, PathBuf)> {
    let a = init_repo(base, "A")?;
    commit(&a, "Alice", "alice@x", T0 + 100, "a1")?;
    commit(&a, "Alice", "alice@x", T0 + 200, "a2")?;
    commit(&a, "Alice", "alice@x", T0 + 300, "a3")?;
    commit(&a, "Bob", "bob@x", T0 + 400, "b1")?;

    let b = init_repo(base, "B")?;
    commit(&b, "Alice", "alice@x", T0 + 500, "a4")?;
    commit(&b, "Alice", "alice@x", T0 + 600, "a5")?;

    Ok((a, b))
}
