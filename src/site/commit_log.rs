//! Commit log of one revision.

use crate::error::Result;
use crate::git::GitRepository;
use crate::git::history::commits_by_page;
use crate::models::{CommitRecord, Revision};
use crate::site::catalog::RefCatalog;

#[derive(Debug, Clone, Default)]
pub struct RevisionLog {
    /// Newest first, at most the configured page size
    pub commits: Vec<CommitRecord>,
}

impl RevisionLog {
    /// Most recent commit of the revision.
    pub fn last_commit(&self) -> Option<&CommitRecord> {
        self.commits.first()
    }
}

pub fn build_log(repo: &GitRepository, revision: &Revision, catalog: &RefCatalog, limit: usize) -> Result<RevisionLog> {
    let mut commits = repo.with_repo(|r| commits_by_page(r, &revision.id, 0, limit))?;

    for commit in &mut commits {
        commit.refs = catalog.tags_for(&commit.id);
    }

    tracing::debug!("{} commits in log of {}", commits.len(), revision.name);
    Ok(RevisionLog { commits })
}
