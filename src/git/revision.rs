//! Revision resolution.
//!
//! Turns the strings passed with `--revs` into commit ids and labels. A
//! revision that names a branch or tag keeps that name; anything else
//! (`HEAD`, a raw hash, `main~2`) is labelled with its short id.

use git2::Repository;

use crate::error::{AppError, Result};
use crate::models::{Reference, Revision};
use crate::urls::short_id;

pub fn resolve_revisions(
    repo: &Repository,
    revs: &[String],
    references: &[Reference],
) -> Result<Vec<Revision>> {
    if revs.is_empty() {
        return Err(AppError::NoRevisions);
    }

    let mut resolved: Vec<Revision> = Vec::with_capacity(revs.len());
    for rev in revs {
        let revision = resolve_revision(repo, rev, references)?;
        if resolved.iter().any(|r| r.name == revision.name) {
            tracing::debug!("revision {} requested twice, ignoring duplicate", revision.name);
            continue;
        }
        resolved.push(revision);
    }

    Ok(resolved)
}

pub fn resolve_revision(repo: &Repository, rev: &str, references: &[Reference]) -> Result<Revision> {
    let commit = repo
        .revparse_single(rev)
        .and_then(|obj| obj.peel_to_commit())
        .map_err(|_| AppError::RevisionNotFound(rev.to_string()))?;
    let id = commit.id().to_string();

    let name = if references.iter().any(|r| r.name == rev || r.refspec == rev) {
        rev.to_string()
    } else {
        short_id(&id).to_string()
    };

    Ok(Revision { id, name })
}
