use git2::Repository;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, FixedOffset};

use crate::error::{AppError, Result};
use crate::models::CommitInfo;
use crate::urls::{commit_url, short_id};

/// Read-only access to one repository from many threads.
///
/// libgit2 handles are `Send` but not `Sync`, so instead of serialising every
/// query behind one handle we keep a small pool: a worker takes a handle,
/// runs its query and gives it back. New handles are opened on demand.
pub struct GitRepository {
    git_dir: PathBuf,
    handles: Mutex<Vec<Repository>>,
}

impl GitRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(&path)
            .map_err(|_| AppError::RepoNotFound(path.as_ref().to_string_lossy().to_string()))?;

        Ok(Self {
            git_dir: repo.path().to_path_buf(),
            handles: Mutex::new(vec![repo]),
        })
    }

    pub fn with_repo<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Repository) -> Result<T>,
    {
        let pooled = self
            .handles
            .lock()
            .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?
            .pop();

        let repo = match pooled {
            Some(repo) => repo,
            None => Repository::open(&self.git_dir)?,
        };

        let result = f(&repo);

        self.handles
            .lock()
            .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?
            .push(repo);

        result
    }
}

pub fn commit_to_info(commit: &git2::Commit) -> CommitInfo {
    let oid = commit.id().to_string();
    let author = commit.author();
    let time = author.when();

    CommitInfo {
        short_id: short_id(&oid).to_string(),
        url: commit_url(&oid),
        summary: commit.summary().unwrap_or("").to_string(),
        author: author.name().unwrap_or("Unknown").to_string(),
        timestamp: time.seconds(),
        when: format_date(time.seconds(), time.offset_minutes()),
        oid,
    }
}

/// Author date as `02 Jan 06`, in the author's own time zone.
pub fn format_date(seconds: i64, offset_minutes: i32) -> String {
    let offset = FixedOffset::east_opt(offset_minutes * 60)
        .or_else(|| FixedOffset::east_opt(0));

    match (DateTime::from_timestamp(seconds, 0), offset) {
        (Some(utc), Some(offset)) => utc.with_timezone(&offset).format("%d %b %y").to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_date_uses_author_offset() {
        // 2024-03-01T23:30:00Z
        assert_eq!(format_date(1_709_335_800, 0), "01 Mar 24");
        assert_eq!(format_date(1_709_335_800, 60), "02 Mar 24");
        assert_eq!(format_date(1_709_335_800, -120), "01 Mar 24");
    }
}
