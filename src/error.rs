//! Application error types.
//!
//! Every stage of the site build returns `Result<T>`; nothing is recovered
//! locally. The binary's `main` is the only place that turns an `AppError`
//! into a process exit.
//!
//! - `Git`: any failure reported by libgit2
//! - `RepoNotFound`: `--repo` does not point into a git repository
//! - `Io`: creating output directories or writing pages
//! - `NoRevisions`, `RevisionNotFound`, `UnknownTheme`: configuration problems
//! - `MissingLastCommit`: history lookup found no commit for a tree path
//! - `Highlight`: the syntax highlighter rejected its input

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No revisions given, pass at least one with --revs")]
    NoRevisions,

    #[error("Revision not found: {0}")]
    RevisionNotFound(String),

    #[error("No commit touches {path} in revision {revision}")]
    MissingLastCommit { revision: String, path: String },

    #[error("Unknown syntax theme: {0}")]
    UnknownTheme(String),

    #[error("Highlight error: {0}")]
    Highlight(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<syntect::Error> for AppError {
    fn from(err: syntect::Error) -> Self {
        AppError::Highlight(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
