//! Every query the site build makes against the repository.
//!
//! - `repository`: pooled handle shared by all workers
//! - `revision`: `--revs` strings to commit ids
//! - `refs`: branches and tags
//! - `tree`: directory levels and blobs
//! - `history`: commit paging and last-commit lookup
//! - `diff`: per-commit file patches

pub mod diff;
pub mod history;
pub mod refs;
pub mod repository;
pub mod revision;
pub mod tree;

pub use repository::GitRepository;
