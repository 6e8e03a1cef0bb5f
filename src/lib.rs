//! Git Site - compile a git repository into a static website.
//!
//! The build renders, for every requested revision, a browsable tree with
//! one page per file and directory, a commit log, and one page per commit
//! showing its diff. A summary page with the main revision's readme and a
//! references page tie the revisions together.
//!
//! - `config`: CLI and validated build configuration
//! - `git`: repository queries (revisions, refs, trees, history, diffs)
//! - `models`: data passed between pipeline stages
//! - `site`: the concurrent rendering pipeline and page templates
//! - `urls`: URL scheme and output layout

pub mod config;
pub mod error;
pub mod git;
pub mod models;
pub mod site;
pub mod urls;

pub use config::Config;
pub use error::{AppError, Result};
pub use site::{build, BuildReport};
