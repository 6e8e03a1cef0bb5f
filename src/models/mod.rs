//! Plain data carried between the pipeline stages.
//!
//! - `refs`: Revision, Reference, RefInfo
//! - `tree`: TreeEntry, TreeListing, Breadcrumb, CommitInfo, FileContents
//! - `commit`: CommitRecord for log pages and commit pages
//! - `diff`: DiffRender, DiffFile, FilePatch, ChangeKind

pub mod commit;
pub mod diff;
pub mod refs;
pub mod tree;

pub use commit::*;
pub use diff::*;
pub use refs::*;
pub use tree::*;
