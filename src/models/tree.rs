//! Tree-related data.
//!
//! - `TreeEntry`: one file or directory at a revision
//! - `TreeListing`: one directory level, entries already sorted
//! - `Breadcrumb`: one hop of the path navigation
//! - `CommitInfo`: last commit touching a path
//! - `FileContents`: rendered blob for a file page

use std::cmp::Ordering;

use git2::Oid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
}

#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub name: String,
    /// Path relative to the revision root, `/` separated
    pub path: String,
    pub entry_type: EntryType,
    /// Blob or tree object id
    pub oid: Oid,
    /// Blob size in bytes, files only
    pub size: Option<u64>,
    pub url: String,
    /// Omitted when last-commit lookup is disabled
    pub last_commit: Option<CommitInfo>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

impl TreeEntry {
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }
}

/// Directories first, then files, each group by name.
pub fn compare_entries(a: &TreeEntry, b: &TreeEntry) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| a.name.cmp(&b.name))
}

#[derive(Debug, Clone)]
pub struct TreeListing {
    /// Directory path, empty for the root
    pub path: String,
    pub url: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub entries: Vec<TreeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub name: String,
    /// `None` for the terminal segment
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub oid: String,
    pub short_id: String,
    pub summary: String,
    pub author: String,
    pub timestamp: i64,
    pub when: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct FileContents {
    pub is_text: bool,
    pub num_lines: usize,
    /// Highlighted markup, or a placeholder for binary files
    pub html: String,
}
