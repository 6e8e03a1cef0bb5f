//! Diff-related data.
//!
//! - `FilePatch`: raw per-file change as read from the repository
//! - `DiffFile`: the same change with highlighted hunk markup
//! - `DiffRender`: everything a commit page shows about its diff

use git2::Delta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
    Other,
}

impl ChangeKind {
    /// One-letter code shown next to each file; empty for kinds we don't label.
    pub fn code(self) -> &'static str {
        match self {
            ChangeKind::Added => "A",
            ChangeKind::Modified => "M",
            ChangeKind::Deleted => "D",
            ChangeKind::Renamed => "R",
            ChangeKind::Other => "",
        }
    }
}

impl From<Delta> for ChangeKind {
    fn from(delta: Delta) -> Self {
        match delta {
            Delta::Added => ChangeKind::Added,
            Delta::Modified => ChangeKind::Modified,
            Delta::Deleted => ChangeKind::Deleted,
            Delta::Renamed => ChangeKind::Renamed,
            _ => ChangeKind::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilePatch {
    pub kind: ChangeKind,
    pub old_path: String,
    pub new_path: String,
    pub old_mode: String,
    pub new_mode: String,
    pub is_binary: bool,
    /// Hunk headers and lines, each line prefixed with its origin
    pub text: String,
    pub additions: usize,
    pub deletions: usize,
}

#[derive(Debug, Clone)]
pub struct DiffFile {
    pub kind: ChangeKind,
    pub old_path: String,
    pub new_path: String,
    pub old_mode: String,
    pub new_mode: String,
    pub content: String,
    pub additions: usize,
    pub deletions: usize,
}

#[derive(Debug, Clone, Default)]
pub struct DiffRender {
    pub num_files: usize,
    pub total_additions: usize,
    pub total_deletions: usize,
    pub files: Vec<DiffFile>,
}
