//! Tree walker.
//!
//! Visits every directory of a revision and streams what it finds on two
//! channels: individual entries (files and directories, in listing order)
//! and completed directory listings. Subdirectories are visited in parallel
//! on the rayon pool; the walk returns once every visit has finished, and
//! the channels close when the walker drops its senders.
//!
//! Within a directory the order is fixed: subdirectories, then files, each
//! sorted by name. Across directories there is no order.

use std::sync::mpsc::Sender;

use git2::Oid;
use rayon::prelude::*;

use crate::error::{AppError, Result};
use crate::git::GitRepository;
use crate::git::history::last_commits_for_paths;
use crate::git::tree::{read_directory, revision_tree};
use crate::models::{Revision, TreeEntry, TreeListing};
use crate::urls::{breadcrumbs, dir_url};

/// Counters reported once the walk is done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub files: usize,
    pub directories: usize,
}

impl WalkStats {
    fn merge(self, other: WalkStats) -> WalkStats {
        WalkStats {
            files: self.files + other.files,
            directories: self.directories + other.directories,
        }
    }
}

pub struct TreeWalker<'a> {
    repo: &'a GitRepository,
    revision: &'a Revision,
    with_last_commit: bool,
}

struct Sinks {
    entries: Sender<TreeEntry>,
    listings: Sender<TreeListing>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(repo: &'a GitRepository, revision: &'a Revision, with_last_commit: bool) -> Self {
        Self {
            repo,
            revision,
            with_last_commit,
        }
    }

    pub fn walk(&self, entries: Sender<TreeEntry>, listings: Sender<TreeListing>) -> Result<WalkStats> {
        let root = self.repo.with_repo(|repo| revision_tree(repo, &self.revision.id))?;
        let sinks = Sinks { entries, listings };
        self.visit(root, "", &sinks)
    }

    fn visit(&self, tree: Oid, dir: &str, sinks: &Sinks) -> Result<WalkStats> {
        let entries = self.read_level(tree, dir)?;

        let mut stats = WalkStats {
            files: 0,
            directories: 1,
        };
        let mut subdirs = Vec::new();
        for entry in &entries {
            if entry.is_dir() {
                subdirs.push((entry.oid, entry.path.clone()));
            } else {
                stats.files += 1;
                if shadows_listing(entry) {
                    tracing::warn!(
                        "({}) {} has the same page as the listing of {}, one will overwrite the other",
                        self.revision.name,
                        entry.path,
                        dir
                    );
                }
            }
            sinks.entries.send(entry.clone()).map_err(|_| closed("entry"))?;
        }

        sinks
            .listings
            .send(TreeListing {
                url: dir_url(&self.revision.name, dir),
                breadcrumbs: breadcrumbs(&self.revision.name, dir),
                path: dir.to_string(),
                entries,
            })
            .map_err(|_| closed("listing"))?;

        subdirs
            .par_iter()
            .map(|(oid, path)| self.visit(*oid, path, sinks))
            .try_reduce(WalkStats::default, |a, b| Ok(a.merge(b)))
            .map(|below| stats.merge(below))
    }

    /// One directory, sorted, with last-commit data attached when enabled.
    fn read_level(&self, tree: Oid, dir: &str) -> Result<Vec<TreeEntry>> {
        self.repo.with_repo(|repo| {
            let mut entries = read_directory(repo, &self.revision.name, tree, dir)?;
            if !self.with_last_commit {
                return Ok(entries);
            }

            let paths: Vec<String> = entries.iter().map(|e| e.path.clone()).collect();
            let mut commits = last_commits_for_paths(repo, &self.revision.id, &paths).map_err(|e| match e {
                AppError::MissingLastCommit { path, .. } => AppError::MissingLastCommit {
                    revision: self.revision.name.clone(),
                    path,
                },
                other => other,
            })?;

            for entry in &mut entries {
                entry.last_commit = commits.remove(&entry.path);
            }
            Ok(entries)
        })
    }
}

/// A file named `index` below the root is written to `<dir>/index.html`,
/// the page of its directory listing.
pub fn shadows_listing(entry: &TreeEntry) -> bool {
    !entry.is_dir() && entry.name == "index" && entry.path.contains('/')
}

fn closed(stream: &str) -> AppError {
    AppError::Internal(format!("{} stream closed before the walk finished", stream))
}
