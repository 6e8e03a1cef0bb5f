use git2::{Oid, Repository, Sort};
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use std::path::Path;

use crate::error::{AppError, Result};
use crate::git::repository::{commit_to_info, format_date};
use crate::models::{CommitInfo, CommitRecord};
use crate::urls::{commit_url, short_id};

/// Up to `limit` commits reachable from `start`, newest first.
///
/// Tags are left empty; the log builder attaches them from the catalog.
pub fn commits_by_page(repo: &Repository, start: &str, skip: usize, limit: usize) -> Result<Vec<CommitRecord>> {
    let start = Oid::from_str(start).map_err(|_| AppError::RevisionNotFound(start.to_string()))?;

    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TIME)?;
    revwalk.push(start)?;

    let mut commits = Vec::new();
    for oid in revwalk.skip(skip).take(limit) {
        let oid = oid?;
        let commit = repo.find_commit(oid)?;
        commits.push(commit_to_record(&commit));
    }

    Ok(commits)
}

fn commit_to_record(commit: &git2::Commit) -> CommitRecord {
    let id = commit.id().to_string();
    // A root commit stands in as its own parent so parent links always resolve.
    let parent_id = commit
        .parent_id(0)
        .map(|p| p.to_string())
        .unwrap_or_else(|_| id.clone());

    let author = commit.author();
    let time = author.when();

    CommitRecord {
        short_id: short_id(&id).to_string(),
        parent_short_id: short_id(&parent_id).to_string(),
        url: commit_url(&id),
        parent_url: commit_url(&parent_id),
        author: author.name().unwrap_or("Unknown").to_string(),
        timestamp: time.seconds(),
        when: format_date(time.seconds(), time.offset_minutes()),
        summary: commit.summary().unwrap_or("").to_string(),
        message: commit.message().unwrap_or("").trim_end().to_string(),
        refs: Vec::new(),
        id,
        parent_id,
    }
}

/// Last commit touching each of `paths`, found in a single history walk from
/// `start`.
///
/// Each path follows its own line of history. A merge whose version of the
/// path matches one of its parents is not credited; the walk continues
/// through the first such parent only, the way `git rev-list -1 -- <path>`
/// simplifies history. A commit is credited when its version differs from
/// every parent, or when it is a root commit containing the path.
///
/// Every path that exists in `start`'s tree is introduced somewhere in its
/// history, so a path without a commit means the repository is in a state we
/// can't attribute; that is reported as an error instead of guessed at.
pub fn last_commits_for_paths(
    repo: &Repository,
    start: &str,
    paths: &[String],
) -> Result<HashMap<String, CommitInfo>> {
    if paths.is_empty() {
        return Ok(HashMap::new());
    }

    let start_oid = Oid::from_str(start).map_err(|_| AppError::RevisionNotFound(start.to_string()))?;
    let start_commit = repo.find_commit(start_oid)?;

    let mut results: HashMap<String, CommitInfo> = HashMap::new();
    // Paths still looking for their commit, keyed by the commit to inspect next
    let mut pending: HashMap<Oid, Vec<String>> = HashMap::new();
    // Newest first, so commits shared by several paths are inspected once
    let mut queue: BinaryHeap<(i64, Oid)> = BinaryHeap::new();

    pending.insert(start_oid, paths.to_vec());
    queue.push((start_commit.time().seconds(), start_oid));

    while let Some((_, oid)) = queue.pop() {
        let Some(wanted) = pending.remove(&oid) else {
            continue;
        };

        let commit = repo.find_commit(oid)?;
        let tree = commit.tree()?;
        let parents: Vec<git2::Commit> = commit.parents().collect();
        let parent_trees = parents
            .iter()
            .map(|p| p.tree())
            .collect::<std::result::Result<Vec<_>, git2::Error>>()?;

        for path in wanted {
            let current = entry_id(&tree, &path);
            let same_as = parent_trees.iter().position(|t| entry_id(t, &path) == current);

            match same_as {
                Some(idx) => {
                    let parent = &parents[idx];
                    match pending.entry(parent.id()) {
                        Entry::Occupied(mut waiting) => waiting.get_mut().push(path),
                        Entry::Vacant(slot) => {
                            slot.insert(vec![path]);
                            queue.push((parent.time().seconds(), parent.id()));
                        }
                    }
                }
                None if current.is_some() => {
                    results.insert(path, commit_to_info(&commit));
                }
                None => {}
            }
        }
    }

    if let Some(path) = paths.iter().filter(|p| !results.contains_key(*p)).min() {
        return Err(AppError::MissingLastCommit {
            revision: short_id(start).to_string(),
            path: path.to_string(),
        });
    }

    Ok(results)
}

/// Object id at `path` in `tree`; a directory yields its subtree id.
fn entry_id(tree: &git2::Tree, path: &str) -> Option<Oid> {
    tree.get_path(Path::new(path)).ok().map(|entry| entry.id())
}
