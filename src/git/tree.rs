use git2::{ObjectType, Oid, Repository};

use crate::error::{AppError, Result};
use crate::models::{compare_entries, EntryType, TreeEntry};
use crate::urls::{breadcrumbs, dir_url, file_url};

/// Root tree of the commit `commit_id`.
pub fn revision_tree(repo: &Repository, commit_id: &str) -> Result<Oid> {
    let oid = Oid::from_str(commit_id).map_err(|_| AppError::RevisionNotFound(commit_id.to_string()))?;
    let commit = repo.find_commit(oid)?;
    Ok(commit.tree_id())
}

/// One level of a tree, without last-commit data.
///
/// Blobs become files and trees become directories; submodule links are
/// skipped. The result is sorted directories first, then by name.
pub fn read_directory(repo: &Repository, rev_name: &str, tree_oid: Oid, dir_path: &str) -> Result<Vec<TreeEntry>> {
    let tree = repo.find_tree(tree_oid)?;
    let mut entries = Vec::with_capacity(tree.len());

    for entry in tree.iter() {
        let name = String::from_utf8_lossy(entry.name_bytes()).to_string();
        let path = if dir_path.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", dir_path, name)
        };

        let entry_type = match entry.kind() {
            Some(ObjectType::Blob) => EntryType::File,
            Some(ObjectType::Tree) => EntryType::Directory,
            _ => continue,
        };

        let (size, url) = match entry_type {
            EntryType::File => {
                let blob = repo.find_blob(entry.id())?;
                (Some(blob.size() as u64), file_url(rev_name, &path))
            }
            EntryType::Directory => (None, dir_url(rev_name, &path)),
        };

        entries.push(TreeEntry {
            breadcrumbs: breadcrumbs(rev_name, &path),
            name,
            path,
            entry_type,
            oid: entry.id(),
            size,
            url,
            last_commit: None,
        });
    }

    entries.sort_by(compare_entries);
    Ok(entries)
}

pub fn read_blob(repo: &Repository, oid: Oid) -> Result<Vec<u8>> {
    let blob = repo.find_blob(oid)?;
    Ok(blob.content().to_vec())
}
