use git2::{DiffFindOptions, DiffOptions, Oid, Patch};

use crate::error::{AppError, Result};
use crate::models::{ChangeKind, FilePatch};

/// Per-file changes between `parent_id` and `commit_id`.
///
/// A root commit is passed with itself as parent, which yields no files.
pub fn commit_patches(repo: &git2::Repository, commit_id: &str, parent_id: &str) -> Result<Vec<FilePatch>> {
    let to = find_commit(repo, commit_id)?;
    let to_tree = to.tree()?;

    let from_tree = if parent_id == commit_id {
        None
    } else {
        Some(find_commit(repo, parent_id)?.tree()?)
    };
    let base_tree = from_tree.as_ref().unwrap_or(&to_tree);

    let mut opts = DiffOptions::new();
    opts.context_lines(3);

    let mut diff = repo.diff_tree_to_tree(Some(base_tree), Some(&to_tree), Some(&mut opts))?;

    let mut find = DiffFindOptions::new();
    find.renames(true);
    diff.find_similar(Some(&mut find))?;

    let mut files: Vec<FilePatch> = Vec::new();

    for (delta_idx, delta) in diff.deltas().enumerate() {
        let old_path = delta.old_file().path().map(|p| p.to_string_lossy().to_string()).unwrap_or_default();
        let new_path = delta.new_file().path().map(|p| p.to_string_lossy().to_string()).unwrap_or_default();

        let mut text = String::new();
        let mut additions = 0;
        let mut deletions = 0;
        let mut is_binary = delta.flags().is_binary();

        match Patch::from_diff(&diff, delta_idx)? {
            Some(patch) => {
                for hunk_idx in 0..patch.num_hunks() {
                    let (hunk, _) = patch.hunk(hunk_idx)?;
                    text.push_str(String::from_utf8_lossy(hunk.header()).trim_end());
                    text.push('\n');

                    for line_idx in 0..patch.num_lines_in_hunk(hunk_idx)? {
                        let line = patch.line_in_hunk(hunk_idx, line_idx)?;
                        let content = String::from_utf8_lossy(line.content());
                        let origin = line.origin();
                        match origin {
                            '+' => additions += 1,
                            '-' => deletions += 1,
                            _ => {}
                        }

                        if matches!(origin, '+' | '-' | ' ') {
                            text.push(origin);
                            text.push_str(content.trim_end_matches(['\n', '\r']));
                        } else {
                            // "\n\\ No newline at end of file\n"
                            text.push_str(content.trim_matches(['\n', '\r']));
                        }
                        text.push('\n');
                    }
                }
            }
            None => is_binary = true,
        }

        files.push(FilePatch {
            kind: ChangeKind::from(delta.status()),
            old_mode: format_mode(delta.old_file().mode()),
            new_mode: format_mode(delta.new_file().mode()),
            old_path,
            new_path,
            is_binary,
            text,
            additions,
            deletions,
        });
    }

    Ok(files)
}

fn find_commit<'r>(repo: &'r git2::Repository, id: &str) -> Result<git2::Commit<'r>> {
    let oid = Oid::from_str(id).map_err(|_| AppError::RevisionNotFound(id.to_string()))?;
    Ok(repo.find_commit(oid)?)
}

fn format_mode(mode: git2::FileMode) -> String {
    format!("{:06o}", u32::from(mode))
}
