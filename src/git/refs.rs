//! Branch and tag listing.

use git2::Repository;

use crate::error::Result;
use crate::models::Reference;

/// All local branches and tags, sorted by full refspec.
///
/// Annotated tags are peeled to the commit they point at; references that
/// don't end at a commit are left out.
pub fn list_references(repo: &Repository) -> Result<Vec<Reference>> {
    let mut references = Vec::new();

    for reference in repo.references()? {
        let reference = reference?;
        if !(reference.is_branch() || reference.is_tag()) {
            continue;
        }

        let Some(refspec) = reference.name() else {
            continue;
        };
        let name = reference.shorthand().unwrap_or(refspec).to_string();

        let id = match reference.peel_to_commit() {
            Ok(commit) => commit.id().to_string(),
            Err(_) => continue,
        };

        references.push(Reference {
            refspec: refspec.to_string(),
            name,
            id,
        });
    }

    references.sort_by(|a, b| a.refspec.cmp(&b.refspec));
    Ok(references)
}
