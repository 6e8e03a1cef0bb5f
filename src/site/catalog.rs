//! Reference catalog.
//!
//! Requested revisions come first and link to their tree; every other branch
//! or tag is listed without a link. The same list supplies the tags shown
//! next to commits in the logs.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{RefInfo, Reference, Revision};
use crate::urls::tree_url;

#[derive(Debug, Clone, Default)]
pub struct RefCatalog {
    refs: Vec<RefInfo>,
}

impl RefCatalog {
    pub fn build(revisions: &[Revision], references: &[Reference]) -> Self {
        let mut by_name: HashMap<String, RefInfo> = HashMap::new();

        for rev in revisions {
            by_name.entry(rev.name.clone()).or_insert_with(|| RefInfo {
                id: rev.id.clone(),
                refspec: rev.name.clone(),
                url: Some(tree_url(&rev.name)),
            });
        }

        for reference in references {
            by_name.entry(reference.name.clone()).or_insert_with(|| RefInfo {
                id: reference.id.clone(),
                refspec: reference.name.clone(),
                url: None,
            });
        }

        let mut refs: Vec<RefInfo> = by_name.into_values().collect();
        refs.sort_by(compare_refs);

        Self { refs }
    }

    pub fn refs(&self) -> &[RefInfo] {
        &self.refs
    }

    /// References pointing exactly at `commit_id`, in catalog order.
    pub fn tags_for(&self, commit_id: &str) -> Vec<RefInfo> {
        self.refs.iter().filter(|r| r.id == commit_id).cloned().collect()
    }
}

/// Linked entries before plain ones, then by name; the id only breaks ties
/// between identical names.
fn compare_refs(a: &RefInfo, b: &RefInfo) -> Ordering {
    b.url
        .is_some()
        .cmp(&a.url.is_some())
        .then_with(|| a.refspec.cmp(&b.refspec))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    const C2: &str = "2222222222222222222222222222222222222222";
    const C3: &str = "3333333333333333333333333333333333333333";

    fn reference(name: &str, kind: &str, id: &str) -> Reference {
        Reference {
            refspec: format!("refs/{}/{}", kind, name),
            name: name.to_string(),
            id: id.to_string(),
        }
    }

    fn revision(name: &str, id: &str) -> Revision {
        Revision {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn catalog() -> RefCatalog {
        let references = vec![
            reference("main", "heads", C3),
            reference("dev", "heads", C3),
            reference("v1", "tags", C2),
            reference("aux", "tags", C2),
        ];
        let revisions = vec![revision("main", C3), revision("v1", C2)];
        RefCatalog::build(&revisions, &references)
    }

    #[test]
    fn requested_refs_sort_first_with_urls() {
        let catalog = catalog();
        let names: Vec<&str> = catalog.refs().iter().map(|r| r.refspec.as_str()).collect();
        assert_eq!(names, vec!["main", "v1", "aux", "dev"]);

        assert_eq!(catalog.refs()[0].url.as_deref(), Some("/tree/main/index.html"));
        assert_eq!(catalog.refs()[1].url.as_deref(), Some("/tree/v1/index.html"));
        assert!(catalog.refs()[2].url.is_none());
        assert!(catalog.refs()[3].url.is_none());
    }

    #[test]
    fn order_is_reproducible() {
        let first: Vec<RefInfo> = catalog().refs().to_vec();
        for _ in 0..10 {
            assert_eq!(catalog().refs(), first.as_slice());
        }
    }

    #[test]
    fn tags_match_exact_commit() {
        let catalog = catalog();
        let tags: Vec<String> = catalog.tags_for(C2).into_iter().map(|r| r.refspec).collect();
        assert_eq!(tags, vec!["v1", "aux"]);
        assert!(catalog.tags_for("0000000000000000000000000000000000000000").is_empty());
    }

    #[test]
    fn raw_hash_revision_is_listed_by_short_id() {
        let catalog = RefCatalog::build(&[revision("3333333", C3)], &[]);
        assert_eq!(catalog.refs().len(), 1);
        assert_eq!(catalog.refs()[0].refspec, "3333333");
        assert_eq!(catalog.refs()[0].url.as_deref(), Some("/tree/3333333/index.html"));
    }
}
