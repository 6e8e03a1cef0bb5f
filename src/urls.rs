//! URL scheme of the generated site.
//!
//! ```text
//! /index.html                               summary
//! /refs.html                                references
//! /tree/<rev>/index.html                    root listing
//! /tree/<rev>/item/<dir>/index.html         directory listing
//! /tree/<rev>/item/<path>.html              file page
//! /logs/<rev>/index.html                    log
//! /commits/<id>.html                        commit page
//! ```
//!
//! URLs always use `/`, output paths are derived from them with
//! [`output_path`].

use std::path::{Path, PathBuf};

use crate::models::Breadcrumb;

pub const SUMMARY_URL: &str = "/index.html";
pub const REFS_URL: &str = "/refs.html";

const SHORT_ID_LEN: usize = 7;

/// First seven characters of a commit id. Shorter ids come back unchanged.
pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

pub fn tree_base(rev_name: &str) -> String {
    format!("/tree/{}", rev_name)
}

pub fn tree_url(rev_name: &str) -> String {
    format!("{}/index.html", tree_base(rev_name))
}

pub fn log_url(rev_name: &str) -> String {
    format!("/logs/{}/index.html", rev_name)
}

pub fn file_url(rev_name: &str, path: &str) -> String {
    format!("{}/item/{}.html", tree_base(rev_name), path)
}

/// Listing URL of a directory; the root directory gets the tree URL.
pub fn dir_url(rev_name: &str, path: &str) -> String {
    if path.is_empty() {
        tree_url(rev_name)
    } else {
        format!("{}/item/{}/index.html", tree_base(rev_name), path)
    }
}

pub fn commit_url(id: &str) -> String {
    format!("/commits/{}.html", id)
}

/// A tree URL split back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLocation {
    pub rev_name: String,
    pub path: String,
    pub is_dir: bool,
}

/// Inverse of [`file_url`] and [`dir_url`].
///
/// A file literally named `index` collides with its parent's listing; the
/// directory reading wins.
pub fn parse_item_url(url: &str) -> Option<ItemLocation> {
    let rest = url.strip_prefix("/tree/")?;

    if let Some((rev_name, item)) = rest.split_once("/item/") {
        if let Some(dir) = item.strip_suffix("/index.html") {
            return Some(ItemLocation {
                rev_name: rev_name.to_string(),
                path: dir.to_string(),
                is_dir: true,
            });
        }
        let file = item.strip_suffix(".html")?;
        return Some(ItemLocation {
            rev_name: rev_name.to_string(),
            path: file.to_string(),
            is_dir: false,
        });
    }

    let rev_name = rest.strip_suffix("/index.html")?;
    Some(ItemLocation {
        rev_name: rev_name.to_string(),
        path: String::new(),
        is_dir: true,
    })
}

/// Where the page for `url` lands below `out_dir`.
pub fn output_path(out_dir: &Path, url: &str) -> PathBuf {
    url.split('/')
        .filter(|segment| !segment.is_empty())
        .fold(out_dir.to_path_buf(), |acc, segment| acc.join(segment))
}

/// Navigation from the revision root down to `path`. Every ancestor links to
/// its listing, the last segment does not link anywhere.
pub fn breadcrumbs(rev_name: &str, path: &str) -> Vec<Breadcrumb> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut crumbs = vec![Breadcrumb {
        name: rev_name.to_string(),
        url: if segments.is_empty() {
            None
        } else {
            Some(tree_url(rev_name))
        },
    }];

    let mut prefix = String::new();
    for (idx, segment) in segments.iter().enumerate() {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(segment);

        let is_last = idx + 1 == segments.len();
        crumbs.push(Breadcrumb {
            name: segment.to_string(),
            url: if is_last {
                None
            } else {
                Some(dir_url(rev_name, &prefix))
            },
        });
    }

    crumbs
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "c69f86f9a3b1e0d2c4f5a6b7c8d9e0f1a2b3c4d5";

    #[test]
    fn short_id_truncates_to_seven() {
        assert_eq!(short_id(ID), "c69f86f");
        assert_eq!(short_id(ID), &ID[0..7]);
        assert_eq!(short_id("c69f86f"), "c69f86f");
    }

    #[test]
    fn short_id_leaves_short_input_alone() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id(""), "");
    }

    #[test]
    fn page_urls() {
        assert_eq!(tree_url("main"), "/tree/main/index.html");
        assert_eq!(log_url("main"), "/logs/main/index.html");
        assert_eq!(file_url("main", "src/lib.rs"), "/tree/main/item/src/lib.rs.html");
        assert_eq!(dir_url("main", "src"), "/tree/main/item/src/index.html");
        assert_eq!(dir_url("main", ""), "/tree/main/index.html");
        assert_eq!(commit_url(ID), format!("/commits/{}.html", ID));
    }

    #[test]
    fn file_url_round_trips() {
        for (rev, path) in [("main", "README.md"), ("v1", "src/a/b.rs"), ("c69f86f", "x.y.z")] {
            let loc = parse_item_url(&file_url(rev, path)).unwrap();
            assert_eq!(loc.rev_name, rev);
            assert_eq!(loc.path, path);
            assert!(!loc.is_dir);
        }
    }

    #[test]
    fn dir_url_round_trips() {
        for (rev, path) in [("main", "src"), ("feature/x", "a/b"), ("main", "")] {
            let loc = parse_item_url(&dir_url(rev, path)).unwrap();
            assert_eq!(loc.rev_name, rev);
            assert_eq!(loc.path, path);
            assert!(loc.is_dir);
        }
    }

    #[test]
    fn parse_rejects_foreign_urls() {
        assert_eq!(parse_item_url("/logs/main/index.html"), None);
        assert_eq!(parse_item_url("/tree/main/item/src"), None);
    }

    #[test]
    fn output_path_uses_host_separators() {
        let out = Path::new("/srv/site");
        assert_eq!(
            output_path(out, "/tree/main/item/src/lib.rs.html"),
            Path::new("/srv/site").join("tree").join("main").join("item").join("src").join("lib.rs.html")
        );
    }

    #[test]
    fn breadcrumbs_link_ancestors_only() {
        let crumbs = breadcrumbs("main", "src/git/tree.rs");
        let names: Vec<&str> = crumbs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["main", "src", "git", "tree.rs"]);
        assert_eq!(crumbs[0].url.as_deref(), Some("/tree/main/index.html"));
        assert_eq!(crumbs[1].url.as_deref(), Some("/tree/main/item/src/index.html"));
        assert_eq!(crumbs[2].url.as_deref(), Some("/tree/main/item/src/git/index.html"));
        assert_eq!(crumbs[3].url, None);
    }

    #[test]
    fn root_breadcrumb_is_terminal() {
        let crumbs = breadcrumbs("main", "");
        assert_eq!(crumbs.len(), 1);
        assert_eq!(crumbs[0].url, None);
    }
}
