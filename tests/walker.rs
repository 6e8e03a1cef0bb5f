mod common;

use std::sync::mpsc;

use common::{three_commit_history, Fixture};
use git_site::git::GitRepository;
use git_site::models::{Revision, TreeEntry, TreeListing};
use git_site::site::walker::TreeWalker;

fn walk_at(fx: &Fixture, head: git2::Oid, with_last_commit: bool) -> (Vec<TreeEntry>, Vec<TreeListing>) {
    let repo = GitRepository::open(fx.dir.path()).unwrap();
    let revision = Revision {
        id: head.to_string(),
        name: "main".to_string(),
    };

    let (entry_tx, entry_rx) = mpsc::channel();
    let (listing_tx, listing_rx) = mpsc::channel();
    let stats = TreeWalker::new(&repo, &revision, with_last_commit)
        .walk(entry_tx, listing_tx)
        .unwrap();

    let entries: Vec<TreeEntry> = entry_rx.into_iter().collect();
    let listings: Vec<TreeListing> = listing_rx.into_iter().collect();
    assert_eq!(stats.files, entries.iter().filter(|e| !e.is_dir()).count());
    assert_eq!(stats.directories, listings.len());
    (entries, listings)
}

fn walk(with_last_commit: bool) -> (Vec<TreeEntry>, Vec<TreeListing>, [git2::Oid; 3]) {
    let (fx, ids) = three_commit_history();
    let (entries, listings) = walk_at(&fx, ids[2], with_last_commit);
    (entries, listings, ids)
}

fn last_commit_of(entries: &[TreeEntry], path: &str) -> String {
    entries
        .iter()
        .find(|e| e.path == path)
        .and_then(|e| e.last_commit.as_ref())
        .map(|c| c.oid.clone())
        .unwrap_or_else(|| panic!("no last commit for {}", path))
}

#[test]
fn every_entry_and_directory_is_streamed() {
    let (entries, listings, _) = walk(false);

    assert_eq!(entries.len(), 6);
    assert_eq!(entries.iter().filter(|e| !e.is_dir()).count(), 4);

    let mut paths: Vec<&str> = listings.iter().map(|l| l.path.as_str()).collect();
    paths.sort();
    assert_eq!(paths, vec!["", "docs", "src"]);
    assert!(entries.iter().all(|e| e.last_commit.is_none()));
}

#[test]
fn directory_order_is_kept_within_a_level() {
    let (entries, listings, _) = walk(false);

    let root: Vec<&str> = entries
        .iter()
        .filter(|e| !e.path.contains('/'))
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(root, vec!["docs", "src", "b.txt", "readme.md"]);

    let root_listing = listings.iter().find(|l| l.path.is_empty()).unwrap();
    let names: Vec<&str> = root_listing.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, root);
    assert_eq!(root_listing.url, "/tree/main/index.html");

    let src = listings.iter().find(|l| l.path == "src").unwrap();
    assert_eq!(src.url, "/tree/main/item/src/index.html");
    assert_eq!(src.entries[0].path, "src/lib.rs");
    assert_eq!(src.entries[0].url, "/tree/main/item/src/lib.rs.html");
}

#[test]
fn last_commits_are_attached() {
    let (entries, _, [_, c2, c3]) = walk(true);
    let last = |path: &str| last_commit_of(&entries, path);
    assert_eq!(last("readme.md"), c3.to_string());
    assert_eq!(last("b.txt"), c3.to_string());
    assert_eq!(last("src"), c2.to_string());
    assert_eq!(last("src/lib.rs"), c2.to_string());
    assert_eq!(last("docs/guide.md"), c2.to_string());
}

#[test]
fn merged_side_changes_keep_their_own_commit() {
    let mut fx = Fixture::new();
    fx.write("side.txt", "one\n");
    fx.write("main.txt", "one\n");
    fx.write("both.txt", "one\n");
    fx.commit("Base");

    fx.write("side.txt", "two\n");
    fx.write("both.txt", "side\n");
    let side = fx.commit_aside("Side work");

    fx.write("side.txt", "one\n");
    fx.write("both.txt", "one\n");
    fx.write("main.txt", "two\n");
    let mainline = fx.commit("Main work");

    fx.write("side.txt", "two\n");
    fx.write("both.txt", "resolved\n");
    let merge = fx.merge("Merge side", side);

    let (entries, _) = walk_at(&fx, merge, true);
    // Only changed on the side branch: the merge just carries it over
    assert_eq!(last_commit_of(&entries, "side.txt"), side.to_string());
    assert_eq!(last_commit_of(&entries, "main.txt"), mainline.to_string());
    // Differs from both parents, so the merge itself changed it
    assert_eq!(last_commit_of(&entries, "both.txt"), merge.to_string());
}

#[test]
fn merge_of_side_directory_credits_side_commit() {
    let mut fx = Fixture::new();
    fx.write("lib/a.rs", "a\n");
    fx.write("readme.md", "hi\n");
    let base = fx.commit("Base");

    fx.write("lib/a.rs", "b\n");
    let side = fx.commit_aside("Touch lib");

    fx.write("lib/a.rs", "a\n");
    fx.write("readme.md", "hello\n");
    fx.commit("Readme");

    fx.write("lib/a.rs", "b\n");
    let merge = fx.merge("Merge lib", side);

    let (entries, _) = walk_at(&fx, merge, true);
    assert_eq!(last_commit_of(&entries, "lib"), side.to_string());
    assert_eq!(last_commit_of(&entries, "lib/a.rs"), side.to_string());
    assert_ne!(last_commit_of(&entries, "readme.md"), base.to_string());
}
