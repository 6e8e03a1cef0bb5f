//! Throwaway repositories for the integration tests.
//!
//! Commits get strictly increasing author times so history order is stable.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use git2::{Oid, Repository, RepositoryInitOptions, Signature, Time};
use tempfile::TempDir;

use git_site::Config;

pub struct Fixture {
    pub dir: TempDir,
    pub repo: Repository,
    pub out: TempDir,
    clock: i64,
}

impl Fixture {
    /// Empty repository whose first branch is `main`.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).unwrap();
        Self {
            dir,
            repo,
            out: TempDir::new().unwrap(),
            clock: 1_700_000_000,
        }
    }

    pub fn write(&self, path: &str, contents: impl AsRef<[u8]>) {
        let full = self.dir.path().join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, contents).unwrap();
    }

    /// Stages everything in the working directory and commits it on HEAD.
    pub fn commit(&mut self, message: &str) -> Oid {
        self.commit_with(message, Some("HEAD"), &[])
    }

    /// Commits the working directory on top of HEAD without moving HEAD,
    /// i.e. on a side line of history.
    pub fn commit_aside(&mut self, message: &str) -> Oid {
        self.commit_with(message, None, &[])
    }

    /// Commits the working directory on HEAD with `other` as second parent.
    pub fn merge(&mut self, message: &str, other: Oid) -> Oid {
        self.commit_with(message, Some("HEAD"), &[other])
    }

    fn commit_with(&mut self, message: &str, update_ref: Option<&str>, extra_parents: &[Oid]) -> Oid {
        self.clock += 3600;
        let sig = Signature::new("Ada Lovelace", "ada@example.com", &Time::new(self.clock, 0)).unwrap();

        let mut index = self.repo.index().unwrap();
        index
            .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.update_all(["*"], None).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();

        let mut parents = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        for id in extra_parents {
            parents.push(self.repo.find_commit(*id).unwrap());
        }
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

        self.repo
            .commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    pub fn remove(&self, path: &str) {
        std::fs::remove_file(self.dir.path().join(path)).unwrap();
    }

    pub fn tag(&self, name: &str, target: Oid) {
        let obj = self.repo.find_object(target, None).unwrap();
        self.repo.tag_lightweight(name, &obj, false).unwrap();
    }

    pub fn config(&self, revs: &[&str]) -> Config {
        let mut config = Config::new(self.dir.path(), self.out.path());
        config.revs = revs.iter().map(|r| r.to_string()).collect();
        config.label = "fixture".to_string();
        config
    }

    pub fn out_path(&self, relative: &str) -> PathBuf {
        self.out.path().join(relative)
    }

    pub fn read_out(&self, relative: &str) -> String {
        let path = self.out_path(relative);
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {}", path.display(), e))
    }
}

/// C1 (root) -> C2 -> C3 on `main`.
///
/// - C1 adds `readme.md` and `src/lib.rs`
/// - C2 edits `src/lib.rs` and adds `docs/guide.md`
/// - C3 adds `b.txt` and rewrites the readme
pub fn three_commit_history() -> (Fixture, [Oid; 3]) {
    let mut fx = Fixture::new();

    fx.write("readme.md", "# Hello\n");
    fx.write("src/lib.rs", "pub fn one() -> u32 {\n    1\n}\n");
    let c1 = fx.commit("Initial commit");

    fx.write("src/lib.rs", "pub fn one() -> u32 {\n    1\n}\n\npub fn two() -> u32 {\n    2\n}\n");
    fx.write("docs/guide.md", "Read the source.\n");
    let c2 = fx.commit("Add two");

    fx.write("b.txt", "bee\n");
    fx.write("readme.md", "# Hello\n\nNow with bees.\n");
    let c3 = fx.commit("Add bees");

    (fx, [c1, c2, c3])
}

pub fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in page", needle))
}

pub fn exists(path: &Path) -> bool {
    path.is_file()
}
