//! Site build orchestration.
//!
//! A build resolves the requested revisions, collects references, then
//! renders each revision:
//!
//! ```text
//!            ┌─ tree walk ──┬─ entries ──▶ file pages
//! revision ──┤              └─ listings ─▶ directory pages
//!            └─ log ──┬─▶ log page
//!                     └─▶ commit pages (deduplicated by RenderCache)
//! ```
//!
//! The first revision is rendered on its own and supplies the readme for the
//! summary page; the remaining ones run side by side. Page writers live on
//! their own threads and fan each page out to the rayon pool, so no pool
//! thread ever blocks on a channel. The references and summary pages are
//! written after every revision has finished.
//!
//! Any error aborts the build; there is no partial output mode.

pub mod catalog;
pub mod commit_log;
pub mod diffs;
pub mod files;
pub mod highlight;
pub mod templates;
pub mod walker;
pub mod writer;

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, ScopedJoinHandle};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::git::GitRepository;
use crate::git::refs::list_references;
use crate::git::revision::resolve_revisions;
use crate::git::tree::read_blob;
use crate::models::{CommitRecord, Revision, TreeEntry, TreeListing};
use crate::urls::{log_url, REFS_URL, SUMMARY_URL};

use catalog::RefCatalog;
use commit_log::build_log;
use diffs::{DiffRenderer, RenderCache};
use files::{is_markdown, render_contents, render_markdown};
use highlight::Highlighter;
use templates::{PageContext, SiteInfo};
use walker::{TreeWalker, WalkStats};
use writer::PageWriter;

/// Readme found in a revision's tree, already rendered to HTML.
#[derive(Debug, Clone)]
pub struct Readme {
    pub path: String,
    pub html: String,
}

impl Readme {
    fn depth(&self) -> usize {
        self.path.matches('/').count()
    }

    /// Shallowest path wins, then the lexicographically smaller one.
    fn prefer(current: Option<Readme>, candidate: Readme) -> Option<Readme> {
        match current {
            Some(current) if (current.depth(), &current.path) <= (candidate.depth(), &candidate.path) => Some(current),
            _ => Some(candidate),
        }
    }
}

/// What rendering one revision produced.
#[derive(Debug, Clone)]
pub struct RevisionOutput {
    pub revision: Revision,
    pub readme: Option<Readme>,
    pub last_commit: Option<CommitRecord>,
    pub commits: usize,
    /// Commit pages this revision wrote; shared history counts once overall
    pub commit_pages: usize,
    pub files: usize,
    pub directories: usize,
}

#[derive(Debug)]
pub struct BuildReport {
    /// In request order, the main revision first
    pub revisions: Vec<RevisionOutput>,
    pub rendered_commits: usize,
}

impl BuildReport {
    pub fn main(&self) -> Option<&RevisionOutput> {
        self.revisions.first()
    }

    /// Revision whose newest commit is the most recent one.
    pub fn most_recent(&self) -> Option<&RevisionOutput> {
        self.revisions
            .iter()
            .filter(|r| r.last_commit.is_some())
            .max_by_key(|r| r.last_commit.as_ref().map(|c| c.timestamp))
    }
}

pub struct Site {
    config: Config,
    site: SiteInfo,
    repo: GitRepository,
    catalog: RefCatalog,
    highlighter: Highlighter,
    writer: PageWriter,
    cache: RenderCache,
}

/// Runs a complete build for `config`.
pub fn build(config: &Config) -> Result<BuildReport> {
    let repo = GitRepository::open(&config.repo_path)?;
    let references = repo.with_repo(list_references)?;
    let revisions = repo.with_repo(|r| resolve_revisions(r, &config.revs, &references))?;
    let catalog = RefCatalog::build(&revisions, &references);

    let site = Site {
        site: SiteInfo {
            label: config.label.clone(),
            desc: config.desc.clone(),
            home_url: config.home_url.clone(),
            clone_url: config.clone_url.clone(),
        },
        highlighter: Highlighter::new(&config.theme)?,
        writer: PageWriter::new(&config.out_dir),
        cache: RenderCache::default(),
        config: config.clone(),
        repo,
        catalog,
    };

    site.render(&revisions)
}

impl Site {
    pub fn render(&self, revisions: &[Revision]) -> Result<BuildReport> {
        let (main, rest) = revisions.split_first().ok_or(AppError::NoRevisions)?;

        let main_output = self.render_revision(main)?;

        let others = thread::scope(|scope| {
            let handles: Vec<_> = rest
                .iter()
                .map(|revision| scope.spawn(move || self.render_revision(revision)))
                .collect();
            handles.into_iter().map(join_worker).collect::<Result<Vec<_>>>()
        })?;

        let ctx = PageContext::new(&self.site, main);
        self.writer.write_page(REFS_URL, templates::render_refs(ctx, self.catalog.refs()))?;

        let readme = main_output.readme.as_ref().map(|r| r.html.as_str());
        if readme.is_none() {
            tracing::warn!("no {} found in {}", self.config.readme_name(), main.name);
        }
        self.writer.write_page(SUMMARY_URL, templates::render_summary(ctx, readme))?;
        self.writer.copy_static(&self.highlighter)?;

        let mut outputs = Vec::with_capacity(revisions.len());
        outputs.push(main_output);
        outputs.extend(others);

        Ok(BuildReport {
            revisions: outputs,
            rendered_commits: self.cache.len(),
        })
    }

    fn render_revision(&self, revision: &Revision) -> Result<RevisionOutput> {
        tracing::info!("compiling ({}) revision ({})", self.site.label, revision.name);

        let ctx = PageContext::new(&self.site, revision);
        let (entry_tx, entry_rx) = mpsc::channel::<TreeEntry>();
        let (listing_tx, listing_rx) = mpsc::channel::<TreeListing>();

        let (files, directories, history, walked) = thread::scope(|scope| {
            let files = scope.spawn(move || self.write_files(ctx, entry_rx));
            let directories = scope.spawn(move || self.write_listings(ctx, listing_rx));
            let history = scope.spawn(move || self.write_history(ctx));

            let walker = TreeWalker::new(&self.repo, revision, !self.config.hide_tree_last_commit);
            let walked = walker.walk(entry_tx, listing_tx);

            (join_worker(files), join_worker(directories), join_worker(history), walked)
        });

        // Writer errors first: a failed writer closes its channel, which the
        // walker only sees as a send failure.
        let (files, readme) = files?;
        let directories = directories?;
        let (log_commits, last_commit, commit_pages) = history?;
        let stats: WalkStats = walked?;
        debug_assert_eq!(stats.files, files);
        debug_assert_eq!(stats.directories, directories);

        tracing::info!(
            "compilation complete ({}) revision ({}): {} files, {} commits",
            self.site.label,
            revision.name,
            files,
            log_commits
        );

        Ok(RevisionOutput {
            revision: revision.clone(),
            readme,
            last_commit,
            commits: log_commits,
            commit_pages,
            files,
            directories,
        })
    }

    /// Log page plus commit pages, written in parallel.
    fn write_history(&self, ctx: PageContext<'_>) -> Result<(usize, Option<CommitRecord>, usize)> {
        let log = build_log(&self.repo, ctx.revision, &self.catalog, self.config.page_size())?;
        let renderer = DiffRenderer::new(&self.repo, &self.highlighter, &self.writer);

        let (log_page, commit_pages) = rayon::join(
            || self.writer.write_page(&log_url(&ctx.revision.name), templates::render_log(ctx, &log.commits)),
            || renderer.render_all(ctx, &log.commits, &self.cache),
        );
        log_page?;

        Ok((log.commits.len(), log.last_commit().cloned(), commit_pages?))
    }

    /// One page per file entry; returns the file count and the readme.
    fn write_files(&self, ctx: PageContext<'_>, entries: Receiver<TreeEntry>) -> Result<(usize, Option<Readme>)> {
        let (result_tx, result_rx) = mpsc::channel();

        rayon::in_place_scope(|scope| {
            for entry in entries {
                if entry.is_dir() {
                    continue;
                }
                let result_tx = result_tx.clone();
                scope.spawn(move |_| {
                    // The receiver outlives the scope
                    let _ = result_tx.send(self.write_file(ctx, &entry));
                });
            }
        });
        drop(result_tx);

        let mut count = 0;
        let mut readme = None;
        for result in result_rx {
            if let Some(candidate) = result? {
                readme = Readme::prefer(readme, candidate);
            }
            count += 1;
        }
        Ok((count, readme))
    }

    fn write_file(&self, ctx: PageContext<'_>, entry: &TreeEntry) -> Result<Option<Readme>> {
        let bytes = self.repo.with_repo(|repo| read_blob(repo, entry.oid))?;
        let contents = render_contents(&self.highlighter, &entry.name, &bytes)?;
        self.writer.write_page(&entry.url, templates::render_file(ctx, entry, &contents))?;

        if entry.name.to_lowercase() != self.config.readme_name() {
            return Ok(None);
        }

        let html = if contents.is_text && is_markdown(&entry.name) {
            render_markdown(&String::from_utf8_lossy(&bytes))
        } else {
            contents.html
        };
        Ok(Some(Readme {
            path: entry.path.clone(),
            html,
        }))
    }

    /// One page per directory listing; returns the directory count.
    fn write_listings(&self, ctx: PageContext<'_>, listings: Receiver<TreeListing>) -> Result<usize> {
        let (result_tx, result_rx) = mpsc::channel();

        rayon::in_place_scope(|scope| {
            for listing in listings {
                let result_tx = result_tx.clone();
                scope.spawn(move |_| {
                    let written = self.writer.write_page(&listing.url, templates::render_tree(ctx, &listing));
                    let _ = result_tx.send(written);
                });
            }
        });
        drop(result_tx);

        let mut count = 0;
        for result in result_rx {
            result?;
            count += 1;
        }
        Ok(count)
    }
}

fn join_worker<T>(handle: ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    handle
        .join()
        .map_err(|_| AppError::Internal("render worker panicked".to_string()))?
}
