//! Commit pages and the render cache that keeps them unique.
//!
//! Every revision's log is handed to [`DiffRenderer::render_all`], so a
//! commit shared by several revisions is offered several times. The
//! [`RenderCache`] admits each commit id once; whoever claims it writes the
//! page, everybody else skips it.

use std::collections::HashSet;
use std::sync::Mutex;

use rayon::prelude::*;

use crate::error::{AppError, Result};
use crate::git::GitRepository;
use crate::git::diff::commit_patches;
use crate::models::{CommitRecord, DiffFile, DiffRender, FilePatch};
use crate::site::highlight::{DIFF_HINT, Highlighter};
use crate::site::templates::{PageContext, render_commit};
use crate::site::writer::PageWriter;

/// Commit ids whose page has been claimed during this run.
#[derive(Debug, Default)]
pub struct RenderCache {
    rendered: Mutex<HashSet<String>>,
}

impl RenderCache {
    /// Records `id` and returns true if nobody claimed it before. Check and
    /// insert happen under one lock, so two racing callers can't both win.
    pub fn claim(&self, id: &str) -> Result<bool> {
        let mut rendered = self
            .rendered
            .lock()
            .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        Ok(rendered.insert(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rendered.lock().map(|r| r.len()).unwrap_or(0)
    }
}

pub struct DiffRenderer<'a> {
    repo: &'a GitRepository,
    highlighter: &'a Highlighter,
    writer: &'a PageWriter,
}

impl<'a> DiffRenderer<'a> {
    pub fn new(repo: &'a GitRepository, highlighter: &'a Highlighter, writer: &'a PageWriter) -> Self {
        Self {
            repo,
            highlighter,
            writer,
        }
    }

    /// Writes a page for every commit not yet in `cache`. Returns how many
    /// pages this call wrote.
    pub fn render_all(&self, ctx: PageContext<'_>, commits: &[CommitRecord], cache: &RenderCache) -> Result<usize> {
        let written = commits
            .par_iter()
            .map(|commit| {
                if !cache.claim(&commit.id)? {
                    tracing::debug!("({}) commit file already generated, skipping", commit.short_id);
                    return Ok(false);
                }
                let diff = self.render(commit)?;
                self.writer.write_page(&commit.url, render_commit(ctx, commit, &diff))?;
                Ok(true)
            })
            .collect::<Result<Vec<bool>>>()?;

        Ok(written.into_iter().filter(|w| *w).count())
    }

    /// Diff of `commit` against its first parent with highlighted hunks.
    /// A root commit has nothing to compare against and renders empty.
    pub fn render(&self, commit: &CommitRecord) -> Result<DiffRender> {
        if commit.is_root() {
            return Ok(DiffRender::default());
        }

        let patches = self
            .repo
            .with_repo(|repo| commit_patches(repo, &commit.id, &commit.parent_id))?;

        let files = patches
            .into_iter()
            .map(|patch| self.render_file(patch))
            .collect::<Result<Vec<DiffFile>>>()?;

        Ok(DiffRender {
            num_files: files.len(),
            total_additions: files.iter().map(|f| f.additions).sum(),
            total_deletions: files.iter().map(|f| f.deletions).sum(),
            files,
        })
    }

    fn render_file(&self, patch: FilePatch) -> Result<DiffFile> {
        let content = if patch.is_binary {
            String::new()
        } else {
            self.highlighter.highlight(DIFF_HINT, &patch.text)?
        };

        Ok(DiffFile {
            kind: patch.kind,
            old_path: patch.old_path,
            new_path: patch.new_path,
            old_mode: patch.old_mode,
            new_mode: patch.new_mode,
            content,
            additions: patch.additions,
            deletions: patch.deletions,
        })
    }
}
