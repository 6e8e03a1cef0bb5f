//! HTML pages of the generated site.
//!
//! Every page shares the same frame: a header naming the repository with
//! links to the summary, the current revision's tree and log, and the
//! references page. Pre-rendered fragments (highlighted code, readme HTML)
//! are embedded with `PreEscaped`; everything else is escaped by maud.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::models::{Breadcrumb, CommitRecord, DiffRender, FileContents, RefInfo, Revision, TreeEntry, TreeListing};
use crate::site::files::format_size;
use crate::urls::{log_url, tree_url, REFS_URL, SUMMARY_URL};

/// Repository-wide header data.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub label: String,
    pub desc: String,
    pub home_url: String,
    pub clone_url: String,
}

/// What every page of one revision needs to render its frame.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub site: &'a SiteInfo,
    pub revision: &'a Revision,
}

impl<'a> PageContext<'a> {
    pub fn new(site: &'a SiteInfo, revision: &'a Revision) -> Self {
        Self { site, revision }
    }
}

// ============================================================================
// Frame
// ============================================================================

fn base_document(ctx: PageContext<'_>, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - " (ctx.site.label) }
                link rel="stylesheet" href="/main.css";
                link rel="stylesheet" href="/syntax.css";
            }
            body {
                (site_header(ctx))
                main { (content) }
            }
        }
    }
}

fn site_header(ctx: PageContext<'_>) -> Markup {
    let rev = &ctx.revision.name;
    html! {
        header.site-header {
            h1 {
                @if !ctx.site.home_url.is_empty() {
                    a href=(ctx.site.home_url) { "repos" }
                    " / "
                }
                (ctx.site.label)
            }
            @if !ctx.site.desc.is_empty() {
                p.desc { (ctx.site.desc) }
            }
            nav.site-nav {
                a href=(SUMMARY_URL) { "summary" }
                " | "
                a href=(REFS_URL) { "refs" }
                " | "
                span.rev { (rev) }
                " "
                a href=(tree_url(rev)) { "tree" }
                " "
                a href=(log_url(rev)) { "log" }
            }
            @if !ctx.site.clone_url.is_empty() {
                pre.clone { "git clone " (ctx.site.clone_url) }
            }
        }
    }
}

fn render_breadcrumbs(crumbs: &[Breadcrumb]) -> Markup {
    html! {
        nav.breadcrumbs {
            @for (idx, crumb) in crumbs.iter().enumerate() {
                @if idx > 0 { " / " }
                @match &crumb.url {
                    Some(url) => { a href=(url) { (crumb.name) } },
                    None => { span { (crumb.name) } },
                }
            }
        }
    }
}

fn ref_tags(refs: &[RefInfo]) -> Markup {
    html! {
        @for r in refs {
            @match &r.url {
                Some(url) => { a.tag href=(url) { (r.refspec) } },
                None => { span.tag { (r.refspec) } },
            }
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

pub fn render_summary(ctx: PageContext<'_>, readme: Option<&str>) -> Markup {
    let content = html! {
        section.readme {
            @if let Some(readme) = readme {
                (PreEscaped(readme))
            } @else {
                p.empty { "no readme found" }
            }
        }
    };
    base_document(ctx, "summary", content)
}

pub fn render_refs(ctx: PageContext<'_>, refs: &[RefInfo]) -> Markup {
    let content = html! {
        h2 { "refs" }
        ul.refs {
            @for r in refs {
                li {
                    @match &r.url {
                        Some(url) => { a href=(url) { (r.refspec) } },
                        None => { span { (r.refspec) } },
                    }
                    " "
                    code { (crate::urls::short_id(&r.id)) }
                }
            }
        }
    };
    base_document(ctx, "refs", content)
}

pub fn render_tree(ctx: PageContext<'_>, listing: &TreeListing) -> Markup {
    let title = if listing.path.is_empty() { "tree" } else { listing.path.as_str() };
    let content = html! {
        (render_breadcrumbs(&listing.breadcrumbs))
        table.tree {
            @for entry in &listing.entries {
                tr class=(if entry.is_dir() { "dir" } else { "file" }) {
                    td.name {
                        a href=(entry.url) {
                            (entry.name) @if entry.is_dir() { "/" }
                        }
                    }
                    td.size {
                        @if let Some(size) = entry.size { (format_size(size)) }
                    }
                    @if let Some(commit) = &entry.last_commit {
                        td.commit { a href=(commit.url) { (commit.summary) } }
                        td.when { (commit.when) }
                    }
                }
            }
        }
    };
    base_document(ctx, title, content)
}

pub fn render_file(ctx: PageContext<'_>, entry: &TreeEntry, contents: &FileContents) -> Markup {
    let content = html! {
        (render_breadcrumbs(&entry.breadcrumbs))
        div.file-meta {
            @if let Some(size) = entry.size { span { (format_size(size)) } }
            @if contents.is_text { " " span { (contents.num_lines) " lines" } }
            @if let Some(commit) = &entry.last_commit {
                " " a href=(commit.url) { (commit.short_id) } " " span { (commit.summary) }
            }
        }
        @if contents.is_text {
            (PreEscaped(&contents.html))
        } @else {
            p.binary { (contents.html) }
        }
    };
    base_document(ctx, &entry.path, content)
}

pub fn render_log(ctx: PageContext<'_>, commits: &[CommitRecord]) -> Markup {
    let content = html! {
        h2 { "log " (ctx.revision.name) }
        ul.log {
            @for commit in commits {
                li {
                    a.sha href=(commit.url) { code { (commit.short_id) } }
                    " "
                    span.summary { (commit.summary) }
                    " "
                    (ref_tags(&commit.refs))
                    div.meta {
                        span.author { (commit.author) }
                        " "
                        span.when { (commit.when) }
                    }
                }
            }
        }
    };
    base_document(ctx, "log", content)
}

pub fn render_commit(ctx: PageContext<'_>, commit: &CommitRecord, diff: &DiffRender) -> Markup {
    let content = html! {
        pre.message { (commit.message) }
        dl.commit-meta {
            dt { "commit" } dd { a href=(commit.url) { code { (commit.short_id) } } }
            dt { "parent" } dd { a href=(commit.parent_url) { code { (commit.parent_short_id) } } }
            dt { "author" } dd { (commit.author) }
            dt { "date" } dd { (commit.when) }
        }
        p.diff-summary {
            (diff.num_files) " files changed, "
            span.additions { (diff.total_additions) " additions" }
            ", "
            span.deletions { (diff.total_deletions) " deletions" }
        }
        @for file in &diff.files {
            section.diff-file {
                header {
                    span.kind { (file.kind.code()) }
                    " "
                    @if file.old_path != file.new_path && !file.old_path.is_empty() {
                        (file.old_path) " → "
                    }
                    (file.new_path)
                    " "
                    span.mode { (file.old_mode) " → " (file.new_mode) }
                    " "
                    span.additions { "+" (file.additions) }
                    " "
                    span.deletions { "-" (file.deletions) }
                }
                (PreEscaped(&file.content))
            }
        }
    };
    base_document(ctx, &commit.short_id, content)
}
