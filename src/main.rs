//! Git Site - render a git repository as a static website
//!
//! # Usage
//! ```bash
//! git-site --repo ~/src/project --out ./public
//! git-site --repo . --revs main,v1.0 --hide-tree-last-commit
//! ```

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use git_site::config::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = cli.into_config().context("invalid configuration")?;
    tracing::debug!("{:?}", config);

    let report = git_site::build(&config)
        .with_context(|| format!("failed to build site for {}", config.repo_path.display()))?;

    tracing::info!(
        "site written to {} ({} revisions, {} commit pages)",
        config.out_dir.join("index.html").display(),
        report.revisions.len(),
        report.rendered_commits
    );
    if let Some(latest) = report.most_recent() {
        if let Some(commit) = &latest.last_commit {
            tracing::info!(
                "most recent activity: {} ({} {})",
                latest.revision.name,
                commit.short_id,
                commit.when
            );
        }
    }

    Ok(())
}
