//! Command line surface and the validated build configuration.
//!
//! `Cli` is what clap parses; `Config` is what the pipeline consumes. The
//! conversion makes paths absolute, splits the revision list and applies the
//! defaults the rest of the crate relies on.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{AppError, Result};

pub const DEFAULT_MAX_COMMITS: usize = 5000;
pub const DEFAULT_README: &str = "readme.md";
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Git Site - Compile a git repository into a static website
#[derive(Parser, Debug)]
#[command(name = "git-site")]
#[command(about = "Render a git repository as a static, browsable website", long_about = None)]
pub struct Cli {
    /// Output directory
    #[arg(long, default_value = "./public")]
    pub out: PathBuf,

    /// Path to the git repository
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Revisions to generate logs and trees for (e.g. main,v1,c69f86f,HEAD)
    #[arg(long, default_value = "HEAD")]
    pub revs: String,

    /// Syntax highlighting theme
    #[arg(long, default_value = DEFAULT_THEME)]
    pub theme: String,

    /// Pretty name for the repository, defaults to the last folder of --repo
    #[arg(long)]
    pub label: Option<String>,

    /// Git clone URL shown in the page header
    #[arg(long, default_value = "")]
    pub clone_url: String,

    /// URL for the breadcrumb leading back to a list of repositories
    #[arg(long, default_value = "")]
    pub home_url: String,

    /// Description of the repository
    #[arg(long, default_value = "")]
    pub desc: String,

    /// Maximum number of commits to render per revision (0 means the default)
    #[arg(long, default_value_t = 0)]
    pub max_commits: usize,

    /// Do not compute the last commit for each file in the tree
    #[arg(long)]
    pub hide_tree_last_commit: bool,

    /// Name of the readme file, matched case-insensitively
    #[arg(long, default_value = DEFAULT_README)]
    pub readme: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Everything the renderer needs to know about one build.
#[derive(Debug, Clone)]
pub struct Config {
    pub out_dir: PathBuf,
    pub repo_path: PathBuf,
    pub revs: Vec<String>,
    pub theme: String,
    pub label: String,
    pub desc: String,
    pub clone_url: String,
    pub home_url: String,
    pub max_commits: usize,
    pub hide_tree_last_commit: bool,
    pub readme: String,
}

impl Cli {
    pub fn into_config(self) -> Result<Config> {
        let out_dir = absolute(&self.out)?;
        let repo_path = absolute(&self.repo)?;

        let revs = split_revs(&self.revs);
        if revs.is_empty() {
            return Err(AppError::NoRevisions);
        }

        let label = self
            .label
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| repo_label(&repo_path));

        Ok(Config {
            out_dir,
            repo_path,
            revs,
            theme: self.theme,
            label,
            desc: self.desc,
            clone_url: self.clone_url,
            home_url: self.home_url,
            max_commits: self.max_commits,
            hide_tree_last_commit: self.hide_tree_last_commit,
            readme: self.readme,
        })
    }
}

impl Config {
    /// Config with defaults for everything except the two required paths.
    pub fn new(repo_path: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        let repo_path = repo_path.into();
        Self {
            label: repo_label(&repo_path),
            out_dir: out_dir.into(),
            repo_path,
            revs: vec!["HEAD".to_string()],
            theme: DEFAULT_THEME.to_string(),
            desc: String::new(),
            clone_url: String::new(),
            home_url: String::new(),
            max_commits: DEFAULT_MAX_COMMITS,
            hide_tree_last_commit: false,
            readme: DEFAULT_README.to_string(),
        }
    }

    pub fn page_size(&self) -> usize {
        if self.max_commits == 0 {
            DEFAULT_MAX_COMMITS
        } else {
            self.max_commits
        }
    }

    /// Lowercased readme filename used for matching tree entries.
    pub fn readme_name(&self) -> String {
        if self.readme.is_empty() {
            DEFAULT_README.to_string()
        } else {
            self.readme.to_lowercase()
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| AppError::io(path, e))
}

pub fn split_revs(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

fn repo_label(repo_path: &Path) -> String {
    repo_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "repository".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_revs_drops_blank_entries() {
        assert_eq!(split_revs("main, v1,,HEAD"), vec!["main", "v1", "HEAD"]);
        assert!(split_revs("").is_empty());
        assert!(split_revs(" , ").is_empty());
    }

    #[test]
    fn empty_revs_is_a_configuration_error() {
        let cli = Cli::parse_from(["git-site", "--revs", ""]);
        assert!(matches!(cli.into_config(), Err(AppError::NoRevisions)));
    }

    #[test]
    fn cli_defaults() {
        let config = Cli::parse_from(["git-site", "--repo", "/tmp/project"])
            .into_config()
            .unwrap();
        assert_eq!(config.revs, vec!["HEAD"]);
        assert_eq!(config.label, "project");
        assert_eq!(config.page_size(), DEFAULT_MAX_COMMITS);
        assert_eq!(config.readme_name(), "readme.md");
        assert!(!config.hide_tree_last_commit);
    }

    #[test]
    fn readme_override_is_lowercased() {
        let config = Cli::parse_from(["git-site", "--readme", "README.rst", "--max-commits", "10"])
            .into_config()
            .unwrap();
        assert_eq!(config.readme_name(), "readme.rst");
        assert_eq!(config.page_size(), 10);
    }
}
