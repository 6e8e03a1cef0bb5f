use std::fs;
use std::path::{Path, PathBuf};

use maud::Markup;
use rust_embed::Embed;

use crate::error::{AppError, Result};
use crate::site::highlight::Highlighter;
use crate::urls::output_path;

/// Stylesheets shipped inside the binary
#[derive(Embed)]
#[folder = "static/"]
struct Assets;

/// Writes pages below the output directory, one file per URL.
pub struct PageWriter {
    out_dir: PathBuf,
}

impl PageWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn write_page(&self, url: &str, page: Markup) -> Result<PathBuf> {
        let path = output_path(&self.out_dir, url);
        write_file(&path, page.into_string().as_bytes())?;
        Ok(path)
    }

    /// Embedded assets plus `syntax.css` for the selected theme.
    pub fn copy_static(&self, highlighter: &Highlighter) -> Result<()> {
        for name in Assets::iter() {
            let Some(asset) = Assets::get(&name) else {
                continue;
            };
            write_file(&output_path(&self.out_dir, &name), &asset.data)?;
        }

        let css = highlighter.css()?;
        write_file(&self.out_dir.join("syntax.css"), css.as_bytes())
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| AppError::io(dir, e))?;
    }
    tracing::debug!("writing ({})", path.display());
    fs::write(path, bytes).map_err(|e| AppError::io(path, e))
}
