//! Syntax highlighting for file pages and diff hunks.
//!
//! Output uses CSS classes rather than inline colours; the matching
//! stylesheet comes from [`Highlighter::css`] and is written once as
//! `syntax.css`.

use std::path::Path;

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::{AppError, Result};

/// Filename hint used for diff hunks.
pub const DIFF_HINT: &str = "commit.diff";

pub struct Highlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    pub fn new(theme_name: &str) -> Result<Self> {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .remove(theme_name)
            .ok_or_else(|| AppError::UnknownTheme(theme_name.to_string()))?;

        Ok(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Highlight `text`, picking a grammar from `filename` first, the first
    /// line second and falling back to plain text.
    pub fn highlight(&self, filename: &str, text: &str) -> Result<String> {
        let syntax = self.syntax_for(filename, text);

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, ClassStyle::Spaced);
        for line in LinesWithEndings::from(text) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(format!("<pre class=\"code\">{}</pre>", generator.finalize()))
    }

    pub fn css(&self) -> Result<String> {
        Ok(css_for_theme_with_class_style(&self.theme, ClassStyle::Spaced)?)
    }

    fn syntax_for(&self, filename: &str, text: &str) -> &SyntaxReference {
        let path = Path::new(filename);
        let by_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.syntaxes.find_syntax_by_extension(ext));
        // Grammars also list bare file names such as `Makefile`
        let by_name = || {
            path.file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| self.syntaxes.find_syntax_by_extension(name))
        };
        let by_first_line = || {
            text.lines()
                .next()
                .and_then(|line| self.syntaxes.find_syntax_by_first_line(line))
        };

        by_extension
            .or_else(by_name)
            .or_else(by_first_line)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }
}
