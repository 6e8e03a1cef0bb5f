//! File page contents: text detection, line counts and readme rendering.

use std::path::Path;

use pulldown_cmark::{Parser, html as md_html};

use crate::error::Result;
use crate::models::FileContents;
use crate::site::highlight::Highlighter;

pub const BINARY_PLACEHOLDER: &str = "binary file, cannot display";

/// Only this much of a file is inspected to decide whether it is text.
const SNIFF_LEN: usize = 1024;

/// Whether the start of `bytes` looks like human-readable UTF-8.
///
/// A multi-byte character cut off at the sniff boundary doesn't count
/// against the file.
pub fn is_text(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let valid = match std::str::from_utf8(head) {
        Ok(s) => s,
        Err(e) if e.error_len().is_none() => {
            // `valid_up_to` always ends on a char boundary
            std::str::from_utf8(&head[..e.valid_up_to()]).unwrap_or_default()
        }
        Err(_) => return false,
    };

    !valid
        .chars()
        .any(|c| c < ' ' && !matches!(c, '\n' | '\t' | '\x0c' | '\r'))
}

/// Number of `\n`-separated segments, so a trailing newline adds one.
pub fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}

/// Human-readable byte count in SI units, e.g. `1.5 kB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "kB", "MB", "GB", "TB", "PB"];
    if bytes < 10 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else if value < 10.0 {
        format!("{:.1} {}", value, UNITS[unit])
    } else {
        format!("{:.0} {}", value, UNITS[unit])
    }
}

pub fn render_contents(highlighter: &Highlighter, name: &str, bytes: &[u8]) -> Result<FileContents> {
    if !is_text(bytes) {
        return Ok(FileContents {
            is_text: false,
            num_lines: 0,
            html: BINARY_PLACEHOLDER.to_string(),
        });
    }

    let text = String::from_utf8_lossy(bytes);
    Ok(FileContents {
        is_text: true,
        num_lines: count_lines(&text),
        html: highlighter.highlight(name, &text)?,
    })
}

pub fn is_markdown(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}

pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new(text);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}
