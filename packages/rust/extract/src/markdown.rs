//! Rendered-HTML to Markdown approximation for markdown cells.
//!
//! Each pass is a function `&str -> String` applied in sequence. The order
//! matters: heading open-tags must become `#` prefixes before the final pass
//! strips every remaining tag. Only headings and block boundaries are
//! recovered; inline emphasis, links and lists flatten to plain text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::source;

/// Permalink glyph the exporter appends to every heading.
const ANCHOR_GLYPH: char = '¶';

/// Run the full pass pipeline on a rendered markdown container's inner HTML.
pub(crate) fn run_pipeline(html: &str) -> String {
    let mut result = strip_anchor_glyphs(html);

    result = line_breaks_to_newlines(&result);
    result = block_ends_to_newlines(&result);
    result = headings_to_prefixes(&result);
    result = strip_tags(&result);

    result
}

/// Convert rendered markup to notebook source lines.
///
/// Every line is trimmed on both sides, so indentation inside the rendered
/// markup does not survive.
pub(crate) fn markdown_source(html: &str) -> Vec<String> {
    let text = run_pipeline(html);
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    source::assemble(text.split('\n').map(str::trim))
}

// ---------------------------------------------------------------------------
// Pass 1: Strip heading permalink glyphs
// ---------------------------------------------------------------------------

fn strip_anchor_glyphs(html: &str) -> String {
    html.replace(ANCHOR_GLYPH, "")
}

// ---------------------------------------------------------------------------
// Pass 2: Line-break tags
// ---------------------------------------------------------------------------

/// `<br>`, `<br/>` and `<br />` become newlines.
fn line_breaks_to_newlines(html: &str) -> String {
    static BR_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));

    BR_RE.replace_all(html, "\n").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 3: Block boundaries
// ---------------------------------------------------------------------------

/// Closing heading, paragraph and div tags end a block.
fn block_ends_to_newlines(html: &str) -> String {
    static BLOCK_END_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)</(?:h[1-6]|p|div)\s*>").expect("valid regex")
    });

    BLOCK_END_RE.replace_all(html, "\n").into_owned()
}

// ---------------------------------------------------------------------------
// Pass 4: Heading prefixes
// ---------------------------------------------------------------------------

/// `<h3 id="...">` becomes `### `.
fn headings_to_prefixes(html: &str) -> String {
    static HEADING_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)<h([1-6])(?:\s[^>]*)?>").expect("valid regex")
    });

    HEADING_OPEN_RE
        .replace_all(html, |caps: &Captures| {
            // The capture is a single digit 1..=6.
            let level = caps[1].parse::<usize>().unwrap_or(1);
            format!("{} ", "#".repeat(level))
        })
        .into_owned()
}

// ---------------------------------------------------------------------------
// Pass 5: Strip remaining tags
// ---------------------------------------------------------------------------

fn strip_tags(html: &str) -> String {
    static TAG_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

    TAG_RE.replace_all(html, "").into_owned()
}
