//! Cell extraction from rendered notebook HTML exports.
//!
//! Walks the top-level cell containers of a parsed export in document order,
//! classifies each through an [`ExporterProfile`], and rebuilds the cell:
//! Markdown is approximated from the rendered markup, code is read verbatim
//! from the source block. Structural gaps are fallbacks, never errors.

mod code;
mod markdown;
pub mod profiles;
mod source;

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, trace};

use html2ipynb_shared::{Cell, CellKind, CodeCell, MarkdownCell, ProfileChoice};

pub use profiles::{ClassicProfile, ExporterProfile, LabProfile, ProfileRegistry};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Everything recovered from one export document.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Cells in document order.
    pub cells: Vec<Cell>,
    /// Trimmed `<title>` text, if any.
    pub title: Option<String>,
    /// Name of the profile that read the markup.
    pub profile: String,
    /// Containers that produced no cell (unclassified, or markdown without markup).
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract cells and title from a parsed export.
///
/// This is the main entry point. The profile is detected from the markup
/// unless `choice` forces one.
#[instrument(skip(doc))]
pub fn extract(doc: &Html, choice: ProfileChoice) -> Extraction {
    let registry = ProfileRegistry::new();
    let profile = registry.resolve(doc, choice);
    debug!(profile = profile.name(), "resolved exporter profile");

    let (cells, skipped) = extract_cells(doc, profile);
    let title = extract_title(doc);

    debug!(
        cells = cells.len(),
        skipped,
        title = title.as_deref().unwrap_or(""),
        "extraction complete"
    );

    Extraction {
        cells,
        title,
        profile: profile.name().to_string(),
        skipped,
    }
}

/// Extract cells with an explicit profile. Returns the cells and the number
/// of containers that yielded nothing.
pub fn extract_cells(doc: &Html, profile: &dyn ExporterProfile) -> (Vec<Cell>, usize) {
    let mut cells = Vec::new();
    let mut skipped = 0;

    for (index, container) in top_level_cells(doc, profile).enumerate() {
        match extract_cell(&container, profile) {
            Some(cell) => {
                trace!(index, kind = %cell.kind(), lines = cell.source().len(), "extracted cell");
                cells.push(cell);
            }
            None => {
                debug!(index, "skipping cell container");
                skipped += 1;
            }
        }
    }

    (cells, skipped)
}

/// Cell containers that are not nested inside another container.
fn top_level_cells<'a>(
    doc: &'a Html,
    profile: &'a dyn ExporterProfile,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let cell_sel = profile.cell();
    doc.select(cell_sel).filter(move |el| {
        !el.ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| cell_sel.matches(&ancestor))
    })
}

/// Rebuild one cell, or `None` when the container yields nothing.
fn extract_cell(container: &ElementRef, profile: &dyn ExporterProfile) -> Option<Cell> {
    match profile.classify(container)? {
        CellKind::Markdown => extract_markdown(container, profile).map(Cell::Markdown),
        CellKind::Code => Some(Cell::Code(extract_code(container, profile))),
    }
}

fn extract_markdown(container: &ElementRef, profile: &dyn ExporterProfile) -> Option<MarkdownCell> {
    let rendered = container.select(profile.rendered_markdown()).next()?;
    let html = rendered.inner_html();
    if html.trim().is_empty() {
        return None;
    }
    Some(MarkdownCell::new(markdown::markdown_source(&html)))
}

fn extract_code(container: &ElementRef, profile: &dyn ExporterProfile) -> CodeCell {
    let execution_count = container
        .select(profile.input_prompt())
        .next()
        .and_then(|prompt| code::parse_execution_count(&prompt.text().collect::<String>()));

    let source = container
        .select(profile.source_block())
        .next()
        .map(|pre| code::code_source(&pre.text().collect::<String>()))
        .unwrap_or_default();

    CodeCell::new(execution_count, source)
}

/// Extract the document `<title>` from `<head>`, ignoring blank titles.
///
/// SVG `<title>` elements in cell outputs are not document titles.
pub fn extract_title(doc: &Html) -> Option<String> {
    static TITLE_SEL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("head > title").expect("valid selector"));

    doc.select(&TITLE_SEL)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
