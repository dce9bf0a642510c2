//! JupyterLab-style export markup (`jp-*` classes).

use std::sync::LazyLock;

use html2ipynb_shared::CellKind;
use scraper::{ElementRef, Html, Selector};

use super::{ExporterProfile, classify_by_class};

static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".jp-Cell").expect("valid selector"));
static RENDERED_MARKDOWN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".jp-RenderedMarkdown").expect("valid selector"));
static INPUT_PROMPT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".jp-InputPrompt").expect("valid selector"));
static SOURCE_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".jp-InputArea pre").expect("valid selector"));

/// Detects and reads cells from JupyterLab-template exports.
pub struct LabProfile;

impl ExporterProfile for LabProfile {
    fn detect(&self, doc: &Html) -> bool {
        doc.select(&CELL).next().is_some()
    }

    fn cell(&self) -> &Selector {
        &CELL
    }

    fn classify(&self, cell: &ElementRef) -> Option<CellKind> {
        classify_by_class(cell, "jp-MarkdownCell", "jp-CodeCell")
    }

    fn rendered_markdown(&self) -> &Selector {
        &RENDERED_MARKDOWN
    }

    fn input_prompt(&self) -> &Selector {
        &INPUT_PROMPT
    }

    fn source_block(&self) -> &Selector {
        &SOURCE_BLOCK
    }

    fn name(&self) -> &str {
        "lab"
    }
}
