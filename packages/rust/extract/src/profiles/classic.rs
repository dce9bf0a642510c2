//! Classic notebook export markup (`cell`, `text_cell`, `code_cell`).

use std::sync::LazyLock;

use html2ipynb_shared::CellKind;
use scraper::{ElementRef, Html, Selector};

use super::{ExporterProfile, classify_by_class};

static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".cell").expect("valid selector"));
static RENDERED_MARKDOWN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".text_cell_render").expect("valid selector"));
static INPUT_PROMPT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".input_prompt").expect("valid selector"));
static SOURCE_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".input_area pre").expect("valid selector"));

/// Reads cells from classic-template exports. Always matches, so it is the
/// registry's fallback.
pub struct ClassicProfile;

impl ExporterProfile for ClassicProfile {
    fn detect(&self, _doc: &Html) -> bool {
        true
    }

    fn cell(&self) -> &Selector {
        &CELL
    }

    fn classify(&self, cell: &ElementRef) -> Option<CellKind> {
        classify_by_class(cell, "text_cell", "code_cell")
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
        "classic"
    }
}
