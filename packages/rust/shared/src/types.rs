//! Notebook document model (nbformat v4 subset).
//!
//! Field order on each struct is the JSON key order on disk.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Major notebook format version written by the serializer.
pub const NBFORMAT: u32 = 4;

/// Minor notebook format version written by the serializer.
pub const NBFORMAT_MINOR: u32 = 4;

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

/// One notebook cell, discriminated by `cell_type` on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    /// Executable code cell.
    Code(CodeCell),
    /// Narrative cell holding reconstructed Markdown.
    Markdown(MarkdownCell),
}

/// Fieldless discriminator for [`Cell`], used for counting and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Code,
    Markdown,
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code => f.write_str("code"),
            Self::Markdown => f.write_str("markdown"),
        }
    }
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Self::Code(_) => CellKind::Code,
            Self::Markdown(_) => CellKind::Markdown,
        }
    }

    /// Source lines, each but the last ending in `\n`.
    pub fn source(&self) -> &[String] {
        match self {
            Self::Code(c) => &c.source,
            Self::Markdown(m) => &m.source,
        }
    }
}

/// A code cell. `outputs` is always empty: rendered exports do not carry
/// them in a recoverable form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeCell {
    /// Prompt number, `null` when the cell was never run or the prompt was unreadable.
    pub execution_count: Option<u32>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub outputs: Vec<Value>,
    pub source: Vec<String>,
}

impl CodeCell {
    pub fn new(execution_count: Option<u32>, source: Vec<String>) -> Self {
        Self {
            execution_count,
            metadata: Map::new(),
            outputs: Vec::new(),
            source,
        }
    }
}

/// A markdown cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkdownCell {
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub source: Vec<String>,
}

impl MarkdownCell {
    pub fn new(source: Vec<String>) -> Self {
        Self {
            metadata: Map::new(),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Notebook
// ---------------------------------------------------------------------------

/// Notebook-level metadata. Only the title survives a rendered export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotebookMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// The complete notebook document produced by one conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Cells in document order.
    pub cells: Vec<Cell>,
    pub metadata: NotebookMetadata,
    pub nbformat: u32,
    pub nbformat_minor: u32,
}

impl Notebook {
    /// Wrap extracted cells in a v4 document.
    pub fn new(cells: Vec<Cell>, title: Option<String>) -> Self {
        Self {
            cells,
            metadata: NotebookMetadata { title },
            nbformat: NBFORMAT,
            nbformat_minor: NBFORMAT_MINOR,
        }
    }

    /// Count cells of the given kind.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind() == kind).count()
    }
}
