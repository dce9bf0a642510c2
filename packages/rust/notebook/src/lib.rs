//! Notebook serialization: extracted cells → `.ipynb` JSON text.
//!
//! The document model lives in `html2ipynb-shared`; this crate only renders
//! it. Key order is fixed by the model's field order, and every indent level
//! uses the same width so repeated conversions are byte-identical.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::debug;

use html2ipynb_shared::{Cell, CellKind, Notebook};

/// Indent width the notebook format itself uses on disk.
pub const DEFAULT_INDENT: usize = 1;

/// Wrap cells in a notebook document.
pub fn build(cells: Vec<Cell>, title: Option<String>) -> Notebook {
    Notebook::new(cells, title)
}

/// Render a notebook with the default indent.
pub fn to_json(notebook: &Notebook) -> String {
    to_json_with_indent(notebook, DEFAULT_INDENT)
}

/// Render a notebook as pretty JSON with `indent` spaces per level, ending
/// in a single newline. Null execution counts are written as `null`.
pub fn to_json_with_indent(notebook: &Notebook, indent: usize) -> String {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = Serializer::with_formatter(&mut buf, formatter);

    // The model holds only strings, integers, and string-keyed maps, which
    // serde_json always serializes to valid UTF-8.
    notebook
        .serialize(&mut ser)
        .expect("notebook model serializes infallibly");
    let mut json = String::from_utf8(buf).expect("serde_json emits UTF-8");
    json.push('\n');

    debug!(
        cells = notebook.cells.len(),
        code = notebook.count(CellKind::Code),
        markdown = notebook.count(CellKind::Markdown),
        bytes = json.len(),
        "serialized notebook"
    );

    json
}
