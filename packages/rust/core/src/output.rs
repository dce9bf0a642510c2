//! Input checks, destination paths, and the notebook write.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use html2ipynb_shared::{Html2IpynbError, Result};

/// Extension given to written notebooks.
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Extensions accepted as HTML exports (compared case-insensitively).
const HTML_EXTENSIONS: [&str; 2] = ["html", "htm"];

/// Where and how converted notebooks are written.
#[derive(Debug, Clone)]
pub struct OutputTarget {
    /// Write into this directory instead of next to the input.
    pub out_dir: Option<PathBuf>,
    /// Replace an existing notebook at the destination.
    pub overwrite: bool,
}

impl Default for OutputTarget {
    fn default() -> Self {
        Self {
            out_dir: None,
            overwrite: true,
        }
    }
}

/// Reject inputs that are missing or not HTML before any conversion work.
pub fn ensure_html_input(input: &Path) -> Result<()> {
    if !input.is_file() {
        return Err(Html2IpynbError::precondition(format!(
            "no such document: {}",
            input.display()
        )));
    }

    let is_html = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            HTML_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        });

    if !is_html {
        return Err(Html2IpynbError::precondition(format!(
            "not an HTML document: {}",
            input.display()
        )));
    }

    Ok(())
}

/// Same directory and base name as the input, extension swapped to `ipynb`.
///
/// An input without an extension gets `.ipynb` appended.
pub fn destination_path(input: &Path) -> PathBuf {
    input.with_extension(NOTEBOOK_EXTENSION)
}

/// Resolve the destination for `input` under `target`.
pub fn resolve_destination(input: &Path, target: &OutputTarget) -> Result<PathBuf> {
    let dest = destination_path(input);
    match &target.out_dir {
        None => Ok(dest),
        Some(dir) => {
            let name = dest.file_name().ok_or_else(|| {
                Html2IpynbError::precondition(format!(
                    "cannot derive a file name from {}",
                    input.display()
                ))
            })?;
            Ok(dir.join(name))
        }
    }
}

/// Hidden sibling the notebook is staged in before it replaces `dest`.
fn staging_path(dest: &Path) -> Result<PathBuf> {
    let name = dest.file_name().ok_or_else(|| {
        Html2IpynbError::precondition(format!("not a file destination: {}", dest.display()))
    })?;
    Ok(dest.with_file_name(format!(".{}.tmp", name.to_string_lossy())))
}

/// Write the notebook text. Nothing is written if the destination exists
/// and overwriting is off.
///
/// The text goes to a temp sibling first and is renamed onto `dest`, so a
/// failed write leaves any previous notebook intact.
pub fn write_notebook(dest: &Path, json: &str, target: &OutputTarget) -> Result<()> {
    if !target.overwrite && dest.exists() {
        return Err(Html2IpynbError::DestinationExists {
            path: dest.to_path_buf(),
        });
    }

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            debug!(?parent, "creating output directory");
            std::fs::create_dir_all(parent).map_err(|e| Html2IpynbError::io(parent, e))?;
        }
    }

    let temp = staging_path(dest)?;
    if let Err(e) = std::fs::write(&temp, json) {
        let _ = std::fs::remove_file(&temp);
        return Err(Html2IpynbError::io(&temp, e));
    }
    if let Err(e) = std::fs::rename(&temp, dest) {
        let _ = std::fs::remove_file(&temp);
        return Err(Html2IpynbError::io(dest, e));
    }

    info!(path = %dest.display(), bytes = json.len(), "wrote notebook");
    Ok(())
}
