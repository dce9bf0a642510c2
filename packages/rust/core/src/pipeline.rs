//! End-to-end conversion: HTML export → cells → notebook → `.ipynb` file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use scraper::Html;
use tracing::{info, instrument, warn};

use html2ipynb_shared::{CellKind, Html2IpynbError, Notebook, ProfileChoice, Result};

use crate::output::{self, OutputTarget};

/// Options for a single conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Exporter markup to expect.
    pub profile: ProfileChoice,
    /// JSON indent width.
    pub indent: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            profile: ProfileChoice::Auto,
            indent: html2ipynb_notebook::DEFAULT_INDENT,
        }
    }
}

/// In-memory result of converting one HTML text.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The rebuilt notebook.
    pub notebook: Notebook,
    /// Serialized `.ipynb` text.
    pub json: String,
    /// Exporter profile that read the markup.
    pub profile: String,
    /// Cell containers that produced no cell.
    pub skipped: usize,
}

/// Result of converting one file.
#[derive(Debug)]
pub struct ConvertFileResult {
    /// The HTML export that was read.
    pub input: PathBuf,
    /// Where the notebook was written.
    pub output: PathBuf,
    /// Number of markdown cells written.
    pub markdown_cells: usize,
    /// Number of code cells written.
    pub code_cells: usize,
    /// Cell containers that produced no cell.
    pub skipped: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for multi-file runs.
pub trait ProgressReporter: Send + Sync {
    /// Called before an input is read.
    fn started(&self, input: &Path, current: usize, total: usize);
    /// Called when an input was written successfully.
    fn converted(&self, result: &ConvertFileResult);
    /// Called when an input failed; the run continues with the next one.
    fn failed(&self, input: &Path, error: &Html2IpynbError);
    /// Called once all inputs were attempted.
    fn done(&self, succeeded: usize, failed: usize);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn started(&self, _input: &Path, _current: usize, _total: usize) {}
    fn converted(&self, _result: &ConvertFileResult) {}
    fn failed(&self, _input: &Path, _error: &Html2IpynbError) {}
    fn done(&self, _succeeded: usize, _failed: usize) {}
}

/// Convert HTML text to notebook JSON.
///
/// Never fails: unrecognized markup degrades to fewer cells, and an export
/// with no cells becomes an empty notebook.
#[instrument(skip(html), fields(len = html.len()))]
pub fn convert_html(html: &str, opts: &ConvertOptions) -> Conversion {
    let doc = Html::parse_document(html);
    let extraction = html2ipynb_extract::extract(&doc, opts.profile);

    let notebook = html2ipynb_notebook::build(extraction.cells, extraction.title);
    let json = html2ipynb_notebook::to_json_with_indent(&notebook, opts.indent);

    Conversion {
        notebook,
        json,
        profile: extraction.profile,
        skipped: extraction.skipped,
    }
}

/// Check and read an HTML export.
pub fn read_html(input: &Path) -> Result<String> {
    output::ensure_html_input(input)?;
    std::fs::read_to_string(input).map_err(|e| Html2IpynbError::io(input, e))
}

/// Convert one export file and write the notebook next to it (or into
/// `target.out_dir`).
///
/// 1. Check the input is an existing HTML document
/// 2. Read and convert in memory
/// 3. Write the notebook; nothing is written if any earlier step fails
#[instrument(skip_all, fields(input = %input.display()))]
pub fn convert_file(
    input: &Path,
    opts: &ConvertOptions,
    target: &OutputTarget,
) -> Result<ConvertFileResult> {
    let start = Instant::now();

    let html = read_html(input)?;
    let dest = output::resolve_destination(input, target)?;
    let conversion = convert_html(&html, opts);
    output::write_notebook(&dest, &conversion.json, target)?;

    let result = ConvertFileResult {
        input: input.to_path_buf(),
        output: dest,
        markdown_cells: conversion.notebook.count(CellKind::Markdown),
        code_cells: conversion.notebook.count(CellKind::Code),
        skipped: conversion.skipped,
        elapsed: start.elapsed(),
    };

    info!(
        output = %result.output.display(),
        profile = %conversion.profile,
        markdown = result.markdown_cells,
        code = result.code_cells,
        skipped = result.skipped,
        "converted export"
    );

    Ok(result)
}

/// Convert several exports one after another. Each input is independent: a
/// failure is reported and the run moves on.
///
/// An input whose destination was already written earlier in the run fails
/// with [`Html2IpynbError::DestinationExists`] rather than replacing that
/// notebook, whatever the overwrite setting.
pub fn convert_files(
    inputs: &[PathBuf],
    opts: &ConvertOptions,
    target: &OutputTarget,
    progress: &dyn ProgressReporter,
) -> Vec<Result<ConvertFileResult>> {
    let total = inputs.len();
    let mut results = Vec::with_capacity(total);
    let mut written: HashSet<PathBuf> = HashSet::new();

    for (i, input) in inputs.iter().enumerate() {
        progress.started(input, i + 1, total);
        let result = output::resolve_destination(input, target).and_then(|dest| {
            if written.contains(&dest) {
                return Err(Html2IpynbError::DestinationExists { path: dest });
            }
            convert_file(input, opts, target)
        });
        match &result {
            Ok(done) => {
                written.insert(done.output.clone());
                progress.converted(done);
            }
            Err(e) => {
                warn!(input = %input.display(), error = %e, "conversion failed");
                progress.failed(input, e);
            }
        }
        results.push(result);
    }

    let failed = results.iter().filter(|r| r.is_err()).count();
    progress.done(total - failed, failed);
    results
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use html2ipynb_shared::Cell;
    use std::sync::Mutex;

    fn fixture_path(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/html")
            .join(name)
    }

    const INTRO_HTML: &str = r#"<!DOCTYPE html>
<html><head><title>intro</title></head><body>
<div class="jp-Cell jp-MarkdownCell"><div class="jp-RenderedMarkdown"><h1>Intro</h1><p>Hello</p></div></div>
<div class="jp-Cell jp-CodeCell"><div class="jp-InputArea"><div class="jp-InputPrompt">In [3]:</div><pre>x = 1
y = 2

</pre></div></div>
</body></html>"#;

    #[test]
    fn convert_html_end_to_end() {
        let conversion = convert_html(INTRO_HTML, &ConvertOptions::default());
        let value: serde_json::Value = serde_json::from_str(&conversion.json).expect("parse");

        assert_eq!(conversion.profile, "lab");
        assert_eq!(value["cells"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["cells"][0]["cell_type"], "markdown");
        assert_eq!(value["cells"][0]["source"], serde_json::json!(["# Intro\n", "Hello"]));
        assert_eq!(value["cells"][1]["cell_type"], "code");
        assert_eq!(value["cells"][1]["execution_count"], 3);
        assert_eq!(value["cells"][1]["source"], serde_json::json!(["x = 1\n", "y = 2"]));
        assert_eq!(value["metadata"]["title"], "intro");
    }

    #[test]
    fn convert_html_without_cells_is_empty_notebook() {
        let conversion = convert_html(
            "<html><body><p>hi</p></body></html>",
            &ConvertOptions::default(),
        );
        assert!(conversion.notebook.cells.is_empty());
        assert!(conversion.json.contains("\"cells\": []"));
    }

    #[test]
    fn null_execution_count_is_explicit() {
        let html = r#"<div class="jp-Cell jp-CodeCell"><div class="jp-InputArea"><div class="jp-InputPrompt">In [ ]:</div><pre>pass</pre></div></div>"#;
        let conversion = convert_html(html, &ConvertOptions::default());
        assert!(conversion.json.contains("\"execution_count\": null"));
    }

    #[test]
    fn convert_file_writes_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("intro.html");
        std::fs::write(&input, INTRO_HTML).unwrap();

        let result =
            convert_file(&input, &ConvertOptions::default(), &OutputTarget::default()).unwrap();

        assert_eq!(result.output, dir.path().join("intro.ipynb"));
        assert_eq!(result.markdown_cells, 1);
        assert_eq!(result.code_cells, 1);

        let written = std::fs::read_to_string(&result.output).unwrap();
        let nb: Notebook = serde_json::from_str(&written).expect("valid notebook");
        assert!(matches!(&nb.cells[1], Cell::Code(c) if c.execution_count == Some(3)));
    }

    #[test]
    fn convert_file_rejects_non_html_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("intro.md");
        std::fs::write(&input, INTRO_HTML).unwrap();

        let err = convert_file(&input, &ConvertOptions::default(), &OutputTarget::default())
            .unwrap_err();
        assert!(matches!(err, Html2IpynbError::Precondition { .. }));
        assert!(!dir.path().join("intro.ipynb").exists());
    }

    #[test]
    fn convert_fixture_into_out_dir() {
        let out = tempfile::tempdir().unwrap();
        let target = OutputTarget {
            out_dir: Some(out.path().to_path_buf()),
            overwrite: true,
        };

        let result = convert_file(
            &fixture_path("lab_export.html"),
            &ConvertOptions::default(),
            &target,
        )
        .unwrap();

        assert_eq!(result.output, out.path().join("lab_export.ipynb"));
        assert_eq!(result.markdown_cells, 2);
        assert_eq!(result.code_cells, 3);

        let written = std::fs::read_to_string(&result.output).unwrap();
        let nb: Notebook = serde_json::from_str(&written).unwrap();
        assert_eq!(
            nb.cells[3].source(),
            [
                "### Next steps\n".to_string(),
                "\n".to_string(),
                "Check Q2 against the forecast.\n".to_string(),
                "\n".to_string(),
                "Then plot it.".to_string(),
            ]
        );
    }

    /// Records reporter calls for assertions.
    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl ProgressReporter for RecordingProgress {
        fn started(&self, _input: &Path, current: usize, total: usize) {
            self.events.lock().unwrap().push(format!("start {current}/{total}"));
        }
        fn converted(&self, _result: &ConvertFileResult) {
            self.events.lock().unwrap().push("ok".into());
        }
        fn failed(&self, _input: &Path, _error: &Html2IpynbError) {
            self.events.lock().unwrap().push("fail".into());
        }
        fn done(&self, succeeded: usize, failed: usize) {
            self.events.lock().unwrap().push(format!("done {succeeded}/{failed}"));
        }
    }

    #[test]
    fn batch_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.html");
        std::fs::write(&good, INTRO_HTML).unwrap();
        let missing = dir.path().join("missing.html");

        let progress = RecordingProgress::default();
        let results = convert_files(
            &[missing, good],
            &ConvertOptions::default(),
            &OutputTarget::default(),
            &progress,
        );

        assert!(results[0].is_err());
        assert!(results[1].is_ok());
        assert_eq!(
            *progress.events.lock().unwrap(),
            vec!["start 1/2", "fail", "start 2/2", "ok", "done 1/1"]
        );
    }

    #[test]
    fn batch_refuses_to_reuse_a_destination() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        for (sub, text) in [("a", "first"), ("b", "second")] {
            std::fs::create_dir(dir.path().join(sub)).unwrap();
            std::fs::write(
                dir.path().join(sub).join("x.html"),
                format!(
                    r#"<div class="jp-Cell jp-MarkdownCell"><div class="jp-RenderedMarkdown"><p>{text}</p></div></div>"#
                ),
            )
            .unwrap();
        }
        let target = OutputTarget {
            out_dir: Some(out.clone()),
            overwrite: true,
        };

        let results = convert_files(
            &[dir.path().join("a/x.html"), dir.path().join("b/x.html")],
            &ConvertOptions::default(),
            &target,
            &SilentProgress,
        );

        assert!(results[0].is_ok());
        assert!(matches!(
            &results[1],
            Err(Html2IpynbError::DestinationExists { path }) if *path == out.join("x.ipynb")
        ));
        let written = std::fs::read_to_string(out.join("x.ipynb")).unwrap();
        assert!(written.contains("first"));
        assert!(!written.contains("second"));
    }

    #[test]
    fn failed_input_does_not_claim_its_destination() {
        let dir = tempfile::tempdir().unwrap();
        // Same destination, but the .htm input is missing so only the .html one writes.
        let missing = dir.path().join("x.htm");
        let present = dir.path().join("x.html");
        std::fs::write(&present, INTRO_HTML).unwrap();

        let results = convert_files(
            &[missing, present],
            &ConvertOptions::default(),
            &OutputTarget::default(),
            &SilentProgress,
        );

        assert!(matches!(results[0], Err(Html2IpynbError::Precondition { .. })));
        assert!(results[1].is_ok());
        assert!(dir.path().join("x.ipynb").is_file());
    }

    #[test]
    fn silent_progress_batch() {
        let results = convert_files(
            &[],
            &ConvertOptions::default(),
            &OutputTarget::default(),
            &SilentProgress,
        );
        assert!(results.is_empty());
    }
}
