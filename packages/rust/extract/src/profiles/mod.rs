//! Exporter profile trait and built-in profiles for cell markup.
//!
//! Each notebook-to-HTML exporter template marks cells with its own class
//! names. A profile knows one template's marker classes and where the
//! prompt, source block, and rendered markdown live inside a cell.

mod classic;
mod lab;

use html2ipynb_shared::{CellKind, ProfileChoice};
use scraper::{ElementRef, Html, Selector};

pub use classic::ClassicProfile;
pub use lab::LabProfile;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Trait for exporter-specific cell markup.
///
/// Profiles are tried in priority order; `ClassicProfile` is the always-last fallback.
pub trait ExporterProfile: Send + Sync {
    /// Try to detect this exporter's markup in the parsed HTML.
    fn detect(&self, doc: &Html) -> bool;

    /// Selector matching every cell container.
    fn cell(&self) -> &Selector;

    /// Decide the cell kind from the container's own classes.
    fn classify(&self, cell: &ElementRef) -> Option<CellKind>;

    /// Selector for the rendered markdown sub-container of a markdown cell.
    fn rendered_markdown(&self) -> &Selector;

    /// Selector for the `In [n]:` prompt of a code cell.
    fn input_prompt(&self) -> &Selector;

    /// Selector for the preformatted source block of a code cell.
    fn source_block(&self) -> &Selector;

    /// Human-readable profile name for tracing.
    fn name(&self) -> &str;
}

/// Classify by marker classes. Markdown wins if a container carries both.
pub(crate) fn classify_by_class(
    cell: &ElementRef,
    markdown_class: &str,
    code_class: &str,
) -> Option<CellKind> {
    let mut is_code = false;
    for class in cell.value().classes() {
        if class == markdown_class {
            return Some(CellKind::Markdown);
        }
        if class == code_class {
            is_code = true;
        }
    }
    is_code.then_some(CellKind::Code)
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Holds registered profiles in priority order.
pub struct ProfileRegistry {
    profiles: Vec<Box<dyn ExporterProfile>>,
}

impl ProfileRegistry {
    /// Create a registry with all built-in profiles (lab first, classic last).
    pub fn new() -> Self {
        Self {
            profiles: vec![Box::new(LabProfile), Box::new(ClassicProfile)],
        }
    }

    /// Pick the profile for a document, honouring a forced choice.
    pub fn resolve(&self, doc: &Html, choice: ProfileChoice) -> &dyn ExporterProfile {
        let forced = match choice {
            ProfileChoice::Auto => None,
            ProfileChoice::Lab => Some("lab"),
            ProfileChoice::Classic => Some("classic"),
        };

        if let Some(name) = forced {
            if let Some(profile) = self.profiles.iter().find(|p| p.name() == name) {
                return profile.as_ref();
            }
        }

        self.detect(doc)
    }

    /// Detect the best profile for the given HTML document.
    /// Always returns a profile (ClassicProfile is the fallback).
    pub fn detect(&self, doc: &Html) -> &dyn ExporterProfile {
        for profile in &self.profiles {
            if profile.detect(doc) {
                return profile.as_ref();
            }
        }
        // Unreachable: ClassicProfile always matches
        unreachable!("ClassicProfile must always match");
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_lab_markup() {
        let doc = Html::parse_document(
            r#"<body><div class="jp-Cell jp-CodeCell"></div></body>"#,
        );
        let registry = ProfileRegistry::new();
        assert_eq!(registry.detect(&doc).name(), "lab");
    }

    #[test]
    fn falls_back_to_classic() {
        let doc = Html::parse_document("<body><p>nothing here</p></body>");
        let registry = ProfileRegistry::new();
        assert_eq!(registry.detect(&doc).name(), "classic");
    }

    #[test]
    fn forced_choice_overrides_detection() {
        let doc = Html::parse_document(
            r#"<body><div class="jp-Cell jp-CodeCell"></div></body>"#,
        );
        let registry = ProfileRegistry::new();
        assert_eq!(
            registry.resolve(&doc, ProfileChoice::Classic).name(),
            "classic"
        );
        assert_eq!(registry.resolve(&doc, ProfileChoice::Auto).name(), "lab");
    }

    #[test]
    fn markdown_marker_wins_over_code_marker() {
        let doc = Html::parse_fragment(r#"<div class="cell code_cell text_cell"></div>"#);
        let sel = Selector::parse("div").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert_eq!(
            classify_by_class(&el, "text_cell", "code_cell"),
            Some(CellKind::Markdown)
        );
    }

    #[test]
    fn unknown_container_is_unclassified() {
        let doc = Html::parse_fragment(r#"<div class="cell raw_cell"></div>"#);
        let sel = Selector::parse("div").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert_eq!(classify_by_class(&el, "text_cell", "code_cell"), None);
    }
}
