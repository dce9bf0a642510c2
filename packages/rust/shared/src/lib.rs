//! Shared types, error model, and configuration for html2ipynb.
//!
//! This crate is the foundation depended on by all other html2ipynb crates.
//! It provides:
//! - [`Html2IpynbError`], the unified error type
//! - The notebook document model ([`Notebook`], [`Cell`], [`CodeCell`], [`MarkdownCell`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, ExtractConfig, OutputConfig, ProfileChoice, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{Html2IpynbError, Result};
pub use types::{
    Cell, CellKind, CodeCell, MarkdownCell, NBFORMAT, NBFORMAT_MINOR, Notebook, NotebookMetadata,
};
