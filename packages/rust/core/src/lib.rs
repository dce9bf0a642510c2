//! Conversion pipeline for html2ipynb.
//!
//! This crate ties together cell extraction and notebook serialization into
//! end-to-end workflows: text to JSON ([`pipeline::convert_html`]) and
//! export file to `.ipynb` file ([`pipeline::convert_file`]).

pub mod output;
pub mod pipeline;
