//! Code cell recovery: execution prompt and verbatim source.

use std::sync::LazyLock;

use regex::Regex;

use crate::source;

/// Parse the execution count from prompt text such as `In [3]:`.
///
/// Exporters often render the space as `&nbsp;`, so any Unicode whitespace
/// is accepted between `In` and `[`. Unexecuted prompts (`In [ ]:`), zero,
/// and values that overflow yield `None`.
pub(crate) fn parse_execution_count(prompt: &str) -> Option<u32> {
    static PROMPT_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"In\s*\[(\d+)\]").expect("valid regex"));

    PROMPT_RE
        .captures(prompt)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|n| *n > 0)
}

/// Drop trailing empty or whitespace-only lines.
pub(crate) fn trim_trailing_blank_lines<'a, 'b>(mut lines: &'b [&'a str]) -> &'b [&'a str] {
    while let Some((last, rest)) = lines.split_last() {
        if !last.trim().is_empty() {
            break;
        }
        lines = rest;
    }
    lines
}

/// Convert the raw text of a source block to notebook source lines.
pub(crate) fn code_source(raw: &str) -> Vec<String> {
    let lines: Vec<&str> = raw.split('\n').collect();
    source::assemble(trim_trailing_blank_lines(&lines).iter().copied())
}
