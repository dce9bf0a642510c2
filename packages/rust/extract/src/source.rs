//! Notebook source-line convention.
//!
//! A cell's `source` is an array of physical lines: every element but the
//! last ends in exactly one `\n`, and the last carries no trailing whitespace.

/// Join physical lines (without their newlines) into notebook source form.
pub(crate) fn assemble<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = lines.into_iter().map(|line| format!("{line}\n")).collect();

    if let Some(last) = out.last_mut() {
        let kept = last.trim_end().len();
        last.truncate(kept);
    }

    out
}

/// Whether `source` obeys the line convention. Used by tests across the crate.
#[cfg(test)]
pub(crate) fn is_well_formed(source: &[String]) -> bool {
    let Some((last, rest)) = source.split_last() else {
        return true;
    };
    let body_ok = rest
        .iter()
        .all(|line| line.ends_with('\n') && !line[..line.len() - 1].contains('\n'));
    body_ok && !last.contains('\n') && last.trim_end().len() == last.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_on_all_but_last() {
        let out = assemble(["a", "b", "c"]);
        assert_eq!(out, vec!["a\n", "b\n", "c"]);
        assert!(is_well_formed(&out));
    }

    #[test]
    fn last_line_is_right_trimmed() {
        let out = assemble(["x = 1", "y = 2   \t"]);
        assert_eq!(out, vec!["x = 1\n", "y = 2"]);
    }

    #[test]
    fn inner_lines_keep_their_whitespace() {
        let out = assemble(["    indented  ", "end"]);
        assert_eq!(out[0], "    indented  \n");
    }

    #[test]
    fn empty_input_gives_empty_source() {
        assert!(assemble(std::iter::empty()).is_empty());
        assert!(is_well_formed(&[]));
    }

    #[test]
    fn detects_malformed_sources() {
        let owned = |lines: &[&str]| lines.iter().map(|l| l.to_string()).collect::<Vec<_>>();
        assert!(!is_well_formed(&owned(&["a", "b"])));
        assert!(!is_well_formed(&owned(&["a\n", "b \n"])));
        assert!(!is_well_formed(&owned(&["a\n\n", "b"])));
        assert!(!is_well_formed(&owned(&["a\n", "b "])));
    }
}
