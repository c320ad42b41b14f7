#![forbid(unsafe_code)]

//! Line scanning and list-marker predicates.
//!
//! The Enter/Tab behaviors look at the current line - the text between the
//! last newline and the caret - and at the shape of its leading marker.
//! These are fixed-shape checks (leading whitespace plus `-` or `N.`), so
//! they are written as plain char scans rather than a pattern grammar.
//!
//! All offsets are char offsets, matching the transaction engine.

use crate::transaction::byte_offset;

/// Char offset of the start of the line containing `caret`.
///
/// This is the offset just past the last newline before the caret, or `0`
/// on the first line.
#[must_use]
pub fn line_start(value: &str, caret: usize) -> usize {
    let mut start = 0;
    for (i, ch) in value.chars().take(caret).enumerate() {
        if ch == '\n' {
            start = i + 1;
        }
    }
    start
}

/// The current line's text from its start up to the caret.
#[must_use]
pub fn line_up_to(value: &str, caret: usize) -> &str {
    let start = line_start(value, caret);
    &value[byte_offset(value, start)..byte_offset(value, caret)]
}

/// Full text of the line before the one starting at `line_start`, without
/// its trailing newline. `None` on the first line.
#[must_use]
pub fn previous_line(value: &str, line_start: usize) -> Option<&str> {
    if line_start == 0 {
        return None;
    }
    // The char at `line_start - 1` is the newline ending the previous line.
    let prev_start = self::line_start(value, line_start - 1);
    Some(&value[byte_offset(value, prev_start)..byte_offset(value, line_start - 1)])
}

/// Number of leading whitespace chars on the line.
#[must_use]
pub fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// A numbered list marker: leading whitespace, digits, a dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberedMarker {
    /// Leading whitespace length in chars.
    pub indent: usize,
    /// The marker's number.
    pub number: u64,
}

/// Match `<ws><digits>.` at the start of the line.
///
/// A run of digits too large for `u64` is not treated as a marker.
#[must_use]
pub fn numbered_marker(line: &str) -> Option<NumberedMarker> {
    let indent = leading_whitespace(line);
    let rest = &line[byte_offset(line, indent)..];
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let after = &rest[digits.len()..];
    if !after.starts_with('.') {
        return None;
    }
    let number = digits.parse::<u64>().ok()?;
    Some(NumberedMarker { indent, number })
}

/// Match `<ws>-` at the start of the line, returning the indent length.
#[must_use]
pub fn bullet_marker(line: &str) -> Option<usize> {
    let indent = leading_whitespace(line);
    let rest = &line[byte_offset(line, indent)..];
    rest.starts_with('-').then_some(indent)
}

/// Whether the line is a bare marker with no content: `<ws>-<ws>` or
/// `<ws><digits>.<ws>`.
///
/// Pressing Enter on such a line breaks out of the list instead of
/// continuing it.
#[must_use]
pub fn is_empty_marker(line: &str) -> bool {
    let indent = leading_whitespace(line);
    let rest = &line[byte_offset(line, indent)..];
    if let Some(tail) = rest.strip_prefix('-') {
        return tail.chars().all(char::is_whitespace);
    }
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return false;
    }
    match rest[digits.len()..].strip_prefix('.') {
        Some(tail) => tail.chars().all(char::is_whitespace),
        None => false,
    }
}
