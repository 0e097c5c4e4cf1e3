//! Small string helpers shared by the parser and the document model.
//!
//! Trimming, substring replacement and joining map directly onto `str::trim`,
//! `str::replace` and `[String]::join`; only the helpers with screenplay
//! specific semantics live here.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches the numbered note (`[[3]]`) and boneyard (`/*3*/`) markers that the
/// parser substitutes into raw element text.
static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[\d+\]\]|/\*\d+\*/").expect("valid marker regex"));

/// Captures the index of a note marker.
pub(crate) static NOTE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[(\d+)\]\]").expect("valid note marker regex"));

/// Captures the index of a boneyard marker.
pub(crate) static BONEYARD_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\*(\d+)\*/").expect("valid boneyard marker regex"));

/// True when the text is empty or only holds whitespace.
pub fn is_whitespace_or_empty(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Removes leading and trailing line breaks, leaving other whitespace alone.
pub fn trim_outer_newlines(text: &str) -> &str {
    text.trim_matches(|c| c == '\n' || c == '\r')
}

/// Removes every note and boneyard marker from `text`.
pub fn strip_markers(text: &str) -> String {
    MARKER.replace_all(text, "").into_owned()
}

/// Marker referencing note `index`.
pub fn note_marker(index: usize) -> String {
    format!("[[{index}]]")
}

/// Marker referencing boneyard `index`.
pub fn boneyard_marker(index: usize) -> String {
    format!("/*{index}*/")
}
