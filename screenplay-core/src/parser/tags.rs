//! Trailing `#tag` extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::is_whitespace_or_empty;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+#([^#\s]+)").expect("valid tag regex"));

/// Splits `line` into its untagged text and the tags it carries.
///
/// A tag is a whitespace-preceded `#token` that ends at whitespace or at the
/// end of the line. A line holding nothing but tags keeps them as text.
pub(crate) fn extract_tags(line: &str) -> (String, Vec<String>) {
    let mut tags = Vec::new();
    let mut first_tag_at = None;

    for caps in TAG.captures_iter(line) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if line[whole.end()..]
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace())
        {
            continue;
        }
        if first_tag_at.is_none() && is_whitespace_or_empty(&line[..whole.start()]) {
            continue;
        }
        tags.push(caps[1].to_string());
        first_tag_at.get_or_insert(whole.start());
    }

    match first_tag_at {
        Some(index) => (line[..index].trim_end().to_string(), tags),
        None => (line.to_string(), tags),
    }
}
