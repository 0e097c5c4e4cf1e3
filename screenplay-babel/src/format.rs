//! Format trait definition
//!
//! Every format converts between its textual representation and a
//! [`Script`]. A format may support parsing, serialization, or both.

use crate::error::FormatError;
use screenplay_core::Script;
use std::collections::HashMap;

/// Trait for screenplay formats
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, script: &Script) -> Result<String, FormatError> {
///         Ok(script.dump())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "fountain", "fdx", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Script)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Script → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Script
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Script, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Script into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _script: &Script) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize a Script, optionally using extra parameters.
    ///
    /// Formats without options can rely on the default implementation, which
    /// delegates to [`Format::serialize`] and rejects any parameter.
    fn serialize_with_options(
        &self,
        script: &Script,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(script)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

/// Reads a boolean serializer option, accepting `true`/`false`/`1`/`0`.
pub(crate) fn bool_option(
    options: &HashMap<String, String>,
    key: &str,
) -> Result<Option<bool>, FormatError> {
    match options.get(key).map(String::as_str) {
        None => Ok(None),
        Some("true" | "1") => Ok(Some(true)),
        Some("false" | "0") => Ok(Some(false)),
        Some(other) => Err(FormatError::SerializationError(format!(
            "Option '{key}' expects a boolean, got '{other}'"
        ))),
    }
}

/// Rejects any option key not listed in `known`.
pub(crate) fn check_known_options(
    format: &str,
    options: &HashMap<String, String>,
    known: &[&str],
) -> Result<(), FormatError> {
    let mut unknown: Vec<&str> = options
        .keys()
        .map(String::as_str)
        .filter(|key| !known.contains(key))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort_unstable();
    Err(FormatError::NotSupported(format!(
        "Format '{format}' does not support parameter(s): {}",
        unknown.join(", ")
    )))
}
