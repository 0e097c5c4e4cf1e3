//! Functional conversion helpers
//!
//! String-in, string-out wrappers over the formats, for callers that do not
//! need a [`crate::FormatRegistry`].

use crate::format::Format;
use crate::formats::fdx::FdxFormat;
use crate::formats::fountain::{FountainFormat, FountainWriter, WriterOptions};
use screenplay_core::Script;

/// Serialize a script to Fountain with the default writer options
///
/// # Example
///
/// ```
/// use screenplay_babel::transforms::serialize_to_fountain;
///
/// let script = screenplay_core::parse("EXT. PARK - DAY\n\nBirds.");
/// assert_eq!(serialize_to_fountain(&script), "EXT. PARK - DAY\n\nBirds.");
/// ```
pub fn serialize_to_fountain(script: &Script) -> String {
    FountainWriter::default().write(script)
}

/// Serialize a script to Fountain with custom writer options
pub fn serialize_to_fountain_with_options(script: &Script, options: WriterOptions) -> String {
    FountainWriter::new(options).write(script)
}

/// Round-trip transformation: parse and re-serialize as Fountain
///
/// Normalizes spacing, indentation and continued-speaker markers.
pub fn format_fountain_source(source: &str) -> Result<String, String> {
    let format = FountainFormat::default();
    let script = format.parse(source).map_err(|e| e.to_string())?;
    format.serialize(&script).map_err(|e| e.to_string())
}

pub fn fdx_to_fountain(source: &str) -> Result<String, String> {
    let script = FdxFormat.parse(source).map_err(|e| e.to_string())?;
    FountainFormat::default()
        .serialize(&script)
        .map_err(|e| e.to_string())
}

pub fn fountain_to_fdx(source: &str) -> Result<String, String> {
    let script = FountainFormat::default()
        .parse(source)
        .map_err(|e| e.to_string())?;
    FdxFormat.serialize(&script).map_err(|e| e.to_string())
}
