//! Format registry for format discovery and selection
//!
//! Formats are registered under their name and looked up by name or by file
//! extension.

use crate::error::FormatError;
use crate::format::Format;
use screenplay_core::Script;
use std::collections::HashMap;

/// Registry of screenplay formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let script = registry.parse(source, "fountain")?;
/// let xml = registry.serialize(&script, "fdx")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect format from filename based on file extension
    ///
    /// Returns the format name if a matching extension is found, or None otherwise.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension))
            .map(|format| format.name().to_string())
    }

    /// Parse source text using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<Script, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        fmt.parse(source)
    }

    /// Serialize a script using the specified format
    pub fn serialize(&self, script: &Script, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(script, format, &HashMap::new())
    }

    /// Serialize a script using the specified format and options
    pub fn serialize_with_options(
        &self,
        script: &Script,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        fmt.serialize_with_options(script, options)
    }

    /// Parse with one format and serialize with another
    pub fn convert(&self, source: &str, from: &str, to: &str) -> Result<String, FormatError> {
        let script = self.parse(source, from)?;
        self.serialize(&script, to)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::fountain::FountainFormat::default());
        registry.register(crate::formats::fdx::FdxFormat);
        registry.register(crate::formats::html::HtmlFormat::default());
        registry.register(crate::formats::dump::DumpFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
