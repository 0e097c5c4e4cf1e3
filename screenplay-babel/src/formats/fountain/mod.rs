//! Fountain format implementation
//!
//! Parsing delegates to the incremental parser in screenplay-core;
//! serialization goes through [`FountainWriter`].

use crate::error::FormatError;
use crate::format::{bool_option, check_known_options, Format};
use screenplay_core::{parse_with_options, ParserOptions, Script};
use std::collections::HashMap;

pub mod writer;
pub mod writer_options;

pub use writer::FountainWriter;
pub use writer_options::WriterOptions;

/// Format implementation for Fountain markup
///
/// Accepts `pretty_print` as a serialization option.
#[derive(Debug, Clone, Default)]
pub struct FountainFormat {
    parser_options: ParserOptions,
    writer_options: WriterOptions,
}

impl FountainFormat {
    pub fn new(parser_options: ParserOptions, writer_options: WriterOptions) -> Self {
        Self {
            parser_options,
            writer_options,
        }
    }
}

impl Format for FountainFormat {
    fn name(&self) -> &str {
        "fountain"
    }

    fn description(&self) -> &str {
        "Fountain plain-text screenplay markup"
    }

    fn file_extensions(&self) -> &[&str] {
        &["fountain", "spmd", "txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Script, FormatError> {
        Ok(parse_with_options(source, self.parser_options))
    }

    fn serialize(&self, script: &Script) -> Result<String, FormatError> {
        Ok(FountainWriter::new(self.writer_options).write(script))
    }

    fn serialize_with_options(
        &self,
        script: &Script,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_known_options(self.name(), options, &["pretty_print"])?;
        let mut writer_options = self.writer_options;
        if let Some(pretty_print) = bool_option(options, "pretty_print")? {
            writer_options.pretty_print = pretty_print;
        }
        Ok(FountainWriter::new(writer_options).write(script))
    }
}
