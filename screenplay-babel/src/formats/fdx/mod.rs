//! Final Draft interchange format
//!
//! The reader never fails: malformed or foreign XML becomes an empty script,
//! with a warning logged through `tracing`.

use crate::error::FormatError;
use crate::format::Format;
use screenplay_core::Script;

pub mod parser;
pub mod serializer;

pub use parser::read_script;
pub use serializer::write_script;

pub struct FdxFormat;

impl Format for FdxFormat {
    fn name(&self) -> &str {
        "fdx"
    }

    fn description(&self) -> &str {
        "Final Draft XML"
    }

    fn file_extensions(&self) -> &[&str] {
        &["fdx"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Script, FormatError> {
        Ok(read_script(source))
    }

    fn serialize(&self, script: &Script) -> Result<String, FormatError> {
        Ok(write_script(script))
    }
}
