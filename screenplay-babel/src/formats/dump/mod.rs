//! Debug listing of a parsed script
//!
//! The default output is [`Script::dump`], one line per title entry, element,
//! note and boneyard:
//!
//! ```text
//! TITLEENTRY:"Title":"Brick & Steel"
//! HEADING:"EXT. BRICK'S PATIO - DAY" (1)
//! CHARACTER:"STEEL" "(O.S.)"
//! DIALOGUE:"Beer's ready!"
//! [[0]]NOTE:"check this"
//! ```
//!
//! With the `json` parameter set to `true` the script is written as pretty
//! printed JSON instead.

use crate::error::FormatError;
use crate::format::{bool_option, check_known_options, Format};
use screenplay_core::Script;
use std::collections::HashMap;

/// Serialize a script as JSON
pub fn serialize_json(script: &Script) -> Result<String, FormatError> {
    serde_json::to_string_pretty(script)
        .map_err(|e| FormatError::SerializationError(format!("JSON serialization failed: {e}")))
}

/// Format implementation for the debug listing
pub struct DumpFormat;

impl Format for DumpFormat {
    fn name(&self) -> &str {
        "dump"
    }

    fn description(&self) -> &str {
        "Element-per-line debug listing (or JSON)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["dump"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, script: &Script) -> Result<String, FormatError> {
        Ok(script.dump())
    }

    fn serialize_with_options(
        &self,
        script: &Script,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_known_options(self.name(), options, &["json"])?;
        if bool_option(options, "json")?.unwrap_or(false) {
            serialize_json(script)
        } else {
            self.serialize(script)
        }
    }
}
