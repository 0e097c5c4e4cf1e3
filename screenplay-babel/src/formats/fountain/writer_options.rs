use serde::{Deserialize, Serialize};

/// Configuration for the Fountain writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    /// Indent cues, parentheticals, dialogue and transitions with tabs
    pub pretty_print: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self { pretty_print: true }
    }
}
