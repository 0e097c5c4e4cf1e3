//! Shared configuration loader for the screenplay tools.
//!
//! `defaults/screenplay.default.toml` is embedded into every build so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`ScreenplayConfig`]. Each section converts into the option struct of the
//! crate that consumes it.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use screenplay_babel::formats::fountain::WriterOptions;
use screenplay_babel::formats::html::HtmlTheme;
use screenplay_core::{CallbackOptions, ParserOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/screenplay.default.toml");

/// Top-level configuration consumed by screenplay applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenplayConfig {
    pub parser: ParserConfig,
    pub writer: WriterConfig,
    pub callbacks: CallbacksConfig,
    pub convert: ConvertConfig,
}

impl ScreenplayConfig {
    pub fn parser_options(&self) -> ParserOptions {
        (&self.parser).into()
    }

    pub fn writer_options(&self) -> WriterOptions {
        (&self.writer).into()
    }

    /// Callback options; tag extraction follows the parser section.
    pub fn callback_options(&self) -> CallbackOptions {
        CallbackOptions {
            ignore_blanks: self.callbacks.ignore_blanks,
            use_tags: self.parser.use_tags,
        }
    }
}

/// Mirrors the knobs exposed by the incremental parser.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub merge_actions: bool,
    pub merge_dialogue: bool,
    pub use_tags: bool,
}

impl From<ParserConfig> for ParserOptions {
    fn from(config: ParserConfig) -> Self {
        (&config).into()
    }
}

impl From<&ParserConfig> for ParserOptions {
    fn from(config: &ParserConfig) -> Self {
        ParserOptions {
            merge_actions: config.merge_actions,
            merge_dialogue: config.merge_dialogue,
            use_tags: config.use_tags,
        }
    }
}

/// Mirrors the knobs exposed by the Fountain writer.
#[derive(Debug, Clone, Deserialize)]
pub struct WriterConfig {
    pub pretty_print: bool,
}

impl From<WriterConfig> for WriterOptions {
    fn from(config: WriterConfig) -> Self {
        (&config).into()
    }
}

impl From<&WriterConfig> for WriterOptions {
    fn from(config: &WriterConfig) -> Self {
        WriterOptions {
            pretty_print: config.pretty_print,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbacksConfig {
    pub ignore_blanks: bool,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub theme: HtmlTheme,
}

impl From<&HtmlConfig> for HtmlTheme {
    fn from(config: &HtmlConfig) -> Self {
        config.theme
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer TOML text, e.g. a project file the caller has already read.
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ScreenplayConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ScreenplayConfig, ConfigError> {
    Loader::new().build()
}
