//! Shared configuration loader for texcards.
//!
//! `defaults/texcards.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`TexCardsConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use texcards_engine::formats::PreviewOptions;

const DEFAULT_TOML: &str = include_str!("../defaults/texcards.default.toml");

/// Top-level configuration consumed by texcards applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TexCardsConfig {
    pub deck: DeckConfig,
    pub convert: ConvertConfig,
    pub media: MediaConfig,
    pub output: OutputConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeckConfig {
    pub base: String,
}

/// Conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub format: String,
    pub engine: Engine,
}

/// Which renderer turns card text into HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Engine {
    #[serde(rename = "chain")]
    Chain,
    #[serde(rename = "legacy")]
    Legacy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    pub dir: String,
    pub copy: bool,
}

/// Format-specific output knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub html: HtmlOutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlOutputConfig {
    pub title: String,
}

impl From<&HtmlOutputConfig> for PreviewOptions {
    fn from(config: &HtmlOutputConfig) -> Self {
        PreviewOptions::new(config.title.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TexCardsConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TexCardsConfig, ConfigError> {
    Loader::new().build()
}
