//! Format registry for format discovery and selection
//!
//! Output formats are registered under their name and looked up by the CLI either by that
//! name or by the extension of the output file.

use crate::convert::RenderedCard;
use crate::error::FormatError;
use crate::format::CardFormat;
use std::collections::HashMap;

/// Registry of card output formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let tsv = registry.serialize(&cards, "tsv")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn CardFormat>>,
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
    pub fn register<F: CardFormat + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn CardFormat, FormatError> {
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

    /// Serialize cards using the specified format
    pub fn serialize(&self, cards: &[RenderedCard], format: &str) -> Result<String, FormatError> {
        self.get(format)?.serialize(cards)
    }

    /// Serialize cards using the specified format and options
    pub fn serialize_with_options(
        &self,
        cards: &[RenderedCard],
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        self.get(format)?.serialize_with_options(cards, options)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::tsv::TsvFormat);
        registry.register(crate::formats::json::JsonFormat);
        registry.register(crate::formats::html::HtmlFormat::default());

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
