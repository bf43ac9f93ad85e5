//! Output format trait
//!
//! Every way of writing a batch of cards out (Anki import text, JSON, a preview page)
//! implements [`CardFormat`]. Formats are looked up by name through the
//! [`FormatRegistry`](crate::registry::FormatRegistry).

use crate::convert::RenderedCard;
use crate::error::FormatError;
use std::collections::HashMap;

/// Trait for card output formats
///
/// # Examples
///
/// ```ignore
/// struct CsvFormat;
///
/// impl CardFormat for CsvFormat {
///     fn name(&self) -> &str {
///         "csv"
///     }
///
///     fn serialize(&self, cards: &[RenderedCard]) -> Result<String, FormatError> {
///         Ok(cards
///             .iter()
///             .map(|card| format!("{},{}\n", card.front, card.back))
///             .collect())
///     }
/// }
/// ```
pub trait CardFormat: Send + Sync {
    /// The name of this format (e.g., "tsv", "json")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    ///
    /// Used for automatic format detection from output filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Serialize cards to text.
    fn serialize(&self, cards: &[RenderedCard]) -> Result<String, FormatError>;

    /// Serialize cards, optionally using extra parameters.
    ///
    /// The default implementation accepts no parameters and delegates to
    /// [`CardFormat::serialize`].
    fn serialize_with_options(
        &self,
        cards: &[RenderedCard],
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(cards)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}
