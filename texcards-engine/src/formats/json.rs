//! JSON output
//!
//! A pretty-printed array of `{ "name", "front", "back" }` objects, in document order.

use crate::convert::RenderedCard;
use crate::error::FormatError;
use crate::format::CardFormat;

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormat;

impl CardFormat for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON array of cards"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn serialize(&self, cards: &[RenderedCard]) -> Result<String, FormatError> {
        serde_json::to_string_pretty(cards)
            .map_err(|e| FormatError::SerializationError(format!("JSON encoding failed: {e}")))
    }
}
