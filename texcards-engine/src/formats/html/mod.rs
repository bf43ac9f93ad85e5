//! HTML preview
//!
//! A single self-contained page that shows every card the way a reviewer would see it: the
//! front, a rule, and the back, grouped under the deck each card belongs to. Card fields are
//! inserted as they are, since they already are HTML.
//!
//! # Math
//!
//! Cards carry math as `<anki-mathjax>` elements. A small script embedded in the page turns
//! each into a `\( .. \)` or `\[ .. \]` span before MathJax typesets the page.
//!
//! # Options
//!
//! | option  | effect               |
//! |---------|----------------------|
//! | `title` | page `<title>` / h1  |

mod serializer;

use crate::convert::RenderedCard;
use crate::error::FormatError;
use crate::format::CardFormat;
use std::collections::HashMap;

pub use serializer::serialize_to_html;

/// Options for the preview page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOptions {
    pub title: String,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            title: "Flashcards".to_string(),
        }
    }
}

impl PreviewOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Format implementation for the preview page
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    options: PreviewOptions,
}

impl HtmlFormat {
    pub fn new(options: PreviewOptions) -> Self {
        Self { options }
    }
}

impl CardFormat for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Standalone HTML preview with MathJax"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn serialize(&self, cards: &[RenderedCard]) -> Result<String, FormatError> {
        serialize_to_html(cards, &self.options)
    }

    fn serialize_with_options(
        &self,
        cards: &[RenderedCard],
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut preview = self.options.clone();
        for (key, value) in options {
            match key.as_str() {
                "title" => preview.title = value.clone(),
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'html' does not accept option '{other}'"
                    )))
                }
            }
        }
        serialize_to_html(cards, &preview)
    }
}
