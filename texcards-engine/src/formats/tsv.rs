//! Anki text import
//!
//! Tab separated, one card per row: front, back, deck. The header lines tell the importer
//! that fields hold HTML and that the third column names the deck, so a single file can fill
//! a whole deck tree.
//!
//! A field that contains a tab, a newline, or a double quote is wrapped in double quotes with
//! inner quotes doubled.

use crate::convert::RenderedCard;
use crate::error::FormatError;
use crate::format::CardFormat;

const HEADER: &str = "#separator:tab\n#html:true\n#deck column:3\n";

#[derive(Debug, Default, Clone, Copy)]
pub struct TsvFormat;

impl CardFormat for TsvFormat {
    fn name(&self) -> &str {
        "tsv"
    }

    fn description(&self) -> &str {
        "Anki tab separated import file"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tsv", "txt"]
    }

    fn serialize(&self, cards: &[RenderedCard]) -> Result<String, FormatError> {
        let mut out = String::from(HEADER);
        for card in cards {
            out.push_str(&field(&card.front));
            out.push('\t');
            out.push_str(&field(&card.back));
            out.push('\t');
            out.push_str(&field(&card.name));
            out.push('\n');
        }
        Ok(out)
    }
}

fn field(value: &str) -> String {
    if value.contains(['\t', '\n', '\r', '"']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
