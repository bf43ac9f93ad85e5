//! Preview page assembly

use super::PreviewOptions;
use crate::convert::RenderedCard;
use crate::error::FormatError;
use html_escape::encode_text;

const PREVIEW_CSS: &str = include_str!("../../../assets/preview.css");
const PREVIEW_JS: &str = include_str!("../../../assets/preview.js");
const MATHJAX_URL: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-chtml.js";

/// Render the whole preview page
pub fn serialize_to_html(
    cards: &[RenderedCard],
    options: &PreviewOptions,
) -> Result<String, FormatError> {
    let title = encode_text(&options.title);
    let mut body = String::new();

    for (deck, group) in group_by_deck(cards) {
        let heading = if deck.is_empty() { "(top level)" } else { deck };
        body.push_str(&format!(
            "<section class=\"tc-deck\">\n<h2>{}</h2>\n",
            encode_text(heading)
        ));
        for card in group {
            body.push_str(&format!(
                "<article class=\"tc-card\">\n<div class=\"tc-front\">{}</div>\n<hr>\n<div class=\"tc-back\">{}</div>\n</article>\n",
                card.front, card.back
            ));
        }
        body.push_str("</section>\n");
    }

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="texcards">
  <title>{title}</title>
  <style>
{PREVIEW_CSS}
  </style>
  <script>
{PREVIEW_JS}
  </script>
  <script id="MathJax-script" async src="{MATHJAX_URL}"></script>
</head>
<body>
<h1>{title}</h1>
<p class="tc-count">{count} cards</p>
{body}</body>
</html>
"#,
        count = cards.len()
    ))
}

/// Cards grouped by deck, decks in order of first appearance.
fn group_by_deck(cards: &[RenderedCard]) -> Vec<(&str, Vec<&RenderedCard>)> {
    let mut groups: Vec<(&str, Vec<&RenderedCard>)> = Vec::new();
    for card in cards {
        match groups.iter_mut().find(|(deck, _)| *deck == card.name) {
            Some((_, group)) => group.push(card),
            None => groups.push((card.name.as_str(), vec![card])),
        }
    }
    groups
}
