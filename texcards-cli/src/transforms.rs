//! CLI-specific transforms
//!
//! `texcards inspect` runs one of these over a document to show how it is read, without
//! writing any cards out.
//!
//! ## Transforms
//!
//! - `scope-tree`: the section hierarchy, one scope per line, with its card count
//! - `scope-json`: the same tree as JSON, residual text included
//! - `cards-raw`: every card block as extracted, before rendering
//! - `cards-json`: the rendered cards, exactly as `convert --to json` would write them
//!
//! ## Extra Parameters
//!
//! Transforms can accept extra parameters via `--extra-<name> [value]`:
//!
//! - `legacy`: "true" renders `cards-json` with the line-oriented legacy engine
//! - `deck`: base deck prefixed to every card name in `cards-json`
//!
//! Example: `texcards inspect notes.tex cards-json --extra-legacy`

use std::collections::HashMap;
use texcards_engine::cards::extract;
use texcards_engine::media::IdentityResolver;
use texcards_engine::sections::ScopeNode;
use texcards_engine::{Converter, LegacyRewriter, Render, RenderedCard, RewriteChain};

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["scope-tree", "scope-json", "cards-json", "cards-raw"];

/// Transform used when `inspect` is given none.
pub const DEFAULT_TRANSFORM: &str = "scope-tree";

/// Execute a named transform on a document with optional extra parameters
///
/// Images are never resolved here; `cards-json` keeps every path as written.
///
/// # Examples
///
/// ```ignore
/// let output = execute_transform(source, "scope-tree", &HashMap::new())?;
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    match transform_name {
        "scope-tree" => {
            let tree = ScopeNode::build(source);
            let mut output = String::new();
            render_scope_tree(&tree, 0, &mut output);
            Ok(output)
        }
        "scope-json" => serde_json::to_string_pretty(&ScopeNode::build(source))
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "cards-raw" => serde_json::to_string_pretty(&raw_cards_to_json(source))
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "cards-json" => {
            let deck = extra_params.get("deck").map(String::as_str).unwrap_or("");
            let cards = if is_true(extra_params.get("legacy")) {
                render_cards(Converter::with_renderer(LegacyRewriter::new()), deck, source)
            } else {
                render_cards(Converter::<RewriteChain>::new(), deck, source)
            };
            serde_json::to_string_pretty(&cards)
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        _ => Err(format!(
            "Unknown transform: {transform_name}. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

fn is_true(value: Option<&String>) -> bool {
    matches!(value.map(String::as_str), Some("true" | "1" | "yes"))
}

fn render_cards<R: Render>(converter: Converter<R>, deck: &str, source: &str) -> Vec<RenderedCard> {
    converter
        .with_base_deck(deck)
        .convert_to_vec(source, &mut IdentityResolver)
}

fn render_scope_tree(node: &ScopeNode<'_>, depth: usize, output: &mut String) {
    let cards = node.residual.map_or(0, |text| extract(text).blocks.len());
    let label = node.segment().unwrap_or_else(|| "(document)".to_string());
    output.push_str(&"  ".repeat(depth));
    output.push_str(&format!("{label} [{}] {cards} card", node.kind.as_str()));
    if cards != 1 {
        output.push('s');
    }
    output.push('\n');
    for child in &node.children {
        render_scope_tree(child, depth + 1, output);
    }
}

/// Card blocks with the scope that owns them, before any rendering.
fn raw_cards_to_json(source: &str) -> serde_json::Value {
    use serde_json::json;

    let tree = ScopeNode::build(source);
    let mut cards = Vec::new();
    tree.walk("", &mut |scope, text| {
        for block in extract(text).blocks {
            cards.push(json!({
                "scope": scope,
                "tag": block.tag,
                "starred": block.starred,
                "kind": block.kind,
                "label": block.label,
                "front": block.front_raw,
                "back": block.back_raw,
            }));
        }
    });
    serde_json::Value::Array(cards)
}
