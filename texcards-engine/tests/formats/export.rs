//! Export tests for the output formats

use std::collections::HashMap;
use texcards_engine::format::CardFormat;
use texcards_engine::formats::{HtmlFormat, JsonFormat, PreviewOptions, TsvFormat};
use texcards_engine::{FormatError, FormatRegistry, RenderedCard};

use crate::common::convert;

fn sample_cards() -> Vec<RenderedCard> {
    convert(
        "\\section{Groups}\n\
         \\begin{cstdef}{1}A \\textbf{group} is a set $G$\\end{cstdef}with an operation.\n\
         \\subsection{Cosets}\n\
         \\begin{cstthm*}Lagrange\\end{cstthm*}\\begin{minted}{python}\nprint(1)\n\\end{minted}",
    )
}

// ============================================================================
// TSV
// ============================================================================

#[test]
fn test_tsv_headers_and_rows() {
    let tsv = TsvFormat.serialize(&sample_cards()).unwrap();
    let lines: Vec<&str> = tsv.lines().collect();

    assert_eq!(lines[0], "#separator:tab");
    assert_eq!(lines[1], "#html:true");
    assert_eq!(lines[2], "#deck column:3");
    assert_eq!(
        lines[3],
        "<span class=\"tex-cst tex-cst-def\">Definition 1.</span>\
         A <span class=\"tex-bold\">group</span> is a set <anki-mathjax>G</anki-mathjax>\t\
         with an operation.\t1. Groups"
    );
}

#[test]
fn test_tsv_quotes_multiline_fields() {
    let tsv = TsvFormat.serialize(&sample_cards()).unwrap();
    let last_row = tsv.split_once("1. Groups\n").unwrap().1;
    assert_eq!(
        last_row,
        "<span class=\"tex-cst tex-cst-thm\">Theorem.</span>Lagrange\t\
         \"<pre><code class=\"\"language-python\"\">print(1)\n</code></pre>\"\t\
         1. Groups::1. Cosets\n"
    );
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_json_round_trips() {
    let cards = sample_cards();
    let json = JsonFormat.serialize(&cards).unwrap();
    let parsed: Vec<RenderedCard> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, cards);
    assert!(json.contains("\"name\": \"1. Groups::1. Cosets\""));
}

// ============================================================================
// HTML
// ============================================================================

#[test]
fn test_html_preview_groups_by_deck() {
    let html = HtmlFormat::default().serialize(&sample_cards()).unwrap();

    assert!(html.contains("<title>Flashcards</title>"));
    assert!(html.contains("<h2>1. Groups</h2>"));
    assert!(html.contains("<h2>1. Groups::1. Cosets</h2>"));
    assert!(html.contains("MathJax-script"));
    assert_eq!(html.matches("<article class=\"tc-card\">").count(), 2);
}

#[test]
fn test_html_title_option() {
    let format = HtmlFormat::new(PreviewOptions::new("Algebra"));
    let mut options = HashMap::new();
    options.insert("title".to_string(), "Groups <1>".to_string());

    let html = format
        .serialize_with_options(&sample_cards(), &options)
        .unwrap();
    assert!(html.contains("<title>Groups &lt;1&gt;</title>"));
}

#[test]
fn test_html_rejects_unknown_option() {
    let mut options = HashMap::new();
    options.insert("theme".to_string(), "dark".to_string());
    let result = HtmlFormat::default().serialize_with_options(&[], &options);
    assert!(matches!(result, Err(FormatError::NotSupported(_))));
}

// ============================================================================
// REGISTRY
// ============================================================================

#[test]
fn test_registry_serializes_by_name() {
    let registry = FormatRegistry::default();
    let cards = sample_cards();
    assert_eq!(
        registry.serialize(&cards, "tsv").unwrap(),
        TsvFormat.serialize(&cards).unwrap()
    );
    assert!(matches!(
        registry.serialize(&cards, "apkg"),
        Err(FormatError::FormatNotFound(_))
    ));
}
