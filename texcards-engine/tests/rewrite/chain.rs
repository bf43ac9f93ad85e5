//! Rendering fragments through the full chain

use crate::common::{render, FailingResolver};
use insta::assert_snapshot;
use texcards_engine::media::ResolveError;
use texcards_engine::{LegacyRewriter, Render, RewriteChain};

// ============================================================================
// ESCAPING
// ============================================================================

#[test]
fn test_markup_is_escaped() {
    assert_snapshot!(render("<script>&</script>"), @"&lt;script&gt;&amp;&lt;/script&gt;");
}

#[test]
fn test_plain_sentence_is_unchanged() {
    let text = "Every finite group of prime order is cyclic.";
    assert_eq!(render(text), text);
}

#[test]
fn test_literal_dollar() {
    assert_snapshot!(
        render("\\$5 buys $x$"),
        @"$5 buys <anki-mathjax>x</anki-mathjax>"
    );
}

// ============================================================================
// MATH
// ============================================================================

#[test]
fn test_styling_inside_math_is_literal() {
    assert_snapshot!(
        render("$\\textbf{a} \\emph{b}$"),
        @r"<anki-mathjax>\textbf{a} \emph{b}</anki-mathjax>"
    );
}

#[test]
fn test_display_math_escapes_body() {
    assert_snapshot!(
        render("$$a<b$$"),
        @r#"<anki-mathjax block="true">a&lt;b</anki-mathjax>"#
    );
}

#[test]
fn test_equation_separates_double_braces() {
    assert_snapshot!(
        render("\\begin{equation*}x^{{2}}\\end{equation*}"),
        @r#"<anki-mathjax block="true">x^{ {2} }</anki-mathjax>"#
    );
}

#[test]
fn test_gather_becomes_gathered() {
    assert_snapshot!(
        render("\\begin{gather}a\\\\b\\end{gather}"),
        @r#"<anki-mathjax block="true">\begin{gathered}a\\b\end{gathered}</anki-mathjax>"#
    );
}

#[test]
fn test_align_becomes_aligned() {
    assert_snapshot!(
        render("\\begin{align*}a&=b\\end{align*}"),
        @r#"<anki-mathjax block="true">\begin{aligned}a&amp;=b\end{aligned}</anki-mathjax>"#
    );
}

#[test]
fn test_multiline_math_keeps_newlines() {
    let html = render("\\begin{align}\na &= b \\\\\nc &= d\n\\end{align}");
    assert_eq!(
        html,
        "<anki-mathjax block=\"true\">\\begin{aligned}\na &amp;= b \\\\\nc &amp;= d\n\\end{aligned}</anki-mathjax>"
    );
}

#[test]
fn test_math_next_to_styled_text() {
    assert_snapshot!(
        render("\\textbf{Claim:} $a<b$ holds"),
        @r#"<span class="tex-bold">Claim:</span> <anki-mathjax>a&lt;b</anki-mathjax> holds"#
    );
}

// ============================================================================
// CODE
// ============================================================================

#[test]
fn test_minted_block_renders_as_code() {
    let html = render("\\begin{minted}{rust}\nfn main() {}\n\\end{minted}");
    assert_eq!(
        html,
        "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
    );
}

#[test]
fn test_minted_body_is_escaped_once() {
    let html = render("\\begin{minted}[linenos]{c}\nif (a < b && c) {}\n\\end{minted}");
    assert!(html.contains("if (a &lt; b &amp;&amp; c) {}"));
    assert!(!html.contains("&amp;lt;"));
}

// ============================================================================
// IMAGES
// ============================================================================

#[test]
fn test_image_goes_through_resolver() {
    let mut resolver = |path: &str| Ok::<_, ResolveError>(format!("media/{path}"));
    let html = RewriteChain::standard().render(
        "see \\includegraphics[width=3cm]{fig.png} and \\cimg{b.jpg}",
        &mut resolver,
    );
    assert_eq!(
        html,
        r#"see <img src="media/fig.png" /> and <img src="media/b.jpg" />"#
    );
}

#[test]
fn test_image_reference_is_attribute_escaped() {
    let mut resolver = |_: &str| Ok::<_, ResolveError>("a\"b.png".to_string());
    let html = RewriteChain::standard().render("\\cimg{x}", &mut resolver);
    assert_eq!(html, r#"<img src="a&quot;b.png" />"#);
}

#[test]
fn test_failed_image_renders_empty() {
    let mut resolver = FailingResolver::default();
    let html = RewriteChain::standard().render(
        "before \\includegraphics{missing.png} after",
        &mut resolver,
    );
    assert_eq!(html, "before  after");
    assert_eq!(resolver.requests, vec!["missing.png"]);
}

#[test]
fn test_images_are_resolved_in_document_order() {
    let mut resolver = FailingResolver::default();
    RewriteChain::standard().render("\\cimg{a}\n\n\\cimg{b}\\cimg{c}", &mut resolver);
    assert_eq!(resolver.requests, vec!["a", "b", "c"]);
}

// ============================================================================
// STRUCTURE
// ============================================================================

#[test]
fn test_list_items_hold_math() {
    assert_snapshot!(
        render("\\begin{itemize}\n\\item $x$\n\\item plain\n\\end{itemize}"),
        @r#"<ul class="tex-itemize"><li style="display:none;"> </li><li><anki-mathjax>x</anki-mathjax> </li><li>plain </li></ul>"#
    );
}

#[test]
fn test_unclosed_environment_is_left_as_written() {
    assert_eq!(render("\\begin{center}x"), "\\begin{center}x");
}

#[test]
fn test_proof_inside_center() {
    assert_snapshot!(
        render("\\begin{center}\\begin{proof}ok\\end{proof}\\end{center}"),
        @r#"<div class="tex-center"><div class="tex-proof"><span class="tex-proof-start">Proof.</span>ok<div class="tex-proof-end"></div></div></div>"#
    );
}

#[test]
fn test_paragraph_breaks() {
    assert_eq!(render("first\nline\n\nsecond"), "first line<br>second");
}

// ============================================================================
// LEGACY ENGINE
// ============================================================================

#[test]
fn test_legacy_engine_behind_render_trait() {
    let renderer: &dyn Render = &LegacyRewriter::new();
    assert_eq!(
        renderer.render_plain("\\textbf{a} $b$"),
        "<b>a</b> <anki-mathjax>b</anki-mathjax>"
    );
}
