//! Property tests for the rewrite chain

use proptest::prelude::*;
use texcards_engine::{Render, RewriteChain};

proptest! {
    #[test]
    fn plain_text_renders_unchanged(text in "[A-Za-z0-9 .,;:!?()'-]{0,80}") {
        prop_assert_eq!(RewriteChain::standard().render_plain(&text), text);
    }

    // Without `$` and a lowercase `g` no math, image, or `\begin` can form, so no protected
    // pass ever matches.
    #[test]
    fn unprotected_text_matches_baseline(text in "[A-Za-fh-z0-9 .,\n{}\\\\&<>`-]{0,80}") {
        prop_assert_eq!(
            RewriteChain::standard().render_plain(&text),
            RewriteChain::baseline().render_plain(&text)
        );
    }

    #[test]
    fn styling_inside_math_is_kept(body in "[a-z ]{1,20}") {
        let raw = format!("$\\textbf{{{body}}}$");
        prop_assert_eq!(
            RewriteChain::standard().render_plain(&raw),
            format!("<anki-mathjax>\\textbf{{{body}}}</anki-mathjax>")
        );
    }

    #[test]
    fn rendering_never_panics(text in "\\PC{0,120}") {
        let _ = RewriteChain::standard().render_plain(&text);
    }
}
