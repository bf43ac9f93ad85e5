//! LaTeX study notes to flashcards
//!
//!     This crate turns a LaTeX document annotated with `cst*` card environments into
//!     front/back pairs of HTML that MathJax (as shipped by Anki) can display.
//!
//!     This is a pure lib, that is, it powers the texcards cli but is shell agnostic: no code
//!     here reads files chosen by the user, prints, or looks at env vars. The two places where
//!     the outside world leaks in are modelled as traits the host implements:
//!         - [`convert::CardSink`]: receives every rendered card, in document order.
//!         - [`media::ResourceResolver`]: turns an image path into something an `<img>` can use.
//!
//! Architecture
//!
//!     The conversion is a short pipeline, leaves first:
//!
//!     .
//!     ├── split.rs              # RegionSplitter: text → (match, tail) pairs
//!     ├── sections.rs           # SectionTree: section/subsection/subsubsection scopes
//!     ├── cards.rs              # CardBlockExtractor: cst environments → typed blocks
//!     ├── rewrite               # RewriteChain: LaTeX → HTML passes
//!     │   ├── placeholder.rs    # region protection tokens
//!     │   ├── math.rs           # math assemblers
//!     │   ├── code.rs           # minted → fenced code → HTML
//!     │   ├── image.rs          # includegraphics/cimg through the resolver
//!     │   └── baseline.rs       # unprotected styling, lists, escaping, line breaks
//!     ├── legacy.rs             # line-oriented rewriter kept for output compatibility
//!     ├── convert.rs            # the whole document → sink pipeline
//!     ├── media.rs              # resolver trait and filesystem resolvers
//!     ├── format.rs             # CardFormat trait (tsv, json, html output)
//!     ├── registry.rs           # FormatRegistry for discovery and selection
//!     └── formats
//!
//! Core Algorithms
//!
//!     The hard part is the rewrite chain. LaTeX math and code must reach the output untouched
//!     while the prose around them gets escaped and styled. Each protected pass swaps its
//!     matches for opaque placeholders, lets the rest of the chain run over the shielded text,
//!     and only then puts its own rendering of the original match back. Passes nest in a fixed
//!     order (see [`rewrite`]), so the innermost unprotected baseline never sees a math body.
//!
//!     Everything is fail-open: a heading with unbalanced braces is not split, an unknown card
//!     tag gets no label, an image that cannot be resolved renders as nothing. A document
//!     always produces whatever cards can be recovered from it.
//!
pub mod cards;
pub mod convert;
pub mod error;
pub mod format;
pub mod formats;
pub mod legacy;
pub mod media;
pub mod registry;
pub mod rewrite;
pub mod sections;
pub mod split;

pub use convert::{CardSink, Converter, RenderedCard};
pub use error::FormatError;
pub use format::CardFormat;
pub use legacy::LegacyRewriter;
pub use media::{ResolveError, ResourceResolver};
pub use registry::FormatRegistry;
pub use rewrite::{Render, RewriteChain};

/// Converts a document with the standard rewrite chain and collects the cards.
///
/// Images are resolved with `resolver`; pass [`media::IdentityResolver`] to keep
/// paths as written.
pub fn convert_document(
    document: &str,
    resolver: &mut dyn ResourceResolver,
) -> Vec<RenderedCard> {
    Converter::new().convert_to_vec(document, resolver)
}
