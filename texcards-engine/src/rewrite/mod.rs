//! The rewrite chain
//!
//!     Raw card text goes through a fixed list of passes, outer to inner:
//!
//!     | #  | pass           | kind        | output                                  |
//!     |----|----------------|-------------|-----------------------------------------|
//!     | 0  | literal-dollar | protected   | `$`                                     |
//!     | 1  | display-math   | protected   | `<anki-mathjax block="true">`           |
//!     | 2  | inline-math    | protected   | `<anki-mathjax>`                        |
//!     | 3  | equation       | protected   | block math                              |
//!     | 4  | gather         | protected   | block math, `gathered`                  |
//!     | 5  | align          | protected   | block math, `aligned`                   |
//!     | 6  | minted         | protected   | `<pre><code>` via Markdown              |
//!     | 7  | image          | protected   | `<img>` via the resolver                |
//!     | 8+ | baseline steps | unprotected | escaping, styling, lists, line breaks   |
//!
//!     A protected pass swaps each of its matches for a placeholder token, hands the shielded
//!     text to the next pass, and once that returns puts its own rendering of each original
//!     match back. Whatever a protected pass matched is therefore invisible to every pass
//!     below it. An unprotected pass rewrites the text and hands it on.
//!
//!     Because the outer passes claim their regions first, a `$` inside a minted block is
//!     taken as math, and `\$` inside math comes out as a bare `$`.
//!
//! The chain is data: [`RewriteChain::standard`] builds the table above, and tests build
//! smaller chains with [`RewriteChain::baseline`] or [`RewriteChain::from_passes`].

pub mod baseline;
pub mod code;
pub mod image;
pub mod math;
pub mod placeholder;

use crate::media::{IdentityResolver, ResourceResolver};
use once_cell::sync::Lazy;
use placeholder::PlaceholderTable;
use regex::{Captures, Regex};

/// Turns raw LaTeX card text into HTML.
pub trait Render {
    fn render(&self, raw: &str, resolver: &mut dyn ResourceResolver) -> String;

    /// Render with image paths kept as written.
    fn render_plain(&self, raw: &str) -> String {
        self.render(raw, &mut IdentityResolver)
    }
}

/// State shared by the assemblers of one render call.
pub struct Context<'r> {
    pub resolver: &'r mut dyn ResourceResolver,
}

/// Builds the replacement for one protected match.
pub type Assembler = fn(&Captures<'_>, &mut Context<'_>) -> String;

/// One entry of the chain.
#[derive(Clone, Copy)]
pub enum Pass {
    Protected {
        name: &'static str,
        regex: &'static Lazy<Regex>,
        assemble: Assembler,
    },
    Unprotected {
        name: &'static str,
        rewrite: fn(&str) -> String,
    },
}

impl Pass {
    pub fn name(&self) -> &'static str {
        match self {
            Pass::Protected { name, .. } | Pass::Unprotected { name, .. } => *name,
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Pass::Protected { .. })
    }
}

impl std::fmt::Debug for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_protected() {
            "protected"
        } else {
            "unprotected"
        };
        write!(f, "{} ({kind})", self.name())
    }
}

fn protected_passes() -> [Pass; 8] {
    [
        Pass::Protected {
            name: "literal-dollar",
            regex: &math::LITERAL_DOLLAR_RE,
            assemble: math::literal_dollar,
        },
        Pass::Protected {
            name: "display-math",
            regex: &math::DISPLAY_RE,
            assemble: math::display,
        },
        Pass::Protected {
            name: "inline-math",
            regex: &math::INLINE_RE,
            assemble: math::inline,
        },
        Pass::Protected {
            name: "equation",
            regex: &math::EQUATION_RE,
            assemble: math::equation,
        },
        Pass::Protected {
            name: "gather",
            regex: &math::GATHER_RE,
            assemble: math::gather,
        },
        Pass::Protected {
            name: "align",
            regex: &math::ALIGN_RE,
            assemble: math::align,
        },
        Pass::Protected {
            name: "minted",
            regex: &code::MINTED_RE,
            assemble: code::minted,
        },
        Pass::Protected {
            name: "image",
            regex: &image::IMAGE_RE,
            assemble: image::image,
        },
    ]
}

/// Ordered protected and unprotected passes.
#[derive(Debug, Clone)]
pub struct RewriteChain {
    passes: Vec<Pass>,
}

impl RewriteChain {
    /// The full chain used for cards.
    pub fn standard() -> Self {
        let mut passes = protected_passes().to_vec();
        passes.extend(baseline_passes());
        Self { passes }
    }

    /// The unprotected steps alone.
    pub fn baseline() -> Self {
        Self {
            passes: baseline_passes().collect(),
        }
    }

    pub fn from_passes(passes: Vec<Pass>) -> Self {
        Self { passes }
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.passes.iter().map(Pass::name).collect()
    }

    fn apply(&self, index: usize, text: &str, ctx: &mut Context<'_>) -> String {
        let Some(pass) = self.passes.get(index) else {
            return text.to_string();
        };

        match *pass {
            Pass::Unprotected { rewrite, .. } => self.apply(index + 1, &rewrite(text), ctx),
            Pass::Protected {
                regex, assemble, ..
            } => {
                let mut table = PlaceholderTable::new(index);
                let shielded = shield(text, regex, &mut table);
                if table.is_empty() {
                    return self.apply(index + 1, text, ctx);
                }
                let inner = self.apply(index + 1, &shielded, ctx);
                table.drain(&inner, |caps| assemble(caps, ctx))
            }
        }
    }
}

impl Default for RewriteChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl Render for RewriteChain {
    fn render(&self, raw: &str, resolver: &mut dyn ResourceResolver) -> String {
        let mut ctx = Context { resolver };
        self.apply(0, raw, &mut ctx)
    }
}

fn baseline_passes() -> impl Iterator<Item = Pass> {
    baseline::STEPS
        .into_iter()
        .map(|(name, rewrite)| Pass::Unprotected { name, rewrite })
}

/// Replace every match of `regex` with a token from `table`.
fn shield<'t>(text: &'t str, regex: &Regex, table: &mut PlaceholderTable<'t>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in regex.captures_iter(text) {
        let whole = caps.get_match();
        out.push_str(&text[last..whole.start()]);
        last = whole.end();
        out.push_str(&table.insert(caps));
    }
    out.push_str(&text[last..]);
    out
}
