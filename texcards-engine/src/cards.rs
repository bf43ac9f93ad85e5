//! Card block extraction
//!
//! Inside a scope, every `cst<tag>` environment starts a card:
//!
//! ```latex
//! \begin{cstthm}{3}                 <- tag "thm", label "3"
//!   Every finite group ...          <- front
//! \end{cstthm}
//! By Lagrange's theorem ...         <- back, up to the next \begin{cst...}
//! ```
//!
//! The tag picks the annotation shown ahead of the front (`Theorem 3.`). A trailing `*`
//! drops the label (`Theorem.`). Tags outside the vocabulary still produce a card, just with
//! no annotation. Text ahead of the first block is returned separately as the preamble and
//! never becomes a card.

use crate::split::{group, split_regex};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// `\begin{cst<tag>}` + optional `{label}` or `[label]` + body + `\end{cst<tag>}`.
///
/// Groups: 1 opening tag, 2 braced label, 3 bracketed label, 4 body, 5 closing tag.
static CST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\\begin\{cst([A-Za-z]*\*?)\}(?:\{([^{}\n]*)\}|\[([^\]\n]*)\])?([\s\S]*?)\\end\{cst([A-Za-z]*\*?)\}",
    )
    .expect("card block pattern is valid")
});

/// Known card tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardKind {
    Definition,
    Theorem,
    Example,
    Exercise,
    ExtraExercise,
    Remark,
    Question,
    Corollary,
}

impl CardKind {
    pub const ALL: [CardKind; 8] = [
        CardKind::Definition,
        CardKind::Theorem,
        CardKind::Example,
        CardKind::Exercise,
        CardKind::ExtraExercise,
        CardKind::Remark,
        CardKind::Question,
        CardKind::Corollary,
    ];

    /// Look up a tag without its star, e.g. `"eexe"`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        match self {
            CardKind::Definition => "def",
            CardKind::Theorem => "thm",
            CardKind::Example => "eg",
            CardKind::Exercise => "exe",
            CardKind::ExtraExercise => "eexe",
            CardKind::Remark => "rmk",
            CardKind::Question => "qsn",
            CardKind::Corollary => "cor",
        }
    }

    /// Display name used in the annotation.
    pub fn title(self) -> &'static str {
        match self {
            CardKind::Definition => "Definition",
            CardKind::Theorem => "Theorem",
            CardKind::Example => "Example",
            CardKind::Exercise => "Exercise",
            CardKind::ExtraExercise => "Extra Exercise",
            CardKind::Remark => "Remark",
            CardKind::Question => "Question",
            CardKind::Corollary => "Corollary",
        }
    }
}

/// One `cst` environment and the text that follows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardBlock<'t> {
    /// Opening tag without the star, as written.
    pub tag: &'t str,
    pub starred: bool,
    /// `None` when the tag is not in the vocabulary.
    pub kind: Option<CardKind>,
    pub label: Option<&'t str>,
    /// Environment body up to `\end{cst..}`.
    pub front_raw: &'t str,
    /// Text after `\end{cst..}` up to the next block or the end of the scope.
    pub back_raw: &'t str,
}

impl CardBlock<'_> {
    /// Label text shown before the front, e.g. `Definition 1.`.
    ///
    /// Empty for unknown tags. Unstarred blocks without a label read like starred ones.
    pub fn label_text(&self) -> Option<String> {
        let kind = self.kind?;
        Some(match (self.starred, self.label) {
            (false, Some(label)) => format!("{} {label}.", kind.title()),
            _ => format!("{}.", kind.title()),
        })
    }

    /// HTML annotation prefixed to the rendered front.
    pub fn annotation(&self) -> String {
        match (self.kind, self.label_text()) {
            (Some(kind), Some(text)) => format!(
                r#"<span class="tex-cst tex-cst-{}">{text}</span>"#,
                kind.tag()
            ),
            _ => String::new(),
        }
    }
}

/// Result of splitting one scope's text into card blocks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extraction<'t> {
    /// Non-blank text ahead of the first block.
    pub preamble: Option<&'t str>,
    pub blocks: Vec<CardBlock<'t>>,
}

/// Split a scope's residual text into card blocks.
pub fn extract(text: &str) -> Extraction<'_> {
    let mut extraction = Extraction::default();

    for pair in split_regex(text, &CST_RE) {
        let Some(caps) = pair.head else {
            extraction.preamble = Some(pair.tail);
            continue;
        };

        let open = group(&caps, 1);
        let close = group(&caps, 5);
        if open != close {
            tracing::warn!(open, close, "card environment closed with a different tag");
        }

        let (tag, starred) = match open.strip_suffix('*') {
            Some(tag) => (tag, true),
            None => (open, false),
        };
        let kind = CardKind::from_tag(tag);
        if kind.is_none() {
            tracing::debug!(tag, "unknown card tag, emitting card without annotation");
        }

        let label = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str());

        extraction.blocks.push(CardBlock {
            tag,
            starred,
            kind,
            label,
            front_raw: group(&caps, 4),
            back_raw: pair.tail,
        });
    }

    extraction
}
