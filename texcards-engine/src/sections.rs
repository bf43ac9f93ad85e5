//! Section tree
//!
//! A document is split into scopes by its sectioning commands, one level at a time:
//!
//! | Scope          | Children split by     |
//! |----------------|-----------------------|
//! | File           | `\section{..}`        |
//! | Section        | `\subsection{..}`     |
//! | Subsection     | `\subsubsection{..}`  |
//! | Subsubsection  | (leaf)                |
//!
//! Text before the first heading of a level stays with the enclosing scope as its residual
//! text; everything after a heading up to the next sibling heading becomes that child's data.
//! Starred headings (`\section*{..}`) are treated the same as unstarred ones.
//!
//! Titled scopes are numbered per sibling group, and a scope's qualified name joins every
//! numbered title on the path with `::`, e.g. `1. Groups::2. Cosets`. The file scope has no
//! title and contributes nothing to the name.

use crate::split::split_titles;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Separator between the segments of a qualified scope name.
pub const SCOPE_SEPARATOR: &str = "::";

static SECTION_RE: Lazy<Regex> = Lazy::new(|| heading_regex("section"));
static SUBSECTION_RE: Lazy<Regex> = Lazy::new(|| heading_regex("subsection"));
static SUBSUBSECTION_RE: Lazy<Regex> = Lazy::new(|| heading_regex("subsubsection"));

/// Line-leading `\<command>{title}` or `\<command>*{title}`. The title may hold one level
/// of nested braces, e.g. `\section{The $\mathbb{R}$ line}`.
fn heading_regex(command: &str) -> Regex {
    let pattern = format!(r"(?m)^[ \t]*\\{command}\*?\{{((?:[^{{}}\n]|\{{[^{{}}\n]*\}})*)\}}");
    Regex::new(&pattern).expect("heading pattern is valid")
}

/// Nesting level of a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    File,
    Section,
    Subsection,
    Subsubsection,
}

impl ScopeKind {
    /// The kind of scope one level deeper, if any.
    pub fn child(self) -> Option<ScopeKind> {
        match self {
            ScopeKind::File => Some(ScopeKind::Section),
            ScopeKind::Section => Some(ScopeKind::Subsection),
            ScopeKind::Subsection => Some(ScopeKind::Subsubsection),
            ScopeKind::Subsubsection => None,
        }
    }

    /// Pattern that splits this scope's data into children.
    fn heading(self) -> Option<&'static Regex> {
        match self {
            ScopeKind::File => Some(&*SECTION_RE),
            ScopeKind::Section => Some(&*SUBSECTION_RE),
            ScopeKind::Subsection => Some(&*SUBSUBSECTION_RE),
            ScopeKind::Subsubsection => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScopeKind::File => "file",
            ScopeKind::Section => "section",
            ScopeKind::Subsection => "subsection",
            ScopeKind::Subsubsection => "subsubsection",
        }
    }
}

/// One scope of the document and everything below it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScopeNode<'t> {
    pub kind: ScopeKind,
    /// Heading text as written; empty for the file scope.
    pub title: &'t str,
    /// 1-based position among titled siblings; `None` for the file scope.
    pub ordinal: Option<usize>,
    /// Text owned directly by this scope, ahead of any child heading.
    pub residual: Option<&'t str>,
    pub children: Vec<ScopeNode<'t>>,
}

impl<'t> ScopeNode<'t> {
    /// Build the scope tree of a whole document.
    pub fn build(text: &'t str) -> Self {
        Self::parse(ScopeKind::File, "", None, text)
    }

    fn parse(kind: ScopeKind, title: &'t str, ordinal: Option<usize>, data: &'t str) -> Self {
        let mut node = ScopeNode {
            kind,
            title,
            ordinal,
            residual: None,
            children: Vec::new(),
        };

        let (Some(regex), Some(child_kind)) = (kind.heading(), kind.child()) else {
            node.residual = Some(data);
            return node;
        };

        let mut count = 0;
        for pair in split_titles(data, regex) {
            match pair.head {
                None => node.residual = Some(pair.tail),
                Some(child_title) => {
                    count += 1;
                    node.children.push(Self::parse(
                        child_kind,
                        child_title.trim(),
                        Some(count),
                        pair.tail,
                    ));
                }
            }
        }

        node
    }

    /// This scope's own name segment, `"N. Title"`, or `None` for the file scope.
    pub fn segment(&self) -> Option<String> {
        self.ordinal.map(|n| format!("{n}. {}", self.title))
    }

    /// Qualified name of this scope below `parent`.
    pub fn qualified_name(&self, parent: &str) -> String {
        match self.segment() {
            Some(segment) => join_scope(parent, &segment),
            None => parent.to_string(),
        }
    }

    /// Visit every scope's residual text depth-first in document order.
    ///
    /// `visit` receives the qualified name of the scope that owns the text. A scope's
    /// residual comes before its children because it precedes them in the source.
    pub fn walk<F>(&self, parent: &str, visit: &mut F)
    where
        F: FnMut(&str, &'t str),
    {
        let name = self.qualified_name(parent);
        if let Some(residual) = self.residual {
            visit(&name, residual);
        }
        for child in &self.children {
            child.walk(&name, visit);
        }
    }

    /// Flattened `(qualified name, residual text)` list in traversal order.
    pub fn scopes(&self) -> Vec<(String, &'t str)> {
        let mut scopes = Vec::new();
        self.walk("", &mut |name, text| scopes.push((name.to_string(), text)));
        scopes
    }

    /// Number of scopes in this subtree, this one included.
    pub fn scope_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ScopeNode::scope_count)
            .sum::<usize>()
    }
}

/// Join a parent name and a segment with [`SCOPE_SEPARATOR`]; empty parts vanish.
pub fn join_scope(parent: &str, segment: &str) -> String {
    match (parent.is_empty(), segment.is_empty()) {
        (true, _) => segment.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{parent}{SCOPE_SEPARATOR}{segment}"),
    }
}
