//! `minted` code blocks
//!
//! The block is rewritten as a fenced Markdown code block and rendered with comrak, which
//! takes care of escaping and of the `language-*` class highlighters look for.

use super::math::separate_braces;
use super::Context;
use crate::split::group;
use comrak::{markdown_to_html, Options};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `\begin{minted}[opts]{lang} .. \end{minted}`. Groups: 1 language, 2 code.
pub static MINTED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\begin\{minted\*?\}(?:\[[^\]]*\])?\{([^{}]*)\}([\s\S]*?)\\end\{minted\*?\}")
        .expect("minted pattern is valid")
});

pub fn minted(caps: &Captures<'_>, _ctx: &mut Context<'_>) -> String {
    let language = group(caps, 1).trim();
    let code = group(caps, 2).trim_matches(|c| c == '\n' || c == '\r');
    let html = markdown_to_html(&fenced(language, code), &Options::default());
    separate_braces(html.trim_end())
}

/// Markdown fence long enough that no backtick run in `code` closes it early.
fn fenced(language: &str, code: &str) -> String {
    let longest_run = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat((longest_run + 1).max(3));
    format!("{fence}{language}\n{code}\n{fence}\n")
}
