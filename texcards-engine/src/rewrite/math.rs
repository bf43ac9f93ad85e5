//! Math passes
//!
//! Math bodies are handed to MathJax as written. The only changes are HTML escaping and a
//! space between doubled braces, since `{{` and `}}` would otherwise be read as cloze
//! delimiters by the card host.

use super::Context;
use crate::split::group;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub static LITERAL_DOLLAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\$").expect("literal dollar pattern is valid"));

pub static DISPLAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\$([\s\S]*?)\$\$").expect("display math pattern is valid"));

pub static INLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([\s\S]*?)\$").expect("inline math pattern is valid"));

pub static EQUATION_RE: Lazy<Regex> = Lazy::new(|| environment_regex("equation"));
pub static GATHER_RE: Lazy<Regex> = Lazy::new(|| environment_regex("gather"));
pub static ALIGN_RE: Lazy<Regex> = Lazy::new(|| environment_regex("align"));

/// `\begin{name}..\end{name}`, starred or not, shortest body.
fn environment_regex(name: &str) -> Regex {
    let pattern = format!(r"\\begin\{{{name}\*?\}}([\s\S]*?)\\end\{{{name}\*?\}}");
    Regex::new(&pattern).expect("math environment pattern is valid")
}

pub fn literal_dollar(_caps: &Captures<'_>, _ctx: &mut Context<'_>) -> String {
    "$".to_string()
}

pub fn inline(caps: &Captures<'_>, _ctx: &mut Context<'_>) -> String {
    mathjax(group(caps, 1), false)
}

pub fn display(caps: &Captures<'_>, _ctx: &mut Context<'_>) -> String {
    mathjax(group(caps, 1), true)
}

pub fn equation(caps: &Captures<'_>, _ctx: &mut Context<'_>) -> String {
    mathjax(group(caps, 1), true)
}

pub fn gather(caps: &Captures<'_>, _ctx: &mut Context<'_>) -> String {
    let body = format!("\\begin{{gathered}}{}\\end{{gathered}}", group(caps, 1));
    mathjax(&body, true)
}

pub fn align(caps: &Captures<'_>, _ctx: &mut Context<'_>) -> String {
    let body = format!("\\begin{{aligned}}{}\\end{{aligned}}", group(caps, 1));
    mathjax(&body, true)
}

/// Wrap a math body in the tag MathJax picks up.
pub fn mathjax(body: &str, block: bool) -> String {
    let body = escape_math(body);
    if block {
        format!(r#"<anki-mathjax block="true">{body}</anki-mathjax>"#)
    } else {
        format!("<anki-mathjax>{body}</anki-mathjax>")
    }
}

/// HTML-escape a math body and pull doubled braces apart.
pub fn escape_math(body: &str) -> String {
    separate_braces(&html_escape::encode_text(body))
}

/// Insert a space between two adjacent identical braces: `}}}` becomes `} } }`.
pub fn separate_braces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev = None;
    for ch in text.chars() {
        if matches!(ch, '{' | '}') && prev == Some(ch) {
            out.push(' ');
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}
