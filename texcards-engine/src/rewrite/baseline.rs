//! Unprotected baseline
//!
//! The innermost passes. They see prose only: every math, code, and image region has
//! already been swapped for a placeholder by the time these run. Steps apply in table order;
//! escaping comes first so the tags the later steps emit are never escaped themselves.
//!
//! Commands and environments are matched with a brace or `\begin`/`\end` counter rather than
//! a regex, so nesting works. An opening without its closing partner is left as written.

use super::math::separate_braces;
use once_cell::sync::Lazy;
use regex::Regex;

/// A named text-to-text step.
pub type Step = (&'static str, fn(&str) -> String);

pub const STEPS: [Step; 9] = [
    ("escape", escape),
    ("color", strip_color),
    ("blocks", blocks),
    ("styling", styling),
    ("lists", lists),
    ("items", items),
    ("page-breaks", strip_page_breaks),
    ("braces", separate_braces),
    ("line-breaks", line_breaks),
];

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\color\{[^{}]*\}").expect("color pattern is valid"));
static ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\item\b[ \t]*").expect("item pattern is valid"));
static PAGE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(?:pagebreak|newpage)\b").expect("page break pattern is valid"));
static PARAGRAPH_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t]*\r?\n[ \t]*(?:\r?\n[ \t]*)+").expect("paragraph break pattern is valid")
});
static NEWLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]*\r?\n[ \t]*").expect("newline pattern is valid"));

/// `\command{..}` to `(open, close)` tags.
const COMMANDS: [(&str, &str, &str); 6] = [
    ("textbf", r#"<span class="tex-bold">"#, "</span>"),
    ("textit", r#"<span class="tex-italic">"#, "</span>"),
    ("emph", r#"<span class="tex-italic">"#, "</span>"),
    ("underline", r#"<span class="tex-underline">"#, "</span>"),
    ("texttt", r#"<span class="tex-code">"#, "</span>"),
    ("paragraph", r#"<span class="tex-paragraph">"#, "</span>"),
];

const BLOCKS: [(&str, &str, &str); 2] = [
    ("center", r#"<div class="tex-center">"#, "</div>"),
    (
        "proof",
        r#"<div class="tex-proof"><span class="tex-proof-start">Proof.</span>"#,
        r#"<div class="tex-proof-end"></div></div>"#,
    ),
];

/// The first `<li>` is hidden so text before the first `\item` has somewhere to go.
const LISTS: [(&str, &str, &str); 2] = [
    (
        "itemize",
        r#"<ul class="tex-itemize"><li style="display:none;">"#,
        "</li></ul>",
    ),
    (
        "enumerate",
        r#"<ol class="tex-enumerate"><li style="display:none;">"#,
        "</li></ol>",
    ),
];

/// Run every step in order.
pub fn rewrite(text: &str) -> String {
    STEPS
        .iter()
        .fold(text.to_string(), |acc, (_, step)| step(&acc))
}

/// `&`, `<`, `>` to entities; backticks to apostrophes.
pub fn escape(text: &str) -> String {
    html_escape::encode_text(text).replace('`', "'")
}

pub fn strip_color(text: &str) -> String {
    COLOR_RE.replace_all(text, "").into_owned()
}

pub fn blocks(text: &str) -> String {
    BLOCKS.iter().fold(text.to_string(), |acc, (name, open, close)| {
        replace_environment(&acc, name, open, close)
    })
}

pub fn styling(text: &str) -> String {
    COMMANDS
        .iter()
        .fold(text.to_string(), |acc, (command, open, close)| {
            replace_command(&acc, command, open, close)
        })
}

pub fn lists(text: &str) -> String {
    LISTS.iter().fold(text.to_string(), |acc, (name, open, close)| {
        replace_environment(&acc, name, open, close)
    })
}

pub fn items(text: &str) -> String {
    ITEM_RE.replace_all(text, "</li><li>").into_owned()
}

pub fn strip_page_breaks(text: &str) -> String {
    PAGE_BREAK_RE.replace_all(text, "").into_owned()
}

/// Blank lines become `<br>`, remaining newlines a space. Indentation around either goes.
pub fn line_breaks(text: &str) -> String {
    let text = PARAGRAPH_BREAK_RE.replace_all(text, "<br>");
    NEWLINE_RE.replace_all(&text, " ").into_owned()
}

/// Replace `\command{body}` with `open body close`, matching braces.
pub fn replace_command(text: &str, command: &str, open: &str, close: &str) -> String {
    let head = format!("\\{command}{{");
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(&head) {
        let body_start = start + head.len();
        let Some(len) = closing_brace(&rest[body_start..]) else {
            out.push_str(&rest[..body_start]);
            rest = &rest[body_start..];
            continue;
        };
        let body = &rest[body_start..body_start + len];
        out.push_str(&rest[..start]);
        out.push_str(open);
        out.push_str(&replace_command(body, command, open, close));
        out.push_str(close);
        rest = &rest[body_start + len + 1..];
    }

    out.push_str(rest);
    out
}

/// Replace `\begin{name}body\end{name}` with `open body close`, matching nested pairs.
pub fn replace_environment(text: &str, name: &str, open: &str, close: &str) -> String {
    let begin = format!("\\begin{{{name}}}");
    let end = format!("\\end{{{name}}}");
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(&begin) {
        let body_start = start + begin.len();
        let Some(len) = matching_end(&rest[body_start..], &begin, &end) else {
            out.push_str(&rest[..body_start]);
            rest = &rest[body_start..];
            continue;
        };
        let body = &rest[body_start..body_start + len];
        out.push_str(&rest[..start]);
        out.push_str(open);
        out.push_str(&replace_environment(body, name, open, close));
        out.push_str(close);
        rest = &rest[body_start + len + end.len()..];
    }

    out.push_str(rest);
    out
}

/// Offset of the `}` closing a group whose `{` was just consumed.
///
/// A backslash escapes the character after it.
fn closing_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut chars = text.char_indices();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' if depth == 0 => return Some(i),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Offset of the `end` matching an already consumed `begin`.
fn matching_end(text: &str, begin: &str, end: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = 0;
    loop {
        let next_end = pos + text[pos..].find(end)?;
        match text[pos..].find(begin).map(|i| pos + i) {
            Some(next_begin) if next_begin < next_end => {
                depth += 1;
                pos = next_begin + begin.len();
            }
            _ if depth == 0 => return Some(next_end),
            _ => {
                depth -= 1;
                pos = next_end + end.len();
            }
        }
    }
}
