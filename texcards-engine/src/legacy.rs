//! Line-oriented rewriter
//!
//! The first generation of the converter, kept so decks built with it can be regenerated
//! with identical markup. It emits plain HTML tags (`<b>`, `<i>`, `<ul>` ...) instead of the
//! `tex-*` classes, does no HTML escaping outside math, keeps newlines as they are, and
//! ignores images.
//!
//! Math is isolated document-wide first (display, `equation`, `align`, then inline), every
//! line is rewritten on its own, and the math is put back as `<anki-mathjax>` markup.
//! Styling commands are matched one line at a time and do not nest.

use crate::media::ResourceResolver;
use crate::rewrite::math::separate_braces;
use crate::rewrite::placeholder::{restore, token};
use crate::rewrite::Render;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static DISPLAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\$([\s\S]*?)\$\$").expect("display math pattern is valid"));
static EQUATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\begin\{equation\*?\}([\s\S]*?)\\end\{equation\*?\}")
        .expect("equation pattern is valid")
});
static ALIGN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\begin\{align\*?\}([\s\S]*?)\\end\{align\*?\}").expect("align pattern is valid")
});
static INLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([^\n]*?)\$").expect("inline math pattern is valid"));

static LINE_COMMANDS: Lazy<[(Regex, &'static str); 4]> = Lazy::new(|| {
    [
        (command_regex("textbf"), "<b>${1}</b>"),
        (command_regex("textit"), "<i>${1}</i>"),
        (command_regex("underline"), "<u>${1}</u>"),
        (command_regex("texttt"), "<code>${1}</code>"),
    ]
});

const LINE_LITERALS: [(&str, &str); 9] = [
    ("\\begin{itemize}", "<ul>"),
    ("\\end{itemize}", "</ul>"),
    ("\\begin{enumerate}", "<ol>"),
    ("\\end{enumerate}", "</ol>"),
    ("\\item", "<li>"),
    ("\\begin{center}", r#"<div class="center">"#),
    ("\\end{center}", "</div>"),
    (
        "\\begin{proof}",
        r#"<div class="proof"><b><i>proof.</i></b>"#,
    ),
    ("\\end{proof}", r#"<div class="qed"></div></div>"#),
];

fn command_regex(command: &str) -> Regex {
    Regex::new(&format!(r"\\{command}\{{([^\n]*?)\}}")).expect("line command pattern is valid")
}

/// One kind of isolated math region.
struct Isolation {
    regex: &'static Lazy<Regex>,
    block: bool,
    /// Environment the body is wrapped in when restored.
    inner_env: Option<&'static str>,
}

fn isolations() -> [Isolation; 4] {
    [
        Isolation {
            regex: &DISPLAY_RE,
            block: true,
            inner_env: None,
        },
        Isolation {
            regex: &EQUATION_RE,
            block: true,
            inner_env: None,
        },
        Isolation {
            regex: &ALIGN_RE,
            block: true,
            inner_env: Some("aligned"),
        },
        Isolation {
            regex: &INLINE_RE,
            block: false,
            inner_env: None,
        },
    ]
}

impl Isolation {
    fn restore(&self, body: &str) -> String {
        let escaped = separate_braces(&body.replace('<', "&lt;").replace('>', "&gt;"));
        let body = match self.inner_env {
            Some(env) => format!("\\begin{{{env}}}{escaped}\\end{{{env}}}"),
            None => escaped,
        };
        if self.block {
            format!(r#"<anki-mathjax block="true">{body}</anki-mathjax>"#)
        } else {
            format!("<anki-mathjax>{body}</anki-mathjax>")
        }
    }
}

/// The legacy renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyRewriter;

impl LegacyRewriter {
    pub fn new() -> Self {
        Self
    }

    pub fn rewrite(&self, raw: &str) -> String {
        let isolations = isolations();
        let mut text = raw.to_string();
        let mut bodies: Vec<Vec<String>> = Vec::with_capacity(isolations.len());

        for (pass, isolation) in isolations.iter().enumerate() {
            let mut found = Vec::new();
            text = isolation
                .regex
                .replace_all(&text, |caps: &Captures<'_>| {
                    found.push(caps[1].to_string());
                    token(pass, found.len() - 1)
                })
                .into_owned();
            bodies.push(found);
        }

        let mut text: String = text.split_inclusive('\n').map(rewrite_line).collect();

        for (pass, (isolation, found)) in isolations.iter().zip(&bodies).enumerate() {
            text = restore(&text, pass, |index| {
                found.get(index).map(|body| isolation.restore(body))
            });
        }

        text
    }
}

impl Render for LegacyRewriter {
    fn render(&self, raw: &str, _resolver: &mut dyn ResourceResolver) -> String {
        self.rewrite(raw)
    }
}

fn rewrite_line(line: &str) -> String {
    let mut line = line.to_string();
    for (regex, replacement) in LINE_COMMANDS.iter() {
        line = regex.replace_all(&line, *replacement).into_owned();
    }
    for (from, to) in LINE_LITERALS {
        line = line.replace(from, to);
    }
    line
}
