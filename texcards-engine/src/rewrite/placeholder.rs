//! Placeholder tokens for protected regions
//!
//! A token is `U+E000 <pass>:<index> U+E001`. The private-use delimiters never occur in
//! LaTeX sources and pass through every unprotected rewrite unchanged, so a token survives the
//! inner chain intact and can be swapped back afterwards. Tokens carry the pass number so an
//! outer pass never restores an inner pass's token or the other way round.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("\u{E000}([0-9]+):([0-9]+)\u{E001}").expect("token pattern is valid"));

/// Token for entry `index` of pass `pass`.
pub fn token(pass: usize, index: usize) -> String {
    format!("{OPEN}{pass}:{index}{CLOSE}")
}

/// Replace every token of `pass` in `text` with `resolve(index)`.
///
/// Tokens of other passes are left alone.
pub fn restore<F>(text: &str, pass: usize, mut resolve: F) -> String
where
    F: FnMut(usize) -> Option<String>,
{
    TOKEN_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let owner = caps[1].parse::<usize>().ok();
            let index = caps[2].parse::<usize>().ok();
            match (owner, index) {
                (Some(owner), Some(index)) if owner == pass => {
                    resolve(index).unwrap_or_else(|| caps[0].to_string())
                }
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Matches captured by one protected pass, indexed by insertion order.
///
/// The table lives for one pass invocation and is consumed by [`PlaceholderTable::drain`],
/// so no token can outlive the pass that issued it.
pub struct PlaceholderTable<'t> {
    pass: usize,
    entries: Vec<Captures<'t>>,
}

impl<'t> PlaceholderTable<'t> {
    pub fn new(pass: usize) -> Self {
        Self {
            pass,
            entries: Vec::new(),
        }
    }

    /// Store a match and return the token that stands in for it.
    pub fn insert(&mut self, caps: Captures<'t>) -> String {
        let token = token(self.pass, self.entries.len());
        self.entries.push(caps);
        token
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Put `assemble(match)` back in place of every token this table issued.
    pub fn drain<F>(self, text: &str, mut assemble: F) -> String
    where
        F: FnMut(&Captures<'t>) -> String,
    {
        let entries = self.entries;
        restore(text, self.pass, |index| entries.get(index).map(&mut assemble))
    }
}
