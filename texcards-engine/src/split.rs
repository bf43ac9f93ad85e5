//! Regex driven region splitting
//!
//! Every structural split in the crate (sections, subsections, card blocks) is the same
//! operation: find all matches of a pattern and pair each match with the text that follows
//! it up to the next match. Text ahead of the first match is kept as a leading pair with no
//! match, provided it is not blank.
//!
//! ```text
//! text:    "intro \s{A} alpha \s{B} beta"
//! pairs:   (None, "intro ") (\s{A}, " alpha ") (\s{B}, " beta")
//! ```

use regex::{Captures, Match, Regex};

/// A match (absent for the leading prefix) and the text after it.
#[derive(Debug)]
pub struct Pair<'t, H = Captures<'t>> {
    pub head: Option<H>,
    pub tail: &'t str,
}

impl<'t, H> Pair<'t, H> {
    /// Transform the match while keeping the tail.
    pub fn map_head<U>(self, f: impl FnOnce(H) -> U) -> Pair<'t, U> {
        Pair {
            head: self.head.map(f),
            tail: self.tail,
        }
    }

    /// True for the prefix that precedes the first match.
    pub fn is_leading(&self) -> bool {
        self.head.is_none()
    }
}

/// Split `text` by `regex` into ordered pairs.
///
/// Empty tails between adjacent matches are kept. With no matches the whole text is one
/// leading pair, unless it is blank, in which case nothing is returned.
pub fn split_regex<'t>(text: &'t str, regex: &Regex) -> Vec<Pair<'t>> {
    let captures: Vec<Captures<'t>> = regex.captures_iter(text).collect();
    let mut pairs = Vec::with_capacity(captures.len() + 1);

    let first_start = captures.first().map_or(text.len(), |c| whole(c).start());
    let prefix = &text[..first_start];
    if !prefix.trim().is_empty() {
        pairs.push(Pair {
            head: None,
            tail: prefix,
        });
    }

    let mut iter = captures.into_iter().peekable();
    while let Some(caps) = iter.next() {
        let end = whole(&caps).end();
        let next_start = iter.peek().map_or(text.len(), |next| whole(next).start());
        pairs.push(Pair {
            head: Some(caps),
            tail: &text[end..next_start],
        });
    }

    pairs
}

/// Split by `regex` keeping only capture group 1 of each match.
pub fn split_titles<'t>(text: &'t str, regex: &Regex) -> Vec<Pair<'t, &'t str>> {
    split_regex(text, regex)
        .into_iter()
        .map(|pair| pair.map_head(|caps| group(&caps, 1)))
        .collect()
}

/// Text of capture group `index`, or `""` when the group did not take part in the match.
pub fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}

fn whole<'t>(caps: &Captures<'t>) -> Match<'t> {
    caps.get_match()
}
