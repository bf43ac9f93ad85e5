//! Shared helpers for the integration tests.

#![allow(dead_code)]

use texcards_engine::media::{IdentityResolver, ResolveError};
use texcards_engine::{Converter, RenderedCard, Render, RewriteChain};

/// Render a fragment with the standard chain, keeping image paths as written.
pub fn render(raw: &str) -> String {
    RewriteChain::standard().render_plain(raw)
}

/// Convert a whole document with the standard chain.
pub fn convert(document: &str) -> Vec<RenderedCard> {
    Converter::new().convert_to_vec(document, &mut IdentityResolver)
}

/// A resolver that rejects everything and remembers what it was asked for.
#[derive(Default)]
pub struct FailingResolver {
    pub requests: Vec<String>,
}

impl texcards_engine::ResourceResolver for FailingResolver {
    fn resolve(&mut self, path: &str) -> Result<String, ResolveError> {
        self.requests.push(path.to_string());
        Err(ResolveError::NotFound(path.into()))
    }
}
