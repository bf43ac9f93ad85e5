//! Document to cards
//!
//! Walks the scope tree in document order, extracts the card blocks of every scope, renders
//! each front and back, and hands the result to a [`CardSink`]. A card's name is the qualified
//! name of its scope, prefixed by the base deck when one is set.

use crate::cards::{extract, CardBlock};
use crate::media::ResourceResolver;
use crate::rewrite::{Render, RewriteChain};
use crate::sections::{join_scope, ScopeNode};
use serde::{Deserialize, Serialize};

/// One finished card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedCard {
    pub name: String,
    pub front: String,
    pub back: String,
}

/// Receives cards as they are produced.
pub trait CardSink {
    fn add_card(&mut self, name: &str, front: &str, back: &str);
}

impl<F> CardSink for F
where
    F: FnMut(&str, &str, &str),
{
    fn add_card(&mut self, name: &str, front: &str, back: &str) {
        self(name, front, back)
    }
}

impl CardSink for Vec<RenderedCard> {
    fn add_card(&mut self, name: &str, front: &str, back: &str) {
        self.push(RenderedCard {
            name: name.to_string(),
            front: front.to_string(),
            back: back.to_string(),
        });
    }
}

/// Runs a document through a renderer.
#[derive(Debug, Clone, Default)]
pub struct Converter<R = RewriteChain> {
    renderer: R,
    base_deck: String,
}

impl Converter<RewriteChain> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: Render> Converter<R> {
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            renderer,
            base_deck: String::new(),
        }
    }

    /// Prefix every card name with `base`.
    pub fn with_base_deck(mut self, base: impl Into<String>) -> Self {
        self.base_deck = base.into().trim().to_string();
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// `base::scope`, `base` alone for the top scope, `scope` alone without a base.
    pub fn deck_name(&self, scope: &str) -> String {
        join_scope(&self.base_deck, scope)
    }

    /// Convert `document`, feeding every card to `sink` in document order.
    ///
    /// Returns the number of cards produced.
    pub fn convert(
        &self,
        document: &str,
        sink: &mut dyn CardSink,
        resolver: &mut dyn ResourceResolver,
    ) -> usize {
        let tree = ScopeNode::build(document);
        tracing::debug!(scopes = tree.scope_count(), "built scope tree");

        let mut count = 0;
        tree.walk("", &mut |scope, text| {
            let extraction = extract(text);
            if let Some(preamble) = extraction.preamble {
                // Rendered for its side effects only: images still go through the resolver.
                let _ = self.renderer.render(preamble, resolver);
            }

            let name = self.deck_name(scope);
            for block in &extraction.blocks {
                let (front, back) = self.render_block(block, resolver);
                sink.add_card(&name, &front, &back);
                count += 1;
            }
            tracing::debug!(scope, cards = extraction.blocks.len(), "converted scope");
        });

        count
    }

    /// Convert `document` and collect the cards.
    pub fn convert_to_vec(
        &self,
        document: &str,
        resolver: &mut dyn ResourceResolver,
    ) -> Vec<RenderedCard> {
        let mut cards = Vec::new();
        self.convert(document, &mut cards, resolver);
        cards
    }

    fn render_block(
        &self,
        block: &CardBlock<'_>,
        resolver: &mut dyn ResourceResolver,
    ) -> (String, String) {
        let mut front = block.annotation();
        front.push_str(&self.renderer.render(block.front_raw.trim(), resolver));
        let back = self.renderer.render(block.back_raw.trim(), resolver);
        (front, back)
    }
}
