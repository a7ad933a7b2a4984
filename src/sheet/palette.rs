//! Token palette for the active line
//!
//! The palette offers every distinct token the line needs, minus the glyphs
//! that already have a fixed control, in random order.

use super::line::LineState;
use super::token::Token;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;

/// Number of clickable palette slots on the control surface.
pub const PALETTE_SLOTS: usize = 12;

/// Shuffled candidate tokens for one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    tokens: Vec<Token>,
}

impl Palette {
    /// Build the palette for `line`, shuffling with `rng`.
    pub fn build<R: Rng + ?Sized>(line: &LineState, rng: &mut R) -> Self {
        let mut seen = FxHashSet::default();
        let mut tokens = Vec::new();
        for token in &line.required_tokens {
            if token.is_always_available_glyph() || token.is_cursor() {
                continue;
            }
            if seen.insert((token.category, token.text.as_str())) {
                tokens.push(token.clone());
            }
        }

        // SliceRandom::shuffle is an in-place Fisher-Yates.
        tokens.shuffle(rng);
        tokens.truncate(PALETTE_SLOTS);

        Palette { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, slot: usize) -> Option<&Token> {
        self.tokens.get(slot)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Control rows needed to show the palette.
    pub fn rows(&self) -> usize {
        match self.tokens.len() {
            0..=4 => 1,
            5..=8 => 2,
            _ => 3,
        }
    }
}
