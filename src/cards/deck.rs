//! The 108-card deck.
//!
//! ## Composition
//!
//! Four colors × numbers 1-12 × two copies (96 cards), eight wilds and four
//! skips. Ids are assigned in that enumeration order, so `CardId(0)` is the
//! first red 1 and ids 104-107 are the skips.
//!
//! ## Piles
//!
//! The draw pile and discard pile are plain `Vec<Card>` with the top at the
//! end. The engine owns both.

use super::card::{Card, CardId, CardKind, Color};
use crate::core::GameRng;

/// Highest number printed on a card.
pub const MAX_CARD_VALUE: u8 = 12;

/// Copies of each color/number pair.
pub const COPIES_PER_NUMBER: u8 = 2;

pub const WILD_COUNT: u8 = 8;

pub const SKIP_COUNT: u8 = 4;

/// Cards in a full deck.
pub const DECK_SIZE: usize = 108;

/// Every card of a deck, in id order.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    let mut next = 0u8;
    let mut id = || {
        let current = CardId::new(next);
        next += 1;
        current
    };

    for color in Color::ALL {
        for value in 1..=MAX_CARD_VALUE {
            for _ in 0..COPIES_PER_NUMBER {
                cards.push(Card::number(id(), value, color));
            }
        }
    }
    for _ in 0..WILD_COUNT {
        cards.push(Card::wild(id()));
    }
    for _ in 0..SKIP_COUNT {
        cards.push(Card::skip(id()));
    }

    debug_assert_eq!(cards.len(), DECK_SIZE);
    cards
}

/// A freshly shuffled deck.
#[must_use]
pub fn build_deck(rng: &mut GameRng) -> Vec<Card> {
    let mut cards = standard_deck();
    rng.shuffle(&mut cards);
    cards
}

/// Turn the discard pile (minus its top card) into a new draw pile.
///
/// Only acts when `draw` is empty and `discard` holds more than one card.
/// Returns whether anything moved.
pub fn reshuffle(draw: &mut Vec<Card>, discard: &mut Vec<Card>, rng: &mut GameRng) -> bool {
    if !draw.is_empty() || discard.len() <= 1 {
        return false;
    }
    let Some(top) = discard.pop() else {
        return false;
    };

    draw.append(discard);
    rng.shuffle(draw);
    discard.push(top);

    log::debug!("reshuffled {} discards into the draw pile", draw.len());
    true
}

impl Card {
    /// Stable text code such as `red-5-0`, `wild-3` or `skip-1`.
    ///
    /// The trailing number tells apart copies of the same face.
    #[must_use]
    pub fn code(&self) -> String {
        let raw = self.id.raw();
        match self.kind {
            CardKind::Number { value, color } => {
                format!("{}-{}-{}", color.name(), value, raw % COPIES_PER_NUMBER)
            }
            CardKind::Wild => format!("wild-{}", raw - number_card_count()),
            CardKind::Skip => format!("skip-{}", raw - number_card_count() - WILD_COUNT),
        }
    }
}

const fn number_card_count() -> u8 {
    4 * MAX_CARD_VALUE * COPIES_PER_NUMBER
}
