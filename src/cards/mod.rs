//! Cards and the deck.
//!
//! ## Key Types
//!
//! - `CardId`: identity of one physical card, unique within a deck
//! - `CardKind`: number (value + color), wild or skip
//! - `Card`: id plus kind; `Copy`, so piles hold cards by value
//!
//! Deck construction, shuffling and discard-pile recycling live in [`deck`].

pub mod card;
pub mod deck;

pub use card::{Card, CardId, CardKind, Color};
pub use deck::{build_deck, reshuffle, standard_deck, DECK_SIZE};
