//! Card conservation audit.
//!
//! Every one of the 108 cards must sit in exactly one place at all times.
//! [`CardAudit`] records where each id was seen and flags anything seen
//! twice.

use rustc_hash::FxHashMap;

use crate::cards::{Card, CardId, DECK_SIZE};
use crate::core::PlayerId;
use crate::phases::CompletedPhaseRef;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardLocation {
    DrawPile,
    DiscardPile,
    Hand(PlayerId),
    PhaseBuilder,
    CompletedPhase(CompletedPhaseRef),
}

#[derive(Clone, Debug, Default)]
pub struct CardAudit {
    locations: FxHashMap<CardId, CardLocation>,
    duplicates: Vec<(CardId, CardLocation)>,
    total: usize,
}

impl CardAudit {
    pub fn record(&mut self, location: CardLocation, cards: &[Card]) {
        for card in cards {
            self.total += 1;
            if self.locations.insert(card.id, location).is_some() {
                self.duplicates.push((card.id, location));
            }
        }
    }

    /// Where a card was seen last.
    #[must_use]
    pub fn location(&self, card: CardId) -> Option<CardLocation> {
        self.locations.get(&card).copied()
    }

    /// Cards counted, duplicates included.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn duplicates(&self) -> &[(CardId, CardLocation)] {
        &self.duplicates
    }

    /// Exactly one full deck, each card in one place.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        self.duplicates.is_empty() && self.total == DECK_SIZE && self.locations.len() == DECK_SIZE
    }
}
