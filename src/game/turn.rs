//! Per-turn state machine.
//!
//! ```text
//! Draw ──draw──▶ Act ──select──▶ Discard ──discard──▶ next player's Draw
//!                 ▲                 │
//!                 └────deselect─────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Stage of the active player's turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    Draw,
    Act,
    Discard,
}

/// Pile a card is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawSource {
    Deck,
    Discard,
}

impl std::fmt::Display for DrawSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawSource::Deck => f.write_str("draw pile"),
            DrawSource::Discard => f.write_str("discard pile"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub phase: TurnPhase,
    pub has_drawn: bool,
    /// Card chosen to end the turn with.
    pub selected: Option<CardId>,
}

impl TurnState {
    /// Fresh state for the next player.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn mark_drawn(&mut self) {
        self.has_drawn = true;
        self.phase = TurnPhase::Act;
    }

    /// Toggle `card` as the discard choice. Returns the new selection.
    pub(crate) fn toggle_selection(&mut self, card: CardId) -> Option<CardId> {
        self.selected = if self.selected == Some(card) {
            None
        } else {
            Some(card)
        };
        self.phase = if self.selected.is_some() {
            TurnPhase::Discard
        } else {
            TurnPhase::Act
        };
        self.selected
    }

    /// Drop the selection if it points at `card`.
    pub(crate) fn forget(&mut self, card: CardId) {
        if self.selected == Some(card) {
            self.selected = None;
            self.phase = TurnPhase::Act;
        }
    }
}
