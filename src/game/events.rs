//! Game events.
//!
//! The engine records an event for every milestone. A presentation layer
//! drains them after each operation to animate, announce skips and decide
//! when to schedule the next AI step.

use serde::{Deserialize, Serialize};

use super::turn::DrawSource;
use crate::cards::{Card, CardId};
use crate::core::PlayerId;
use crate::phases::{CompletedPhaseRef, GroupSlot};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted {
        round: u32,
        first_player: PlayerId,
    },
    TurnStarted {
        player: PlayerId,
        is_ai: bool,
    },
    /// Cards drawn from the deck stay hidden; discard-pile draws are public.
    CardDrawn {
        player: PlayerId,
        source: DrawSource,
        card: Option<Card>,
    },
    DeckReshuffled {
        cards: usize,
    },
    CardDiscarded {
        player: PlayerId,
        card: Card,
    },
    /// `extra_turn` is set when skipping the only opponent hands the
    /// discarder another turn.
    PlayerSkipped {
        by: PlayerId,
        skipped: PlayerId,
        extra_turn: bool,
    },
    PhaseCompleted {
        player: PlayerId,
        phase_position: u8,
        phase_ordinal: u8,
        reference: CompletedPhaseRef,
    },
    PhaseExtended {
        player: PlayerId,
        card: CardId,
        reference: CompletedPhaseRef,
        group: GroupSlot,
    },
    WentOut {
        player: PlayerId,
    },
    RoundEnded {
        round: u32,
        /// Penalty points added to each seat this round, in seat order.
        round_scores: Vec<u32>,
    },
    GameWon {
        winner: PlayerId,
        final_scores: Vec<u32>,
    },
}
