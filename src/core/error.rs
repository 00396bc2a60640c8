//! Engine errors.
//!
//! Every rejected operation returns a [`GameError`] and leaves the game
//! untouched. None of them are fatal: the caller reports the problem and the
//! player tries something else.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::CardId;
use crate::game::turn::DrawSource;
use crate::phases::{CompletedPhaseRef, GroupSlot};

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum GameError {
    #[error("turn order violation: {0}")]
    TurnOrderViolation(#[from] TurnViolation),

    #[error("invalid card reference: {0}")]
    InvalidCardReference(#[from] InvalidReference),

    #[error("phase validation failure: {0}")]
    PhaseValidationFailure(#[from] PhaseFailure),

    #[error("cannot draw: the {0} is empty")]
    EmptyResourceAccess(DrawSource),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Why an action is not allowed at this point of the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TurnViolation {
    #[error("{actor} acted during {current}'s turn")]
    NotYourTurn { actor: PlayerId, current: PlayerId },

    #[error("a card must be drawn first")]
    MustDrawFirst,

    #[error("a card was already drawn this turn")]
    AlreadyDrawn,

    #[error("the phase was already completed this round")]
    PhaseAlreadyCompleted,

    #[error("the player's own phase must be completed first")]
    PhaseNotCompleted,

    #[error("no card is selected for discard")]
    NoDiscardSelected,

    #[error("the game is over")]
    GameOver,

    #[error("{0} is not played by the computer")]
    NotAnAiSeat(PlayerId),
}

/// A card or phase reference that does not point where the caller expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidReference {
    #[error("{0} is not in the player's hand")]
    NotInHand(CardId),

    #[error("{0} is not in the phase builder")]
    NotInPhaseBuilder(CardId),

    #[error("{0} does not name a completed phase")]
    UnknownCompletedPhase(CompletedPhaseRef),
}

/// Cards that do not satisfy the targeted phase requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PhaseFailure {
    #[error("the phase builder does not satisfy phase {phase}")]
    Unsatisfied { phase: u8 },

    #[error("{card} cannot be placed in group {group}")]
    CardDoesNotFit { card: CardId, group: GroupSlot },

    #[error("phase {phase} has no group {group}")]
    NoSuchGroup { phase: u8, group: GroupSlot },
}
