//! Phases laid down on the table.
//!
//! A [`CompletedPhase`] keeps its two groups exactly as they were laid out.
//! Cards are only ever appended. The registry is cleared at every round
//! start, so references carry the round they were taken in and a reference
//! from an earlier round is rejected instead of silently hitting a new phase.

use serde::{Deserialize, Serialize};

use super::builder::GroupSlot;
use super::catalog::PhaseDefinition;
use super::validation::can_extend_group;
use crate::cards::Card;
use crate::core::error::PhaseFailure;
use crate::core::PlayerId;

/// Address of a completed phase: the round it belongs to and its index in
/// that round's registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletedPhaseRef {
    pub round: u32,
    pub index: usize,
}

impl CompletedPhaseRef {
    #[must_use]
    pub const fn new(round: u32, index: usize) -> Self {
        Self { round, index }
    }
}

impl std::fmt::Display for CompletedPhaseRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "completed phase #{} of round {}", self.index, self.round)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedPhase {
    pub owner: PlayerId,
    /// The owner's position in the phase order when it was laid down.
    pub phase_position: u8,
    /// Catalog ordinal of the definition the groups satisfy.
    pub phase_ordinal: u8,
    pub group1: Vec<Card>,
    pub group2: Vec<Card>,
    /// Engine tick at which the phase was completed.
    pub completed_at_tick: u64,
}

impl CompletedPhase {
    #[must_use]
    pub fn definition(&self) -> Option<&'static PhaseDefinition> {
        PhaseDefinition::get(self.phase_ordinal)
    }

    #[must_use]
    pub fn group(&self, slot: GroupSlot) -> &[Card] {
        match slot {
            GroupSlot::First => &self.group1,
            GroupSlot::Second => &self.group2,
        }
    }

    /// Check whether `card` may be appended to `slot`.
    pub fn accepts(&self, card: &Card, slot: GroupSlot) -> Result<(), PhaseFailure> {
        let requirement = self
            .definition()
            .and_then(|def| def.requirement(slot))
            .ok_or(PhaseFailure::NoSuchGroup {
                phase: self.phase_position,
                group: slot,
            })?;

        if can_extend_group(card, self.group(slot), requirement) {
            Ok(())
        } else {
            Err(PhaseFailure::CardDoesNotFit {
                card: card.id,
                group: slot,
            })
        }
    }

    /// Append without checking; call [`CompletedPhase::accepts`] first.
    pub fn append(&mut self, card: Card, slot: GroupSlot) {
        match slot {
            GroupSlot::First => self.group1.push(card),
            GroupSlot::Second => self.group2.push(card),
        }
    }

    /// Every card in both groups.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.group1.iter().chain(self.group2.iter())
    }
}
