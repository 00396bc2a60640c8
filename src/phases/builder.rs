//! Staging area for the active player's phase attempt.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

/// One of the two groups a phase is laid out in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupSlot {
    First,
    Second,
}

impl GroupSlot {
    pub const BOTH: [GroupSlot; 2] = [GroupSlot::First, GroupSlot::Second];

    /// 0 for the first group, 1 for the second.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            GroupSlot::First => 0,
            GroupSlot::Second => 1,
        }
    }

    /// Parse the 1-based group number used by presentation layers.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(GroupSlot::First),
            2 => Some(GroupSlot::Second),
            _ => None,
        }
    }
}

impl std::fmt::Display for GroupSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index() + 1)
    }
}

/// Cards the active player has set aside for their phase.
///
/// The builder never validates anything itself; the engine checks placement
/// before calling [`PhaseBuilder::push`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseBuilder {
    pub group1: Vec<Card>,
    pub group2: Vec<Card>,
}

impl PhaseBuilder {
    #[must_use]
    pub fn group(&self, slot: GroupSlot) -> &[Card] {
        match slot {
            GroupSlot::First => &self.group1,
            GroupSlot::Second => &self.group2,
        }
    }

    fn group_mut(&mut self, slot: GroupSlot) -> &mut Vec<Card> {
        match slot {
            GroupSlot::First => &mut self.group1,
            GroupSlot::Second => &mut self.group2,
        }
    }

    pub fn push(&mut self, slot: GroupSlot, card: Card) {
        self.group_mut(slot).push(card);
    }

    /// Take a card out of whichever group holds it.
    pub fn remove(&mut self, card: CardId) -> Option<(GroupSlot, Card)> {
        for slot in GroupSlot::BOTH {
            let group = self.group_mut(slot);
            if let Some(pos) = group.iter().position(|c| c.id == card) {
                return Some((slot, group.remove(pos)));
            }
        }
        None
    }

    /// Empty both groups, group 1 first.
    pub fn take_all(&mut self) -> Vec<Card> {
        let mut cards = std::mem::take(&mut self.group1);
        cards.append(&mut self.group2);
        cards
    }

    /// Move group 2 onto the end of group 1.
    pub fn consolidate(&mut self) {
        let mut second = std::mem::take(&mut self.group2);
        self.group1.append(&mut second);
    }

    /// Both groups, group 1 first.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.group1.iter().chain(self.group2.iter())
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards().any(|c| c.id == card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.group1.len() + self.group2.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.group1.is_empty() && self.group2.is_empty()
    }
}
