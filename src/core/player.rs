//! Seats and per-seat data.
//!
//! ## PlayerId
//!
//! 0-based seat index. Seat 0 opens every round.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec`, indexable by `PlayerId`.
//!
//! ## Player
//!
//! A seat's hand, phase progress and cumulative score.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::cards::Card;
use crate::phases::catalog::PHASE_COUNT;

/// Seat identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat `steps` places after this one at a table of `player_count`.
    ///
    /// ```
    /// use phase_ten::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(1).after(1, 3), PlayerId::new(2));
    /// assert_eq!(PlayerId::new(2).after(2, 3), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(0).after(2, 2), PlayerId::new(0));
    /// ```
    #[must_use]
    pub fn after(self, steps: usize, player_count: usize) -> Self {
        Self(((self.index() + steps) % player_count) as u8)
    }

    /// All seats of a table with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build one entry per seat from a factory.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();
        Self { data }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Cards in hand, in the order they were received.
    pub hand: Vec<Card>,
    /// Position in the game's phase order, 1..=10. `11` once every phase is done.
    pub current_phase: u8,
    /// Positions completed so far, in completion order.
    pub completed_phases: Vec<u8>,
    /// Cumulative penalty points. Lower is better.
    pub score: u32,
    pub has_completed_phase: bool,
    pub is_ai: bool,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, is_ai: bool) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
            current_phase: 1,
            completed_phases: Vec::new(),
            score: 0,
            has_completed_phase: false,
            is_ai,
        }
    }

    /// Has this player completed all ten phases?
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current_phase as usize > PHASE_COUNT
    }

    /// Index of a card in hand.
    #[must_use]
    pub fn position_of(&self, card: crate::cards::CardId) -> Option<usize> {
        self.hand.iter().position(|c| c.id == card)
    }
}
