//! Game configuration.
//!
//! Rule knobs live in [`GameConfig`]; AI behaviour and pacing in
//! [`AiConfig`]. Both are plain serde structs with `Default` values matching
//! the standard game, and consuming `with_*` methods for overrides.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::{GameError, Result};

/// Fewest seats a game can have.
pub const MIN_PLAYERS: usize = 2;

/// Most seats a game can have.
pub const MAX_PLAYERS: usize = 6;

/// Cards dealt to each player in the standard game.
pub const STANDARD_HAND_SIZE: usize = 10;

/// Rules configuration for one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cards dealt to each player at the start of a round.
    pub hand_size: usize,

    /// Shuffle the order of the ten phases once per game.
    pub randomize_phase_order: bool,

    /// AI behaviour.
    pub ai: AiConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: STANDARD_HAND_SIZE,
            randomize_phase_order: true,
            ai: AiConfig::default(),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_randomized_phases(mut self, randomize: bool) -> Self {
        self.randomize_phase_order = randomize;
        self
    }

    #[must_use]
    pub fn with_ai(mut self, ai: AiConfig) -> Self {
        self.ai = ai;
        self
    }

    /// Check the configuration against a table of `player_count` seats.
    pub fn validate(&self, player_count: usize) -> Result<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(GameError::InvalidConfig(format!(
                "player count must be {}-{}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, player_count
            )));
        }
        if !(1..=STANDARD_HAND_SIZE).contains(&self.hand_size) {
            return Err(GameError::InvalidConfig(format!(
                "hand size must be 1-{}, got {}",
                STANDARD_HAND_SIZE, self.hand_size
            )));
        }
        self.ai.validate()
    }
}

/// Heuristic AI configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Chance of taking a useful discard-pile card instead of drawing blind.
    pub discard_draw_probability: f64,

    /// Delays a presentation layer should leave between AI steps.
    pub pacing: AiPacing,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            discard_draw_probability: 0.7,
            pacing: AiPacing::default(),
        }
    }
}

impl AiConfig {
    #[must_use]
    pub fn with_discard_draw_probability(mut self, probability: f64) -> Self {
        self.discard_draw_probability = probability;
        self
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: AiPacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.discard_draw_probability) {
            return Err(GameError::InvalidConfig(format!(
                "discard draw probability must be within 0-1, got {}",
                self.discard_draw_probability
            )));
        }
        Ok(())
    }
}

/// UI pacing for AI turns. The engine never sleeps; callers schedule steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiPacing {
    /// Before an AI opens a new game or round.
    pub round_start: Duration,
    /// Before an AI starts a turn handed over by another player.
    pub turn_start: Duration,
    /// Between the draw and the phase attempt.
    pub after_draw: Duration,
    /// Before extending completed phases.
    pub before_extension: Duration,
    /// Before the closing discard.
    pub before_discard: Duration,
}

impl Default for AiPacing {
    fn default() -> Self {
        Self {
            round_start: Duration::from_millis(2000),
            turn_start: Duration::from_millis(1500),
            after_draw: Duration::from_millis(800),
            before_extension: Duration::from_millis(500),
            before_discard: Duration::from_millis(1000),
        }
    }
}

impl AiPacing {
    /// No delays at all; for simulations and tests.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            round_start: Duration::ZERO,
            turn_start: Duration::ZERO,
            after_draw: Duration::ZERO,
            before_extension: Duration::ZERO,
            before_discard: Duration::ZERO,
        }
    }
}
