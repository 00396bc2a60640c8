//! Shared building blocks: seats, configuration, randomness and errors.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{AiConfig, AiPacing, GameConfig, MAX_PLAYERS, MIN_PLAYERS, STANDARD_HAND_SIZE};
pub use error::{GameError, InvalidReference, PhaseFailure, Result, TurnViolation};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::GameRng;
