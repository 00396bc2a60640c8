//! Heuristic computer opponent.
//!
//! - `evaluate`: card usefulness and discard scoring
//! - `arrangement`: greedy phase layouts
//! - `heuristic`: the turn driver, [`HeuristicAi`]

pub mod arrangement;
pub mod evaluate;
pub mod heuristic;

pub use arrangement::{find_arrangement, Arrangement};
pub use heuristic::{AiStep, AiTurnReport, HeuristicAi};
