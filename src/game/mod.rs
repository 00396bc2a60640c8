//! Game engine: turn sequencing, phases on the table, rounds and scoring.
//!
//! ## Key Types
//!
//! - `Game`: the aggregate that owns every card and player
//! - `GameBuilder`: seeded, configured construction
//! - `TurnState`: draw / act / discard gates for the active player
//! - `GameEvent`: milestones a presentation layer reacts to
//! - `GameSnapshot`: serializable read-only view

pub mod audit;
pub mod builder;
pub mod engine;
pub mod events;
pub mod round;
pub mod snapshot;
pub mod turn;

pub use audit::{CardAudit, CardLocation};
pub use builder::GameBuilder;
pub use engine::Game;
pub use events::GameEvent;
pub use round::{hand_penalty, standings, GameOutcome};
pub use snapshot::{GameSnapshot, PlayerSnapshot};
pub use turn::{DrawSource, TurnPhase, TurnState};
