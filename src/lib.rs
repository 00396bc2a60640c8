//! # phase-ten
//!
//! Game-state engine for the Phase 10 card game.
//!
//! ## Design Principles
//!
//! 1. **One Aggregate**: a single owned [`Game`] holds every card and seat.
//!    Humans and bots go through the same operations, so there is one
//!    validation path.
//!
//! 2. **Reject, Never Corrupt**: every operation either applies completely
//!    or returns a typed [`GameError`] and leaves state untouched.
//!
//! 3. **Seeded Randomness**: deck shuffles, phase order and bot choices all
//!    come from [`GameRng`] streams, so a seed replays a game exactly.
//!
//! ## Architecture
//!
//! - **Turn Gates**: draw, act, discard; enforced by the engine rather than
//!   the caller.
//!
//! - **Persistent Data Structures**: `im-rs` vectors for the completed-phase
//!   registry and the event history keep snapshots cheap.
//!
//! - **Pacing as Data**: the bot reports how long a presentation layer should
//!   pause between steps; the engine never sleeps.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, errors
//! - `cards`: card faces and the 108-card deck
//! - `phases`: phase catalog, validation, builder and completed phases
//! - `game`: the engine, rounds, events and snapshots
//! - `ai`: heuristic opponent
//!
//! ```
//! use phase_ten::{DrawSource, GameBuilder, HeuristicAi};
//!
//! let mut game = GameBuilder::new().human("Ada").ai_players(1).build(7).unwrap();
//! let me = game.current_player();
//!
//! let card = game.draw(me, DrawSource::Deck).unwrap();
//! game.select_for_discard(me, card.id).unwrap();
//! game.end_turn(me).unwrap();
//!
//! let mut bot = HeuristicAi::for_game(&game, 7);
//! bot.play_until_human(&mut game, 10).unwrap();
//! ```

pub mod ai;
pub mod cards;
pub mod core;
pub mod game;
pub mod phases;

// Re-export commonly used types
pub use crate::core::{
    AiConfig, AiPacing, GameConfig, GameError, GameRng, InvalidReference, PhaseFailure, Player,
    PlayerId, PlayerMap, Result, TurnViolation,
};

pub use crate::cards::{Card, CardId, CardKind, Color};

pub use crate::phases::{
    CompletedPhase, CompletedPhaseRef, GroupRequirement, GroupSlot, PhaseBuilder,
    PhaseDefinition, PhaseOrder,
};

pub use crate::game::{
    CardAudit, DrawSource, Game, GameBuilder, GameEvent, GameOutcome, GameSnapshot,
    PlayerSnapshot, TurnPhase,
};

pub use crate::ai::{AiStep, AiTurnReport, HeuristicAi};
