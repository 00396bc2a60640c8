//! Phase definitions, validation and the cards laid out for them.
//!
//! ## Key Types
//!
//! - `PhaseDefinition`: one of the ten static phase records
//! - `PhaseOrder`: the per-game order players work through
//! - `GroupRequirement`: set, run or color target for one group
//! - `PhaseBuilder`: the active player's staging groups
//! - `CompletedPhase`: a phase on the table, open to extension

pub mod builder;
pub mod catalog;
pub mod completed;
pub mod validation;

pub use builder::{GroupSlot, PhaseBuilder};
pub use catalog::{GroupRequirement, PhaseDefinition, PhaseOrder, PHASE_COUNT};
pub use completed::{CompletedPhase, CompletedPhaseRef};
pub use validation::{validate_phase, validate_run, validate_set};
