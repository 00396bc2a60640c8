//! Read-only game views for a presentation layer.

use serde::{Deserialize, Serialize};

use super::engine::Game;
use super::round::GameOutcome;
use super::turn::TurnState;
use crate::cards::Card;
use crate::core::PlayerId;
use crate::phases::{CompletedPhase, PhaseBuilder, PhaseOrder};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub is_ai: bool,
    pub hand: Vec<Card>,
    pub current_phase: u8,
    pub completed_phases: Vec<u8>,
    pub score: u32,
    pub has_completed_phase: bool,
    /// Description of the phase being attempted, `None` once all are done.
    pub phase_description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub round: u32,
    pub current_player: PlayerId,
    pub turn: TurnState,
    pub players: Vec<PlayerSnapshot>,
    pub draw_pile_count: usize,
    pub discard_top: Option<Card>,
    pub discard_count: usize,
    pub phase_builder: PhaseBuilder,
    pub completed_phases: Vec<CompletedPhase>,
    pub phase_order: PhaseOrder,
    pub phase_hint: Option<String>,
    pub can_complete_phase: bool,
    pub outcome: Option<GameOutcome>,
}

impl GameSnapshot {
    #[must_use]
    pub fn capture(game: &Game) -> Self {
        let players = game
            .players()
            .iter()
            .map(|(id, p)| PlayerSnapshot {
                id,
                name: p.name.clone(),
                is_ai: p.is_ai,
                hand: p.hand.clone(),
                current_phase: p.current_phase,
                completed_phases: p.completed_phases.clone(),
                score: p.score,
                has_completed_phase: p.has_completed_phase,
                phase_description: game
                    .current_phase_definition(id)
                    .map(|def| def.description.to_string()),
            })
            .collect();

        let current = game.current_player();
        Self {
            round: game.round(),
            current_player: current,
            turn: *game.turn(),
            players,
            draw_pile_count: game.draw_pile_len(),
            discard_top: game.discard_top().copied(),
            discard_count: game.discard_pile().len(),
            phase_builder: game.phase_builder().clone(),
            completed_phases: game.completed_phases().iter().cloned().collect(),
            phase_order: *game.phase_order(),
            phase_hint: game.phase_hint(current),
            can_complete_phase: game.can_complete_phase(current),
            outcome: game.outcome().cloned(),
        }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerSnapshot> {
        self.players.get(id.index())
    }
}
