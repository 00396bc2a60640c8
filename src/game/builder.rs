//! Seeded, configured game construction.

use crate::core::{AiConfig, GameConfig, Result};

use super::engine::Game;

/// Builder for a [`Game`].
///
/// Humans take the first seats in the order they are added; bots follow.
///
/// ```
/// use phase_ten::game::GameBuilder;
///
/// let game = GameBuilder::new()
///     .human("Ada")
///     .ai_players(2)
///     .build(42)
///     .unwrap();
/// assert_eq!(game.player_count(), 3);
/// assert_eq!(game.players().values().filter(|p| p.is_ai).count(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    humans: Vec<String>,
    ai_players: usize,
    config: GameConfig,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn human(mut self, name: impl Into<String>) -> Self {
        self.humans.push(name.into());
        self
    }

    pub fn humans<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.humans.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn ai_players(mut self, count: usize) -> Self {
        self.ai_players = count;
        self
    }

    pub fn hand_size(mut self, size: usize) -> Self {
        self.config.hand_size = size;
        self
    }

    pub fn randomize_phase_order(mut self, randomize: bool) -> Self {
        self.config.randomize_phase_order = randomize;
        self
    }

    pub fn ai_config(mut self, ai: AiConfig) -> Self {
        self.config.ai = ai;
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Seat everyone and deal the first round.
    pub fn build(self, seed: u64) -> Result<Game> {
        let mut seats: Vec<(String, bool)> =
            self.humans.into_iter().map(|name| (name, false)).collect();
        for i in 0..self.ai_players {
            seats.push((ai_name(i, self.ai_players), true));
        }
        Game::from_seats(seats, self.config, seed)
    }
}

/// `"AI Bot"` for a lone bot, `"AI Bot 1"`, `"AI Bot 2"`, ... otherwise.
fn ai_name(index: usize, count: usize) -> String {
    if count == 1 {
        "AI Bot".to_string()
    } else {
        format!("AI Bot {}", index + 1)
    }
}
