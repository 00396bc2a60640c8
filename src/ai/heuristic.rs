//! Rule-based opponent.
//!
//! The bot plays through the same [`Game`] operations as a human. A turn is
//! split into [`AiStep`]s so a presentation layer can pause between them
//! (see [`AiStep::delay`]); [`HeuristicAi::play_turn`] runs them back to back.
//!
//! ## Turn
//!
//! 1. Draw: take the discard top if it is useful (with the configured
//!    probability), otherwise draw blind.
//! 2. Phase: lay down a greedy arrangement if one completes the phase.
//! 3. Extension: once its own phase is down, add at most one card per turn
//!    to any phase on the table.
//! 4. Discard the least useful card.

use std::time::Duration;

use super::arrangement::find_arrangement;
use super::evaluate::{choose_discard, is_useful};
use crate::cards::{Card, CardId};
use crate::core::{AiConfig, AiPacing, GameError, GameRng, PlayerId, Result, TurnViolation};
use crate::game::{DrawSource, Game, GameEvent};
use crate::phases::validation::validate_phase;
use crate::phases::{CompletedPhaseRef, GroupSlot};

/// One scheduled piece of a bot's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AiStep {
    Draw,
    AttemptPhase,
    AttemptExtension,
    Discard,
}

impl AiStep {
    /// Pause a presentation layer should leave before running this step.
    ///
    /// The first turn of a round should wait [`AiPacing::round_start`]
    /// instead; see [`HeuristicAi::opening_delay`].
    #[must_use]
    pub fn delay(self, pacing: &AiPacing) -> Duration {
        match self {
            AiStep::Draw => pacing.turn_start,
            AiStep::AttemptPhase => pacing.after_draw,
            AiStep::AttemptExtension => pacing.before_extension,
            AiStep::Discard => pacing.before_discard,
        }
    }
}

/// What a bot did during one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiTurnReport {
    pub player: PlayerId,
    pub drew_from: Option<DrawSource>,
    pub completed_phase: bool,
    pub extended: Vec<(CardId, CompletedPhaseRef)>,
    pub discarded: Option<Card>,
    pub went_out: bool,
}

impl AiTurnReport {
    fn from_events<'a>(player: PlayerId, events: impl Iterator<Item = &'a GameEvent>) -> Self {
        let mut report = Self {
            player,
            drew_from: None,
            completed_phase: false,
            extended: Vec::new(),
            discarded: None,
            went_out: false,
        };
        for event in events {
            match *event {
                GameEvent::CardDrawn { player: p, source, .. } if p == player => {
                    report.drew_from.get_or_insert(source);
                }
                GameEvent::PhaseCompleted { player: p, .. } if p == player => {
                    report.completed_phase = true;
                }
                GameEvent::PhaseExtended {
                    player: p,
                    card,
                    reference,
                    ..
                } if p == player => report.extended.push((card, reference)),
                GameEvent::CardDiscarded { player: p, card } if p == player => {
                    report.discarded = Some(card);
                }
                GameEvent::WentOut { player: p } if p == player => report.went_out = true,
                _ => {}
            }
        }
        report
    }
}

/// Heuristic bot with its own seeded random stream.
#[derive(Clone, Debug)]
pub struct HeuristicAi {
    rng: GameRng,
    config: AiConfig,
}

impl HeuristicAi {
    #[must_use]
    pub fn new(seed: u64, config: AiConfig) -> Self {
        Self {
            rng: GameRng::new(seed),
            config,
        }
    }

    /// A bot using the game's AI configuration.
    #[must_use]
    pub fn for_game(game: &Game, seed: u64) -> Self {
        Self::new(seed, game.config().ai.clone())
    }

    #[must_use]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Pause before the current player's first step.
    #[must_use]
    pub fn opening_delay(&self, game: &Game) -> Duration {
        let history = game.history();
        let opens_round = history.len() >= 2
            && matches!(
                history.get(history.len() - 2),
                Some(GameEvent::RoundStarted { .. })
            );
        if opens_round {
            self.config.pacing.round_start
        } else {
            self.config.pacing.turn_start
        }
    }

    /// Run one step for the current player. Returns the next step, or
    /// `None` once the turn (or the round) is over.
    ///
    /// Fails with `NotAnAiSeat` when a human is to move; nothing is touched.
    pub fn step(&mut self, game: &mut Game, step: AiStep) -> Result<Option<AiStep>> {
        let player = game.current_player();
        if !game.current_player_is_ai() {
            return Err(TurnViolation::NotAnAiSeat(player).into());
        }
        match step {
            AiStep::Draw => {
                self.draw(game, player)?;
            }
            AiStep::AttemptPhase => {
                self.attempt_phase(game, player)?;
            }
            AiStep::AttemptExtension => {
                self.attempt_extension(game, player)?;
            }
            AiStep::Discard => {
                self.discard(game, player)?;
                return Ok(None);
            }
        }

        if game.is_over() || game.current_player() != player || !game.turn().has_drawn {
            return Ok(None);
        }
        let completed = game.players()[player].has_completed_phase;
        let next = match step {
            AiStep::Draw if completed => AiStep::AttemptExtension,
            AiStep::Draw => AiStep::AttemptPhase,
            AiStep::AttemptPhase if completed => AiStep::AttemptExtension,
            _ => AiStep::Discard,
        };
        Ok(Some(next))
    }

    /// Play the current player's whole turn.
    pub fn play_turn(&mut self, game: &mut Game) -> Result<AiTurnReport> {
        let player = game.current_player();
        let start = game.history().len();
        let mut next = Some(AiStep::Draw);
        while let Some(step) = next {
            next = self.step(game, step)?;
        }
        let history = game.history();
        Ok(AiTurnReport::from_events(
            player,
            (start..history.len()).filter_map(|i| history.get(i)),
        ))
    }

    /// Play turns while bots are to move, at most `max_turns` of them.
    /// Returns the number of turns played.
    pub fn play_until_human(&mut self, game: &mut Game, max_turns: usize) -> Result<usize> {
        let mut turns = 0;
        while turns < max_turns && !game.is_over() && game.current_player_is_ai() {
            self.play_turn(game)?;
            turns += 1;
        }
        Ok(turns)
    }

    fn draw(&mut self, game: &mut Game, player: PlayerId) -> Result<DrawSource> {
        let useful_top = match (game.discard_top(), game.current_phase_definition(player)) {
            (Some(top), Some(phase)) => is_useful(top, &game.players()[player].hand, phase),
            _ => false,
        };
        let source = if useful_top && self.rng.gen_bool(self.config.discard_draw_probability) {
            DrawSource::Discard
        } else {
            DrawSource::Deck
        };

        match game.draw(player, source) {
            Err(GameError::EmptyResourceAccess(DrawSource::Deck)) if game.discard_top().is_some() => {
                log::debug!("{} falls back to the discard pile", player);
                game.draw(player, DrawSource::Discard)?;
                Ok(DrawSource::Discard)
            }
            other => other.map(|_| source),
        }
    }

    fn attempt_phase(&mut self, game: &mut Game, player: PlayerId) -> Result<bool> {
        if game.players()[player].has_completed_phase {
            return Ok(false);
        }
        let Some(phase) = game.current_phase_definition(player) else {
            return Ok(false);
        };
        let Some(arrangement) = find_arrangement(&game.players()[player].hand, phase) else {
            return Ok(false);
        };
        if !validate_phase(&arrangement.group1, &arrangement.group2, phase) {
            return Ok(false);
        }

        let groups = [
            (GroupSlot::First, &arrangement.group1),
            (GroupSlot::Second, &arrangement.group2),
        ];
        for (slot, cards) in groups {
            for card in cards {
                if let Err(err) = game.move_to_phase_builder(player, card.id, slot) {
                    log::debug!("{} abandons its arrangement: {}", player, err);
                    unstage(game, player)?;
                    return Ok(false);
                }
            }
        }
        game.complete_phase(player)?;
        Ok(true)
    }

    fn attempt_extension(
        &mut self,
        game: &mut Game,
        player: PlayerId,
    ) -> Result<Option<(CardId, CompletedPhaseRef)>> {
        if !game.players()[player].has_completed_phase {
            return Ok(None);
        }
        let hand = game.players()[player].hand.clone();
        let refs: Vec<CompletedPhaseRef> = game.completed_phase_refs().collect();

        for reference in refs {
            let target = game.completed_phases()[reference.index].clone();
            for card in &hand {
                let slot = GroupSlot::BOTH.into_iter().find(|&slot| {
                    !target.group(slot).is_empty() && target.accepts(card, slot).is_ok()
                });
                if let Some(slot) = slot {
                    game.extend_completed_phase(player, card.id, reference, slot)?;
                    return Ok(Some((card.id, reference)));
                }
            }
        }
        Ok(None)
    }

    fn discard(&mut self, game: &mut Game, player: PlayerId) -> Result<()> {
        let phase = game.current_phase_definition(player);
        let Some(card) = choose_discard(&game.players()[player].hand, phase) else {
            return Ok(());
        };
        if game.turn().selected != Some(card) {
            game.select_for_discard(player, card)?;
        }
        game.discard(player)
    }
}

fn unstage(game: &mut Game, player: PlayerId) -> Result<()> {
    let staged: Vec<CardId> = game.phase_builder().cards().map(|c| c.id).collect();
    for card in staged {
        game.move_from_phase_builder(player, card)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardKind, Color};
    use crate::game::GameBuilder;

    const P0: PlayerId = PlayerId(0);
    const P1: PlayerId = PlayerId(1);

    fn n(value: u8, color: Color) -> CardKind {
        CardKind::Number { value, color }
    }

    fn bots(count: usize, seed: u64) -> Game {
        GameBuilder::new()
            .ai_players(count)
            .randomize_phase_order(false)
            .build(seed)
            .unwrap()
    }

    fn always_take_discard() -> AiConfig {
        AiConfig::default().with_discard_draw_probability(1.0)
    }

    #[test]
    fn test_step_delays() {
        let pacing = AiPacing::default();
        assert_eq!(AiStep::Draw.delay(&pacing), Duration::from_millis(1500));
        assert_eq!(AiStep::AttemptPhase.delay(&pacing), Duration::from_millis(800));
        assert_eq!(AiStep::AttemptExtension.delay(&pacing), Duration::from_millis(500));
        assert_eq!(AiStep::Discard.delay(&pacing), Duration::from_millis(1000));
    }

    #[test]
    fn test_opening_delay_at_round_start() {
        let mut game = bots(2, 1);
        let mut ai = HeuristicAi::for_game(&game, 1);
        assert_eq!(ai.opening_delay(&game), Duration::from_millis(2000));
        ai.play_turn(&mut game).unwrap();
        if game.round() == 1 {
            assert_eq!(ai.opening_delay(&game), Duration::from_millis(1500));
        }
    }

    #[test]
    fn test_takes_useful_discard() {
        let mut game = bots(2, 2);
        game.rig_hand(P0, &[n(7, Color::Red), n(7, Color::Blue), n(2, Color::Green)]);
        game.rig_discard_top(n(7, Color::Green));
        let mut ai = HeuristicAi::new(2, always_take_discard());

        let next = ai.step(&mut game, AiStep::Draw).unwrap();
        assert_eq!(next, Some(AiStep::AttemptPhase));
        assert_eq!(
            game.history().last(),
            Some(&GameEvent::CardDrawn {
                player: P0,
                source: DrawSource::Discard,
                card: game.players()[P0].hand.last().copied(),
            })
        );
    }

    #[test]
    fn test_ignores_useless_discard() {
        let mut game = bots(2, 3);
        game.rig_hand(P0, &[n(7, Color::Red), n(7, Color::Blue), n(2, Color::Green)]);
        game.rig_discard_top(n(11, Color::Green));
        let mut ai = HeuristicAi::new(3, always_take_discard());

        ai.step(&mut game, AiStep::Draw).unwrap();
        assert!(matches!(
            game.history().last(),
            Some(GameEvent::CardDrawn {
                source: DrawSource::Deck,
                ..
            })
        ));
    }

    #[test]
    fn test_completes_phase_then_discards() {
        let mut game = bots(2, 4);
        game.rig_hand(
            P0,
            &[
                n(5, Color::Red),
                n(5, Color::Blue),
                n(5, Color::Green),
                n(9, Color::Red),
                n(9, Color::Blue),
                n(9, Color::Green),
                n(12, Color::Yellow),
                n(1, Color::Yellow),
            ],
        );
        game.rig_draw_top(n(3, Color::Red));
        let mut ai = HeuristicAi::new(4, AiConfig::default().with_discard_draw_probability(0.0));

        let report = ai.play_turn(&mut game).unwrap();
        assert_eq!(report.player, P0);
        assert_eq!(report.drew_from, Some(DrawSource::Deck));
        assert!(report.completed_phase);
        assert!(!report.went_out);
        assert!(game.players()[P0].has_completed_phase);
        assert_eq!(game.completed_phases().len(), 1);
        // 12 is the costliest leftover.
        assert_eq!(report.discarded.and_then(|c| c.value()), Some(12));
        assert_eq!(game.current_player(), P1);
        assert_eq!(game.players()[P0].hand.len(), 2);
    }

    #[test]
    fn test_extends_one_card_per_turn() {
        let mut game = bots(2, 5);
        game.rig_hand(
            P0,
            &[
                n(5, Color::Red),
                n(5, Color::Blue),
                n(5, Color::Green),
                n(9, Color::Red),
                n(9, Color::Blue),
                n(9, Color::Green),
                n(5, Color::Yellow),
                n(9, Color::Yellow),
                n(12, Color::Red),
            ],
        );
        game.rig_draw_top(n(1, Color::Red));
        let mut ai = HeuristicAi::new(5, AiConfig::default().with_discard_draw_probability(0.0));

        let report = ai.play_turn(&mut game).unwrap();
        assert!(report.completed_phase);
        assert_eq!(report.extended.len(), 1);
        assert_eq!(game.players()[P0].hand.len(), 2);
    }

    #[test]
    fn test_goes_out_by_completing() {
        let mut game = bots(2, 6);
        game.rig_hand(
            P0,
            &[
                n(5, Color::Red),
                n(5, Color::Blue),
                n(5, Color::Green),
                n(9, Color::Red),
                n(9, Color::Blue),
            ],
        );
        game.rig_discard_top(n(9, Color::Green));
        let mut ai = HeuristicAi::new(6, always_take_discard());

        let report = ai.play_turn(&mut game).unwrap();
        assert!(report.completed_phase);
        assert!(report.went_out);
        assert_eq!(report.discarded, None);
        assert_eq!(game.round(), 2);
        assert_eq!(game.players()[P0].current_phase, 2);
    }

    #[test]
    fn test_draw_falls_back_to_discard_pile() {
        let mut game = bots(2, 7);
        game.move_piles_to_hand(P1, true);
        let top = *game.discard_top().unwrap();
        assert_eq!(game.draw_pile_len(), 0);

        let mut ai = HeuristicAi::new(7, AiConfig::default().with_discard_draw_probability(0.0));
        ai.step(&mut game, AiStep::Draw).unwrap();
        assert!(game.turn().has_drawn);
        assert!(game.players()[P0].hand.contains(&top));
        assert!(game.discard_pile().is_empty());
    }

    #[test]
    fn test_refuses_to_play_a_human_seat() {
        let mut game = GameBuilder::new().human("Ada").ai_players(1).build(3).unwrap();
        let mut ai = HeuristicAi::for_game(&game, 3);
        let before = game.snapshot();

        assert_eq!(
            ai.play_turn(&mut game),
            Err(GameError::TurnOrderViolation(TurnViolation::NotAnAiSeat(P0)))
        );
        for step in [AiStep::Draw, AiStep::AttemptPhase, AiStep::Discard] {
            assert!(ai.step(&mut game, step).is_err());
        }
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_play_until_human_stops_at_human() {
        let mut game = GameBuilder::new()
            .human("Ada")
            .ai_players(2)
            .build(8)
            .unwrap();
        let mut ai = HeuristicAi::for_game(&game, 8);
        assert_eq!(ai.play_until_human(&mut game, 10).unwrap(), 0);

        game.draw(P0, DrawSource::Deck).unwrap();
        let card = game.players()[P0].hand[0].id;
        game.select_for_discard(P0, card).unwrap();
        game.discard(P0).unwrap();

        let turns = ai.play_until_human(&mut game, 10).unwrap();
        assert!(turns >= 1);
        assert!(game.is_over() || game.current_player() == P0 || turns == 10);
    }
}
