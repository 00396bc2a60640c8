//! The game aggregate.
//!
//! [`Game`] owns every card and every player. Humans and the AI drive it
//! through the same methods, each of which either applies completely or
//! returns a [`GameError`] without touching anything.
//!
//! ## Turn gates
//!
//! Every operation first checks, in order: the game is not over, the caller
//! is the current player, and (for everything except drawing) a card has
//! been drawn this turn.
//!
//! ## Events
//!
//! Milestones are appended to an `im::Vector` history. [`Game::drain_events`]
//! hands out whatever was recorded since the previous call.

use smallvec::SmallVec;

use super::audit::{CardAudit, CardLocation};
use super::events::GameEvent;
use super::round::{score_round, select_winner, standings, GameOutcome};
use super::snapshot::GameSnapshot;
use super::turn::{DrawSource, TurnState};
use crate::cards::{build_deck, reshuffle, Card, CardId};
use crate::core::{
    GameConfig, GameError, GameRng, InvalidReference, PhaseFailure, Player, PlayerId, PlayerMap,
    Result, TurnViolation,
};
use crate::phases::validation::{fits_partial, validate_phase};
use crate::phases::{
    CompletedPhase, CompletedPhaseRef, GroupSlot, PhaseBuilder, PhaseDefinition, PhaseOrder,
};

/// Message shown once the current player has laid down their phase.
pub const PHASE_COMPLETED_HINT: &str =
    "Phase completed! Discard cards to go out or add to other phases.";

#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    players: PlayerMap<Player>,
    phase_order: PhaseOrder,
    current: PlayerId,
    round: u32,
    draw_pile: Vec<Card>,
    /// Top of the pile is the last element.
    discard_pile: Vec<Card>,
    builder: PhaseBuilder,
    completed: im::Vector<CompletedPhase>,
    turn: TurnState,
    outcome: Option<GameOutcome>,
    /// Full game log, never trimmed.
    history: im::Vector<GameEvent>,
    /// How much of `history` `drain_events` has handed out.
    drained: usize,
    tick: u64,
    rng: GameRng,
}

impl Game {
    /// Start a game with `player_names` as humans followed by `ai_count`
    /// bots, seeded from system entropy.
    pub fn new_game<S: Into<String>>(
        player_names: impl IntoIterator<Item = S>,
        ai_count: usize,
    ) -> Result<Self> {
        super::GameBuilder::new()
            .humans(player_names)
            .ai_players(ai_count)
            .build(rand::random())
    }

    /// Seat `(name, is_ai)` pairs in order and deal the first round.
    pub fn from_seats(seats: Vec<(String, bool)>, config: GameConfig, seed: u64) -> Result<Self> {
        config.validate(seats.len())?;

        let root = GameRng::new(seed);
        let phase_order = if config.randomize_phase_order {
            PhaseOrder::shuffled(&mut root.for_context("phase-order"))
        } else {
            PhaseOrder::standard()
        };
        let players = PlayerMap::new(seats.len(), |id| {
            let (name, is_ai) = &seats[id.index()];
            Player::new(id, name.clone(), *is_ai)
        });

        let mut game = Self {
            config,
            players,
            phase_order,
            current: PlayerId::new(0),
            round: 0,
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            builder: PhaseBuilder::default(),
            completed: im::Vector::new(),
            turn: TurnState::default(),
            outcome: None,
            history: im::Vector::new(),
            drained: 0,
            tick: 0,
            rng: root.for_context("deck"),
        };
        log::info!(
            "new game: {} players, seed {}, phase order {:?}",
            game.players.player_count(),
            seed,
            game.phase_order.ordinals()
        );
        game.start_round();
        Ok(game)
    }

    // ------------------------------------------------------------------
    // Round lifecycle
    // ------------------------------------------------------------------

    fn start_round(&mut self) {
        self.round += 1;
        self.current = PlayerId::new(0);
        self.turn.reset();
        self.builder = PhaseBuilder::default();
        self.completed.clear();
        for (_, player) in self.players.iter_mut() {
            player.hand.clear();
        }

        let mut deck = build_deck(&mut self.rng);
        for _ in 0..self.config.hand_size {
            for (_, player) in self.players.iter_mut() {
                if let Some(card) = deck.pop() {
                    player.hand.push(card);
                }
            }
        }
        self.discard_pile = deck.pop().into_iter().collect();
        self.draw_pile = deck;

        log::info!("round {} started", self.round);
        self.emit(GameEvent::RoundStarted {
            round: self.round,
            first_player: self.current,
        });
        self.emit(GameEvent::TurnStarted {
            player: self.current,
            is_ai: self.players[self.current].is_ai,
        });
    }

    fn end_round(&mut self) {
        let round_scores = score_round(&mut self.players);
        log::info!("round {} ended, penalties {:?}", self.round, round_scores);
        self.emit(GameEvent::RoundEnded {
            round: self.round,
            round_scores,
        });

        match select_winner(&self.players) {
            Some(winner) => {
                let final_scores: Vec<u32> = self.players.values().map(|p| p.score).collect();
                log::info!("{} wins with {} points", winner, self.players[winner].score);
                self.emit(GameEvent::GameWon {
                    winner,
                    final_scores: final_scores.clone(),
                });
                self.outcome = Some(GameOutcome {
                    winner,
                    final_scores,
                    standings: standings(&self.players),
                });
            }
            None => self.start_round(),
        }
    }

    fn go_out(&mut self, player: PlayerId) {
        log::info!("{} went out", player);
        self.emit(GameEvent::WentOut { player });
        self.end_round();
    }

    fn begin_turn(&mut self, next: PlayerId) {
        self.current = next;
        self.turn.reset();
        log::debug!("turn passes to {}", next);
        self.emit(GameEvent::TurnStarted {
            player: next,
            is_ai: self.players[next].is_ai,
        });
    }

    /// Wrap up the current player's turn after `discarded` hit the pile.
    fn finish_turn(&mut self, discarded: Card) {
        let player = self.current;
        let staged = self.builder.take_all();
        self.players[player].hand.extend(staged);

        if self.players[player].hand.is_empty() {
            self.go_out(player);
            return;
        }

        let count = self.players.player_count();
        if discarded.is_skip() {
            let skipped = player.after(1, count);
            let extra_turn = count == 2;
            log::info!("{} skips {}", player, skipped);
            self.emit(GameEvent::PlayerSkipped {
                by: player,
                skipped,
                extra_turn,
            });
            self.begin_turn(player.after(2, count));
        } else {
            self.begin_turn(player.after(1, count));
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.tick += 1;
        self.history.push_back(event);
    }

    // ------------------------------------------------------------------
    // Gates
    // ------------------------------------------------------------------

    fn ensure_turn(&self, player: PlayerId) -> Result<()> {
        if self.outcome.is_some() {
            return Err(TurnViolation::GameOver.into());
        }
        if player != self.current {
            return Err(TurnViolation::NotYourTurn {
                actor: player,
                current: self.current,
            }
            .into());
        }
        Ok(())
    }

    fn ensure_drawn(&self, player: PlayerId) -> Result<()> {
        self.ensure_turn(player)?;
        if !self.turn.has_drawn {
            return Err(TurnViolation::MustDrawFirst.into());
        }
        Ok(())
    }

    fn active_definition(&self, player: PlayerId) -> Result<&'static PhaseDefinition> {
        self.current_phase_definition(player)
            .ok_or(GameError::TurnOrderViolation(TurnViolation::GameOver))
    }

    fn hand_position(&self, player: PlayerId, card: CardId) -> Result<usize> {
        self.players[player]
            .position_of(card)
            .ok_or_else(|| InvalidReference::NotInHand(card).into())
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Draw the top card of `source` into the player's hand.
    ///
    /// An empty draw pile is refilled from the discard pile first. If that
    /// leaves it empty the draw fails with `EmptyResourceAccess`.
    pub fn draw(&mut self, player: PlayerId, source: DrawSource) -> Result<Card> {
        self.ensure_turn(player)?;
        if self.turn.has_drawn {
            return Err(TurnViolation::AlreadyDrawn.into());
        }

        let card = match source {
            DrawSource::Deck => {
                if self.draw_pile.is_empty()
                    && reshuffle(&mut self.draw_pile, &mut self.discard_pile, &mut self.rng)
                {
                    let cards = self.draw_pile.len();
                    self.emit(GameEvent::DeckReshuffled { cards });
                }
                self.draw_pile.pop()
            }
            DrawSource::Discard => self.discard_pile.pop(),
        }
        .ok_or(GameError::EmptyResourceAccess(source))?;

        self.players[player].hand.push(card);
        self.turn.mark_drawn();
        log::debug!("{} drew {} from the {}", player, card, source);
        self.emit(GameEvent::CardDrawn {
            player,
            source,
            card: (source == DrawSource::Discard).then_some(card),
        });
        Ok(card)
    }

    /// Choose the card to end the turn with. Choosing the selected card
    /// again clears the choice.
    pub fn select_for_discard(&mut self, player: PlayerId, card: CardId) -> Result<()> {
        self.ensure_drawn(player)?;
        self.hand_position(player, card)?;
        self.turn.toggle_selection(card);
        Ok(())
    }

    /// Discard the selected card and pass the turn.
    pub fn discard(&mut self, player: PlayerId) -> Result<()> {
        self.ensure_drawn(player)?;
        let selected = self
            .turn
            .selected
            .ok_or(TurnViolation::NoDiscardSelected)?;
        let pos = self.hand_position(player, selected)?;

        let card = self.players[player].hand.remove(pos);
        self.discard_pile.push(card);
        log::debug!("{} discarded {}", player, card);
        self.emit(GameEvent::CardDiscarded { player, card });
        self.finish_turn(card);
        Ok(())
    }

    /// End the turn. Requires a card selected for discard.
    pub fn end_turn(&mut self, player: PlayerId) -> Result<()> {
        self.discard(player)
    }

    /// Stage a hand card in one of the phase builder groups.
    ///
    /// Rejected if the group could no longer form its requirement with the
    /// card added. Single-group phases treat both groups as one.
    pub fn move_to_phase_builder(
        &mut self,
        player: PlayerId,
        card: CardId,
        group: GroupSlot,
    ) -> Result<()> {
        self.ensure_drawn(player)?;
        if self.players[player].has_completed_phase {
            return Err(TurnViolation::PhaseAlreadyCompleted.into());
        }
        let pos = self.hand_position(player, card)?;
        let definition = self.active_definition(player)?;
        let candidate = self.players[player].hand[pos];

        let fits = if definition.is_single_group() {
            let staged: SmallVec<[Card; 16]> = self.builder.cards().copied().collect();
            definition
                .requirement(GroupSlot::First)
                .is_some_and(|req| fits_partial(&staged, &candidate, req))
        } else {
            definition
                .requirement(group)
                .is_some_and(|req| fits_partial(self.builder.group(group), &candidate, req))
        };
        if !fits {
            return Err(PhaseFailure::CardDoesNotFit { card, group }.into());
        }

        self.players[player].hand.remove(pos);
        self.builder.push(group, candidate);
        self.turn.forget(card);
        log::debug!("{} staged {} in group {}", player, candidate, group);
        Ok(())
    }

    /// Return a staged card to the hand.
    pub fn move_from_phase_builder(&mut self, player: PlayerId, card: CardId) -> Result<()> {
        self.ensure_drawn(player)?;
        let (_, staged) = self
            .builder
            .remove(card)
            .ok_or(InvalidReference::NotInPhaseBuilder(card))?;
        self.players[player].hand.push(staged);
        log::debug!("{} took {} back", player, staged);
        Ok(())
    }

    /// Lay down the staged groups as the player's phase for this round.
    pub fn complete_phase(&mut self, player: PlayerId) -> Result<()> {
        self.ensure_drawn(player)?;
        if self.players[player].has_completed_phase {
            return Err(TurnViolation::PhaseAlreadyCompleted.into());
        }
        let definition = self.active_definition(player)?;
        let position = self.players[player].current_phase;
        if !validate_phase(&self.builder.group1, &self.builder.group2, definition) {
            return Err(PhaseFailure::Unsatisfied { phase: position }.into());
        }

        if definition.is_single_group() {
            self.builder.consolidate();
        }
        let staged = std::mem::take(&mut self.builder);
        let reference = CompletedPhaseRef::new(self.round, self.completed.len());
        self.completed.push_back(CompletedPhase {
            owner: player,
            phase_position: position,
            phase_ordinal: definition.ordinal,
            group1: staged.group1,
            group2: staged.group2,
            completed_at_tick: self.tick,
        });

        let seat = &mut self.players[player];
        seat.has_completed_phase = true;
        seat.completed_phases.push(position);
        log::info!(
            "{} completed phase {} ({})",
            player,
            position,
            definition.description
        );
        self.emit(GameEvent::PhaseCompleted {
            player,
            phase_position: position,
            phase_ordinal: definition.ordinal,
            reference,
        });

        if self.players[player].hand.is_empty() {
            self.go_out(player);
        }
        Ok(())
    }

    /// Append a hand card to a group of any phase on the table.
    ///
    /// The player must have completed their own phase this round.
    pub fn extend_completed_phase(
        &mut self,
        player: PlayerId,
        card: CardId,
        target: CompletedPhaseRef,
        group: GroupSlot,
    ) -> Result<()> {
        self.ensure_drawn(player)?;
        if !self.players[player].has_completed_phase {
            return Err(TurnViolation::PhaseNotCompleted.into());
        }
        if target.round != self.round || target.index >= self.completed.len() {
            return Err(InvalidReference::UnknownCompletedPhase(target).into());
        }
        let pos = self.hand_position(player, card)?;
        let candidate = self.players[player].hand[pos];
        self.completed[target.index].accepts(&candidate, group)?;

        self.players[player].hand.remove(pos);
        self.completed[target.index].append(candidate, group);
        self.turn.forget(card);
        log::debug!("{} added {} to {}", player, candidate, target);
        self.emit(GameEvent::PhaseExtended {
            player,
            card,
            reference: target,
            group,
        });

        if self.players[player].hand.is_empty() {
            self.go_out(player);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn current_player_is_ai(&self) -> bool {
        self.players[self.current].is_ai
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// 1-based round counter.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn phase_order(&self) -> &PhaseOrder {
        &self.phase_order
    }

    #[must_use]
    pub fn phase_builder(&self) -> &PhaseBuilder {
        &self.builder
    }

    #[must_use]
    pub fn completed_phases(&self) -> &im::Vector<CompletedPhase> {
        &self.completed
    }

    /// References to this round's completed phases, in completion order.
    pub fn completed_phase_refs(&self) -> impl Iterator<Item = CompletedPhaseRef> + '_ {
        (0..self.completed.len()).map(move |index| CompletedPhaseRef::new(self.round, index))
    }

    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    #[must_use]
    pub fn discard_top(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Events recorded so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The phase `player` is working on. `None` once they are past phase ten
    /// or for an unknown seat.
    #[must_use]
    pub fn current_phase_definition(&self, player: PlayerId) -> Option<&'static PhaseDefinition> {
        let position = self.players.get(player)?.current_phase;
        self.phase_order.definition_at(position)
    }

    /// Would [`Game::complete_phase`] succeed for `player` right now?
    #[must_use]
    pub fn can_complete_phase(&self, player: PlayerId) -> bool {
        if self.ensure_drawn(player).is_err() || self.players[player].has_completed_phase {
            return false;
        }
        self.current_phase_definition(player)
            .is_some_and(|def| validate_phase(&self.builder.group1, &self.builder.group2, def))
    }

    /// Instruction line for `player`'s current phase.
    #[must_use]
    pub fn phase_hint(&self, player: PlayerId) -> Option<String> {
        let seat = self.players.get(player)?;
        if seat.has_completed_phase {
            return Some(PHASE_COMPLETED_HINT.to_string());
        }
        self.current_phase_definition(player)
            .map(|def| def.hint(seat.current_phase))
    }

    /// Every event since the game began, drained or not.
    ///
    /// Grows by a handful of events per turn for the life of the game.
    #[must_use]
    pub fn history(&self) -> &im::Vector<GameEvent> {
        &self.history
    }

    /// Events recorded since the previous call. The log itself keeps them.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        let fresh: Vec<GameEvent> = (self.drained..self.history.len())
            .filter_map(|i| self.history.get(i).cloned())
            .collect();
        self.drained = self.history.len();
        fresh
    }

    /// Read-only view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    /// Where every card currently is.
    #[must_use]
    pub fn audit(&self) -> CardAudit {
        let mut audit = CardAudit::default();
        audit.record(CardLocation::DrawPile, &self.draw_pile);
        audit.record(CardLocation::DiscardPile, &self.discard_pile);
        for (id, player) in self.players.iter() {
            audit.record(CardLocation::Hand(id), &player.hand);
        }
        audit.record(CardLocation::PhaseBuilder, &self.builder.group1);
        audit.record(CardLocation::PhaseBuilder, &self.builder.group2);
        for (index, phase) in self.completed.iter().enumerate() {
            let reference = CompletedPhaseRef::new(self.round, index);
            audit.record(CardLocation::CompletedPhase(reference), &phase.group1);
            audit.record(CardLocation::CompletedPhase(reference), &phase.group2);
        }
        audit
    }
}

/// Fixtures for arranging specific hands in engine tests.
#[cfg(test)]
impl Game {
    /// Replace `player`'s hand with cards of the given kinds, pulled from
    /// the draw pile or swapped out of other hands. Cards stay conserved.
    pub(crate) fn rig_hand(&mut self, player: PlayerId, kinds: &[crate::cards::CardKind]) {
        let old = std::mem::take(&mut self.players[player].hand);
        self.draw_pile.extend(old);
        for kind in kinds {
            let card = self.take_kind(*kind, player);
            self.players[player].hand.push(card);
        }
    }

    /// Put a card of `kind` on top of the discard pile.
    pub(crate) fn rig_discard_top(&mut self, kind: crate::cards::CardKind) {
        let card = self.take_kind(kind, self.current);
        self.discard_pile.push(card);
    }

    /// Put a card of `kind` on top of the draw pile.
    pub(crate) fn rig_draw_top(&mut self, kind: crate::cards::CardKind) {
        let card = self.take_kind(kind, self.current);
        self.draw_pile.push(card);
    }

    pub(crate) fn set_phase_position(&mut self, player: PlayerId, position: u8) {
        self.players[player].current_phase = position;
    }

    pub(crate) fn clear_draw_pile_into_discard(&mut self) {
        let top = self.discard_pile.pop();
        self.discard_pile.append(&mut self.draw_pile);
        self.discard_pile.extend(top);
    }

    /// Move the draw pile and the discard pile into `player`'s hand,
    /// optionally leaving the discard top where it is.
    pub(crate) fn move_piles_to_hand(&mut self, player: PlayerId, keep_discard_top: bool) {
        let top = if keep_discard_top {
            self.discard_pile.pop()
        } else {
            None
        };
        let mut cards = std::mem::take(&mut self.draw_pile);
        cards.append(&mut self.discard_pile);
        self.players[player].hand.extend(cards);
        self.discard_pile.extend(top);
    }

    fn take_kind(&mut self, kind: crate::cards::CardKind, keep: PlayerId) -> Card {
        if let Some(pos) = self.draw_pile.iter().position(|c| c.kind == kind) {
            return self.draw_pile.remove(pos);
        }
        if let Some(pos) = self.discard_pile.iter().position(|c| c.kind == kind) {
            let card = self.discard_pile.remove(pos);
            let filler = self.draw_pile.pop().expect("draw pile has a filler card");
            self.discard_pile.insert(pos, filler);
            return card;
        }
        for (id, seat) in self.players.iter_mut() {
            if id == keep {
                continue;
            }
            if let Some(pos) = seat.hand.iter().position(|c| c.kind == kind) {
                let card = seat.hand.remove(pos);
                let filler = self.draw_pile.pop().expect("draw pile has a filler card");
                seat.hand.push(filler);
                return card;
            }
        }
        panic!("no free card of kind {:?}", kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardKind, Color, DECK_SIZE};
    use crate::game::turn::TurnPhase;
    use crate::game::GameBuilder;

    const P0: PlayerId = PlayerId(0);
    const P1: PlayerId = PlayerId(1);
    const P2: PlayerId = PlayerId(2);

    fn n(value: u8, color: Color) -> CardKind {
        CardKind::Number { value, color }
    }

    fn game(players: usize, seed: u64) -> Game {
        GameBuilder::new()
            .humans((0..players).map(|i| format!("P{}", i)))
            .randomize_phase_order(false)
            .build(seed)
            .unwrap()
    }

    fn card_of(game: &Game, player: PlayerId, kind: CardKind) -> CardId {
        game.players[player]
            .hand
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.id)
            .unwrap()
    }

    fn assert_conserved(game: &Game) {
        let audit = game.audit();
        assert!(audit.is_conserved(), "{:?}", audit);
        assert_eq!(audit.total(), DECK_SIZE);
    }

    /// Draw, then discard the first non-skip card in hand.
    fn plain_turn(game: &mut Game) {
        let player = game.current_player();
        game.draw(player, DrawSource::Deck).unwrap();
        let card = game.players[player]
            .hand
            .iter()
            .find(|c| !c.is_skip())
            .map(|c| c.id)
            .unwrap();
        game.select_for_discard(player, card).unwrap();
        game.discard(player).unwrap();
    }

    #[test]
    fn test_new_game_deals_hands() {
        let game = game(3, 1);
        assert_eq!(game.round(), 1);
        assert_eq!(game.current_player(), P0);
        for player in game.players().values() {
            assert_eq!(player.hand.len(), 10);
            assert_eq!(player.current_phase, 1);
        }
        assert_eq!(game.discard_pile().len(), 1);
        assert_eq!(game.draw_pile_len(), DECK_SIZE - 31);
        assert_conserved(&game);
    }

    #[test]
    fn test_invalid_player_counts() {
        let err = GameBuilder::new().human("Solo").build(1).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
        let err = GameBuilder::new().ai_players(7).build(1).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_discard_before_draw_is_rejected() {
        let mut game = game(2, 2);
        let hand_before = game.players[P0].hand.clone();
        let discard_before = game.discard_pile().to_vec();
        let card = hand_before[0].id;

        let err = game.select_for_discard(P0, card).unwrap_err();
        assert_eq!(err, GameError::TurnOrderViolation(TurnViolation::MustDrawFirst));
        let err = game.discard(P0).unwrap_err();
        assert_eq!(err, GameError::TurnOrderViolation(TurnViolation::MustDrawFirst));

        assert_eq!(game.players[P0].hand, hand_before);
        assert_eq!(game.discard_pile(), discard_before.as_slice());
    }

    #[test]
    fn test_second_draw_is_rejected() {
        let mut game = game(2, 3);
        game.draw(P0, DrawSource::Deck).unwrap();
        let err = game.draw(P0, DrawSource::Discard).unwrap_err();
        assert_eq!(err, GameError::TurnOrderViolation(TurnViolation::AlreadyDrawn));
        assert_eq!(game.players[P0].hand.len(), 11);
    }

    #[test]
    fn test_only_current_player_may_act() {
        let mut game = game(3, 4);
        let err = game.draw(P1, DrawSource::Deck).unwrap_err();
        assert_eq!(
            err,
            GameError::TurnOrderViolation(TurnViolation::NotYourTurn {
                actor: P1,
                current: P0
            })
        );
    }

    #[test]
    fn test_discard_requires_selection() {
        let mut game = game(2, 5);
        game.draw(P0, DrawSource::Deck).unwrap();
        let err = game.end_turn(P0).unwrap_err();
        assert_eq!(
            err,
            GameError::TurnOrderViolation(TurnViolation::NoDiscardSelected)
        );
    }

    #[test]
    fn test_turn_passes_in_seat_order() {
        let mut game = game(3, 6);
        game.rig_hand(P0, &[n(1, Color::Red), n(2, Color::Red), n(3, Color::Red)]);
        game.rig_draw_top(n(4, Color::Red));

        plain_turn(&mut game);
        assert_eq!(game.current_player(), P1);
        assert_eq!(game.turn().phase, TurnPhase::Draw);
        assert_eq!(game.discard_top().map(|c| c.value()), Some(Some(1)));
        assert_conserved(&game);
    }

    #[test]
    fn test_drawing_from_discard_takes_top() {
        let mut game = game(2, 7);
        let top = *game.discard_top().unwrap();
        let drawn = game.draw(P0, DrawSource::Discard).unwrap();
        assert_eq!(drawn, top);
        assert!(game.discard_pile().is_empty());
        assert!(game.players[P0].hand.contains(&top));
    }

    #[test]
    fn test_skip_in_two_player_game_repeats_turn() {
        let mut game = game(2, 8);
        game.rig_hand(P0, &[CardKind::Skip, n(5, Color::Red), n(7, Color::Blue)]);
        game.draw(P0, DrawSource::Deck).unwrap();
        let skip = card_of(&game, P0, CardKind::Skip);
        game.select_for_discard(P0, skip).unwrap();
        game.drain_events();
        game.discard(P0).unwrap();

        assert_eq!(game.current_player(), P0);
        assert!(!game.turn().has_drawn);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::PlayerSkipped {
            by: P0,
            skipped: P1,
            extra_turn: true
        }));
    }

    #[test]
    fn test_skip_in_three_player_game() {
        let mut game = game(3, 9);
        game.rig_hand(P0, &[CardKind::Skip, n(5, Color::Red), n(7, Color::Blue)]);
        game.draw(P0, DrawSource::Deck).unwrap();
        let skip = card_of(&game, P0, CardKind::Skip);
        game.select_for_discard(P0, skip).unwrap();
        game.discard(P0).unwrap();

        assert_eq!(game.current_player(), P2);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::PlayerSkipped {
            by: P0,
            skipped: P1,
            extra_turn: false
        }));
        assert_conserved(&game);
    }

    #[test]
    fn test_builder_rejects_misfit_and_keeps_state() {
        let mut game = game(2, 10);
        game.rig_hand(
            P0,
            &[n(5, Color::Red), n(5, Color::Blue), n(8, Color::Green), CardKind::Skip],
        );
        game.draw(P0, DrawSource::Deck).unwrap();

        let five = card_of(&game, P0, n(5, Color::Red));
        let eight = card_of(&game, P0, n(8, Color::Green));
        let skip = card_of(&game, P0, CardKind::Skip);
        game.move_to_phase_builder(P0, five, GroupSlot::First).unwrap();

        let hand_before = game.players[P0].hand.clone();
        let err = game
            .move_to_phase_builder(P0, eight, GroupSlot::First)
            .unwrap_err();
        assert_eq!(
            err,
            GameError::PhaseValidationFailure(PhaseFailure::CardDoesNotFit {
                card: eight,
                group: GroupSlot::First
            })
        );
        assert!(game
            .move_to_phase_builder(P0, skip, GroupSlot::Second)
            .is_err());
        assert_eq!(game.players[P0].hand, hand_before);
        assert_eq!(game.phase_builder().len(), 1);

        game.move_to_phase_builder(P0, eight, GroupSlot::Second).unwrap();
        game.move_from_phase_builder(P0, eight).unwrap();
        assert!(game.players[P0].hand.iter().any(|c| c.id == eight));
        assert_conserved(&game);
    }

    #[test]
    fn test_staged_cards_return_to_hand_at_turn_end() {
        let mut game = game(2, 11);
        game.rig_hand(P0, &[n(5, Color::Red), n(5, Color::Blue), n(9, Color::Green)]);
        game.rig_draw_top(n(2, Color::Yellow));
        game.draw(P0, DrawSource::Deck).unwrap();

        let red = card_of(&game, P0, n(5, Color::Red));
        let blue = card_of(&game, P0, n(5, Color::Blue));
        let nine = card_of(&game, P0, n(9, Color::Green));
        game.move_to_phase_builder(P0, red, GroupSlot::First).unwrap();
        game.move_to_phase_builder(P0, blue, GroupSlot::First).unwrap();
        game.select_for_discard(P0, nine).unwrap();
        game.discard(P0).unwrap();

        assert!(game.phase_builder().is_empty());
        assert_eq!(game.players[P0].hand.len(), 3);
        assert_eq!(game.current_player(), P1);
        assert_conserved(&game);
    }

    #[test]
    fn test_incomplete_phase_is_rejected() {
        let mut game = game(2, 12);
        game.rig_hand(P0, &[n(5, Color::Red), n(5, Color::Blue), n(8, Color::Red)]);
        game.draw(P0, DrawSource::Deck).unwrap();
        let red = card_of(&game, P0, n(5, Color::Red));
        game.move_to_phase_builder(P0, red, GroupSlot::First).unwrap();

        assert!(!game.can_complete_phase(P0));
        let err = game.complete_phase(P0).unwrap_err();
        assert_eq!(
            err,
            GameError::PhaseValidationFailure(PhaseFailure::Unsatisfied { phase: 1 })
        );
        assert_eq!(game.phase_builder().len(), 1);
    }

    /// Lay down phase 1 (two sets of 3) for `P0`, keeping `extra` in hand.
    fn complete_two_sets(game: &mut Game, extra: &[CardKind]) {
        let mut kinds = vec![
            n(5, Color::Red),
            n(5, Color::Blue),
            n(5, Color::Green),
            n(8, Color::Red),
            n(8, Color::Blue),
            CardKind::Wild,
        ];
        kinds.extend_from_slice(extra);
        game.rig_hand(P0, &kinds);
        game.rig_draw_top(n(12, Color::Yellow));
        game.draw(P0, DrawSource::Deck).unwrap();

        for kind in &kinds[..3] {
            let id = card_of(game, P0, *kind);
            game.move_to_phase_builder(P0, id, GroupSlot::First).unwrap();
        }
        for kind in &kinds[3..6] {
            let id = card_of(game, P0, *kind);
            game.move_to_phase_builder(P0, id, GroupSlot::Second).unwrap();
        }
        assert!(game.can_complete_phase(P0));
        game.complete_phase(P0).unwrap();
    }

    #[test]
    fn test_complete_phase() {
        let mut game = game(2, 13);
        complete_two_sets(&mut game, &[n(8, Color::Yellow)]);

        let seat = &game.players[P0];
        assert!(seat.has_completed_phase);
        assert_eq!(seat.completed_phases, vec![1]);
        assert_eq!(seat.hand.len(), 2);
        assert_eq!(game.completed_phases().len(), 1);
        assert_eq!(game.completed_phases()[0].group1.len(), 3);
        assert_eq!(game.completed_phases()[0].group2.len(), 3);
        assert!(game.phase_builder().is_empty());
        assert_eq!(game.phase_hint(P0).as_deref(), Some(PHASE_COMPLETED_HINT));

        let err = game.complete_phase(P0).unwrap_err();
        assert_eq!(
            err,
            GameError::TurnOrderViolation(TurnViolation::PhaseAlreadyCompleted)
        );
        assert_conserved(&game);
    }

    #[test]
    fn test_completion_that_empties_hand_ends_round() {
        let mut game = game(2, 14);
        game.rig_hand(
            P0,
            &[
                n(5, Color::Red),
                n(5, Color::Blue),
                n(5, Color::Green),
                n(8, Color::Red),
                n(8, Color::Blue),
            ],
        );
        game.rig_discard_top(CardKind::Wild);
        game.draw(P0, DrawSource::Discard).unwrap();

        let hand: Vec<Card> = game.players[P0].hand.clone();
        for card in hand {
            let slot = if card.value() == Some(5) {
                GroupSlot::First
            } else {
                GroupSlot::Second
            };
            game.move_to_phase_builder(P0, card.id, slot).unwrap();
        }
        game.drain_events();
        game.complete_phase(P0).unwrap();

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::WentOut { player: P0 }));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::RoundEnded { round: 1, .. })));
        assert_eq!(game.round(), 2);
        assert_eq!(game.players[P0].current_phase, 2);
        assert_eq!(game.players[P0].score, 0);
        assert_eq!(game.players[P1].current_phase, 1);
        assert!(game.players[P1].score > 0);
        assert!(game.completed_phases().is_empty());
        assert_conserved(&game);
    }

    #[test]
    fn test_round_end_scores_remaining_hand() {
        let mut game = game(2, 15);
        game.rig_hand(P1, &[n(9, Color::Red), n(10, Color::Red), CardKind::Wild]);
        game.rig_hand(
            P0,
            &[
                n(5, Color::Red),
                n(5, Color::Blue),
                n(5, Color::Green),
                n(8, Color::Red),
                n(8, Color::Blue),
            ],
        );
        game.rig_discard_top(CardKind::Wild);
        game.draw(P0, DrawSource::Discard).unwrap();
        let hand: Vec<Card> = game.players[P0].hand.clone();
        for card in hand {
            let slot = if card.value() == Some(5) {
                GroupSlot::First
            } else {
                GroupSlot::Second
            };
            game.move_to_phase_builder(P0, card.id, slot).unwrap();
        }
        game.drain_events();
        game.complete_phase(P0).unwrap();

        assert_eq!(game.players[P1].score, 40);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::RoundEnded {
            round: 1,
            round_scores: vec![0, 40]
        }));
    }

    #[test]
    fn test_extension_requires_own_phase() {
        let mut game = game(2, 16);
        complete_two_sets(&mut game, &[n(5, Color::Yellow), n(11, Color::Red)]);
        let eleven = card_of(&game, P0, n(11, Color::Red));
        game.select_for_discard(P0, eleven).unwrap();
        game.discard(P0).unwrap();

        // P1 has not completed a phase this round.
        game.draw(P1, DrawSource::Deck).unwrap();
        let target = game.completed_phase_refs().next().unwrap();
        let card = game.players[P1].hand[0].id;
        let hand_before = game.players[P1].hand.clone();
        let err = game
            .extend_completed_phase(P1, card, target, GroupSlot::First)
            .unwrap_err();
        assert_eq!(
            err,
            GameError::TurnOrderViolation(TurnViolation::PhaseNotCompleted)
        );
        assert_eq!(game.players[P1].hand, hand_before);
    }

    #[test]
    fn test_extension() {
        let mut game = game(2, 17);
        complete_two_sets(&mut game, &[n(5, Color::Yellow), n(9, Color::Red)]);
        let target = game.completed_phase_refs().next().unwrap();
        let five = card_of(&game, P0, n(5, Color::Yellow));
        let nine = card_of(&game, P0, n(9, Color::Red));

        let err = game
            .extend_completed_phase(P0, nine, target, GroupSlot::First)
            .unwrap_err();
        assert_eq!(
            err,
            GameError::PhaseValidationFailure(PhaseFailure::CardDoesNotFit {
                card: nine,
                group: GroupSlot::First
            })
        );

        game.extend_completed_phase(P0, five, target, GroupSlot::First)
            .unwrap();
        assert_eq!(game.completed_phases()[0].group1.len(), 4);
        assert!(game.players[P0].position_of(five).is_none());
        assert_conserved(&game);
    }

    #[test]
    fn test_stale_completed_phase_reference() {
        let mut game = game(2, 18);
        complete_two_sets(&mut game, &[n(5, Color::Yellow), n(9, Color::Red)]);
        let five = card_of(&game, P0, n(5, Color::Yellow));

        let stale = CompletedPhaseRef::new(0, 0);
        let err = game
            .extend_completed_phase(P0, five, stale, GroupSlot::First)
            .unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidCardReference(InvalidReference::UnknownCompletedPhase(stale))
        );
        let missing = CompletedPhaseRef::new(1, 3);
        assert!(game
            .extend_completed_phase(P0, five, missing, GroupSlot::First)
            .is_err());
    }

    #[test]
    fn test_extension_that_empties_hand_ends_round() {
        let mut game = game(2, 19);
        game.rig_hand(
            P0,
            &[
                n(5, Color::Red),
                n(5, Color::Blue),
                n(5, Color::Green),
                n(8, Color::Red),
                n(8, Color::Blue),
                n(5, Color::Yellow),
            ],
        );
        game.rig_discard_top(CardKind::Wild);
        game.draw(P0, DrawSource::Discard).unwrap();
        let last = card_of(&game, P0, n(5, Color::Yellow));
        let hand: Vec<Card> = game.players[P0].hand.clone();
        for card in hand.into_iter().filter(|c| c.id != last) {
            let slot = if card.value() == Some(5) {
                GroupSlot::First
            } else {
                GroupSlot::Second
            };
            game.move_to_phase_builder(P0, card.id, slot).unwrap();
        }
        game.complete_phase(P0).unwrap();
        assert_eq!(game.round(), 1);

        let target = game.completed_phase_refs().next().unwrap();
        game.drain_events();
        game.extend_completed_phase(P0, last, target, GroupSlot::First)
            .unwrap();

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::WentOut { player: P0 }));
        assert_eq!(game.round(), 2);
        assert_eq!(game.players[P0].current_phase, 2);
        assert_conserved(&game);
    }

    #[test]
    fn test_empty_draw_pile_reshuffles() {
        let mut game = game(2, 20);
        game.clear_draw_pile_into_discard();
        assert_eq!(game.draw_pile_len(), 0);
        let top = *game.discard_top().unwrap();

        game.draw(P0, DrawSource::Deck).unwrap();
        assert_eq!(game.discard_pile(), &[top]);
        assert!(game.draw_pile_len() > 0);
        assert!(game
            .history()
            .iter()
            .any(|e| matches!(e, GameEvent::DeckReshuffled { .. })));
        assert_conserved(&game);
    }

    #[test]
    fn test_both_piles_empty() {
        let mut game = game(2, 21);
        game.move_piles_to_hand(P1, false);
        let err = game.draw(P0, DrawSource::Deck).unwrap_err();
        assert_eq!(err, GameError::EmptyResourceAccess(DrawSource::Deck));
        let err = game.draw(P0, DrawSource::Discard).unwrap_err();
        assert_eq!(err, GameError::EmptyResourceAccess(DrawSource::Discard));
        assert!(!game.turn().has_drawn);
    }

    #[test]
    fn test_game_won_after_phase_ten() {
        let mut game = game(2, 22);
        game.set_phase_position(P0, 10);
        // Phase 10 in catalog order: a set of 5 and a set of 3.
        game.rig_hand(
            P0,
            &[
                n(4, Color::Red),
                n(4, Color::Blue),
                n(4, Color::Green),
                n(4, Color::Yellow),
                n(2, Color::Red),
                n(2, Color::Blue),
                n(2, Color::Green),
            ],
        );
        game.rig_discard_top(CardKind::Wild);
        game.draw(P0, DrawSource::Discard).unwrap();
        let hand: Vec<Card> = game.players[P0].hand.clone();
        for card in hand {
            let slot = if card.value() == Some(2) {
                GroupSlot::Second
            } else {
                GroupSlot::First
            };
            game.move_to_phase_builder(P0, card.id, slot).unwrap();
        }
        game.complete_phase(P0).unwrap();

        let outcome = game.outcome().unwrap();
        assert_eq!(outcome.winner, P0);
        assert_eq!(outcome.final_scores[0], 0);
        assert_eq!(outcome.standings, vec![P0, P1]);
        assert!(game.is_over());
        assert_eq!(
            game.draw(P0, DrawSource::Deck).unwrap_err(),
            GameError::TurnOrderViolation(TurnViolation::GameOver)
        );
        assert_eq!(game.round(), 1);
    }

    #[test]
    fn test_phase_hint_uses_position() {
        let game = game(2, 23);
        assert_eq!(
            game.phase_hint(P1).as_deref(),
            Some("Phase 1: 2 sets of 3 | Sets: 3, 3 cards each")
        );
        assert_eq!(game.phase_hint(PlayerId(9)), None);
    }

    #[test]
    fn test_drain_events_only_returns_new_events() {
        let mut game = game(2, 24);
        let first = game.drain_events();
        assert!(matches!(first[0], GameEvent::RoundStarted { round: 1, .. }));
        assert!(game.drain_events().is_empty());

        game.draw(P0, DrawSource::Deck).unwrap();
        let events = game.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(game.history().len(), first.len() + 1);
        assert_eq!(game.history().back(), events.last());
        assert!(matches!(
            events[0],
            GameEvent::CardDrawn {
                source: DrawSource::Deck,
                card: None,
                ..
            }
        ));
    }
}
