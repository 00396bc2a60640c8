//! Round scoring and the end of the game.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{Player, PlayerId, PlayerMap};

/// How a finished game ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: PlayerId,
    /// Cumulative penalty points, in seat order.
    pub final_scores: Vec<u32>,
    /// Every seat, best first. See [`standings`].
    pub standings: Vec<PlayerId>,
}

/// Penalty points for the cards left in a hand.
///
/// ```
/// use phase_ten::cards::{Card, CardId, Color};
/// use phase_ten::game::round::hand_penalty;
///
/// let hand = [
///     Card::number(CardId::new(16), 9, Color::Red),
///     Card::number(CardId::new(18), 10, Color::Red),
///     Card::wild(CardId::new(96)),
/// ];
/// assert_eq!(hand_penalty(&hand), 40);
/// ```
#[must_use]
pub fn hand_penalty(hand: &[Card]) -> u32 {
    hand.iter().map(Card::penalty).sum()
}

/// Score every hand and move players who completed their phase on to the
/// next one. Returns the points added to each seat.
pub fn score_round(players: &mut PlayerMap<Player>) -> Vec<u32> {
    let mut round_scores = Vec::with_capacity(players.player_count());
    for (_, player) in players.iter_mut() {
        let penalty = hand_penalty(&player.hand);
        player.score += penalty;
        if player.has_completed_phase {
            player.current_phase += 1;
            player.has_completed_phase = false;
        }
        round_scores.push(penalty);
    }
    round_scores
}

/// The winner, if anyone has finished all ten phases.
///
/// Several players can finish in the same round: the lowest cumulative score
/// wins, then the earliest seat.
#[must_use]
pub fn select_winner(players: &PlayerMap<Player>) -> Option<PlayerId> {
    players
        .iter()
        .filter(|(_, p)| p.is_finished())
        .min_by_key(|(id, p)| (p.score, *id))
        .map(|(id, _)| id)
}

/// Seats ranked for the final table: furthest phase first, then lowest
/// score, then earliest seat.
#[must_use]
pub fn standings(players: &PlayerMap<Player>) -> Vec<PlayerId> {
    let mut ranked: Vec<(PlayerId, &Player)> = players.iter().collect();
    ranked.sort_by_key(|(id, p)| (std::cmp::Reverse(p.current_phase), p.score, *id));
    ranked.into_iter().map(|(id, _)| id).collect()
}
