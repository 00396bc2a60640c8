//! Card usefulness and discard scoring.
//!
//! A card is *useful* when it moves the hand toward the phase being
//! attempted:
//!
//! - color phase: matches the hand's most common color
//! - set phase: matches a number already held
//! - run phase: sits one or two steps from a number already held
//!
//! Wilds are always useful. Skips never are.

use crate::cards::{Card, CardId, Color};
use crate::phases::PhaseDefinition;

/// Most common color among the number cards of `hand`.
///
/// Ties go to the earlier color in [`Color::ALL`]; a hand without number
/// cards counts as red.
#[must_use]
pub fn dominant_color(hand: &[Card]) -> Color {
    let mut counts = [0usize; 4];
    for color in hand.iter().filter_map(Card::color) {
        counts[color as usize] += 1;
    }
    let mut best = Color::Red;
    for color in Color::ALL {
        if counts[color as usize] > counts[best as usize] {
            best = color;
        }
    }
    best
}

/// Would `number` start or extend a run with one of `existing`?
#[must_use]
pub fn is_number_useful_for_run(number: u8, existing: &[u8]) -> bool {
    existing.iter().any(|&n| matches!(n.abs_diff(number), 1 | 2))
}

/// Is `card` worth holding alongside `hand` for `phase`?
///
/// `hand` should not contain `card` itself.
#[must_use]
pub fn is_useful(card: &Card, hand: &[Card], phase: &PhaseDefinition) -> bool {
    if card.is_wild() {
        return true;
    }
    let Some(value) = card.value() else {
        return false;
    };

    if phase.is_color_phase {
        return card.color() == Some(dominant_color(hand));
    }
    if !phase.set_sizes.is_empty() && hand.iter().any(|c| c.value() == Some(value)) {
        return true;
    }
    if !phase.run_sizes.is_empty() {
        let held: Vec<u8> = hand.iter().filter_map(Card::value).collect();
        return is_number_useful_for_run(value, &held);
    }
    false
}

/// Keep-score of a card; the lowest-scoring card is discarded.
#[must_use]
pub fn discard_score(card: &Card, useful: bool) -> i32 {
    let mut score = if useful { 100 } else { 0 };
    if card.is_wild() {
        score += 80;
    }
    match card.value() {
        Some(value) if value > 9 => score -= 20,
        Some(_) => score -= 10,
        None if card.is_skip() => score -= 15,
        None => {}
    }
    score
}

/// The card to throw away: lowest score, earliest in hand on ties.
#[must_use]
pub fn choose_discard(hand: &[Card], phase: Option<&PhaseDefinition>) -> Option<CardId> {
    let mut best: Option<(i32, CardId)> = None;
    for (i, card) in hand.iter().enumerate() {
        let useful = phase.is_some_and(|def| {
            let rest: Vec<Card> = hand
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, c)| *c)
                .collect();
            is_useful(card, &rest, def)
        });
        let score = discard_score(card, useful);
        if best.map_or(true, |(low, _)| score < low) {
            best = Some((score, card.id));
        }
    }
    best.map(|(_, id)| id)
}
