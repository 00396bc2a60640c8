//! Phase validation.
//!
//! Everything here is a pure function over card slices: no allocation
//! escapes, nothing is mutated, and every input has an answer.
//!
//! ## Whole-group checks
//!
//! [`validate_set`], [`validate_run`] and [`validate_color`] decide whether a
//! finished group meets its requirement. [`validate_phase`] applies them to
//! both builder groups according to a [`PhaseDefinition`].
//!
//! ## Incremental checks
//!
//! [`fits_partial`] guards the phase builder: a card may join a group only if
//! the group could still become valid. [`can_extend_group`] guards appends to
//! a completed phase and only looks at the group's current ends.
//!
//! Skip cards never belong to any group.

use smallvec::SmallVec;

use super::catalog::{GroupRequirement, PhaseDefinition};
use crate::cards::Card;

/// Numbers of the non-wild cards, or `None` if a skip is present.
fn numbers(cards: &[Card]) -> Option<SmallVec<[u8; 12]>> {
    let mut values = SmallVec::new();
    for card in cards {
        if card.is_skip() {
            return None;
        }
        if let Some(value) = card.value() {
            values.push(value);
        }
    }
    Some(values)
}

fn wild_count(cards: &[Card]) -> usize {
    cards.iter().filter(|c| c.is_wild()).count()
}

/// At least `size` cards, every non-wild card showing the same number.
///
/// A group made only of wilds is a valid set.
#[must_use]
pub fn validate_set(cards: &[Card], size: usize) -> bool {
    if cards.len() < size {
        return false;
    }
    let Some(values) = numbers(cards) else {
        return false;
    };
    values.windows(2).all(|pair| pair[0] == pair[1])
}

/// At least `size` cards that can be laid out as `size` consecutive numbers.
///
/// Each distinct number is tried as the start of the run. Missing numbers in
/// the window are filled by wilds; a duplicate number never lengthens the
/// run. At least one non-wild card is required.
///
/// ```
/// use phase_ten::cards::{Card, CardId, Color};
/// use phase_ten::phases::validation::validate_run;
///
/// let n = |id, v| Card::number(CardId::new(id), v, Color::Red);
/// let hand = [n(0, 3), n(1, 4), n(2, 6), Card::wild(CardId::new(96))];
/// assert!(validate_run(&hand, 4));
/// assert!(!validate_run(&hand[..3], 4));
/// ```
#[must_use]
pub fn validate_run(cards: &[Card], size: usize) -> bool {
    if cards.len() < size {
        return false;
    }
    let Some(mut values) = numbers(cards) else {
        return false;
    };
    if values.is_empty() {
        return false;
    }
    values.sort_unstable();
    values.dedup();
    let wilds = wild_count(cards);

    values.iter().any(|&start| {
        let end = start as usize + size;
        let gaps = (start as usize..end)
            .filter(|n| values.binary_search(&(*n as u8)).is_err())
            .count();
        gaps <= wilds
    })
}

/// At least `size` cards, at least one of them a number card, with every
/// number card the same color.
#[must_use]
pub fn validate_color(cards: &[Card], size: usize) -> bool {
    if cards.len() < size || cards.iter().any(Card::is_skip) {
        return false;
    }
    let mut colors = cards.iter().filter_map(Card::color);
    match colors.next() {
        Some(first) => colors.all(|c| c == first),
        None => false,
    }
}

/// Dispatch on the requirement kind.
#[must_use]
pub fn validate_group(cards: &[Card], requirement: GroupRequirement) -> bool {
    match requirement {
        GroupRequirement::Set(n) => validate_set(cards, n),
        GroupRequirement::Run(n) => validate_run(cards, n),
        GroupRequirement::Color(n) => validate_color(cards, n),
    }
}

/// Do the two builder groups complete `phase`?
///
/// Single-group phases judge both groups as one.
#[must_use]
pub fn validate_phase(group1: &[Card], group2: &[Card], phase: &PhaseDefinition) -> bool {
    let requirements = phase.requirements();
    match requirements.as_slice() {
        [only] => {
            let merged: SmallVec<[Card; 16]> = group1.iter().chain(group2).copied().collect();
            validate_group(&merged, *only)
        }
        [first, second] => validate_group(group1, *first) && validate_group(group2, *second),
        _ => false,
    }
}

/// Could `group` plus `card` still grow into a valid group?
///
/// Sets keep one number, colors keep one color, runs never repeat a number.
/// A run only needs one covered window, so numbers far apart may share a
/// group: `[1, 12]` becomes a run of 4 once 2, 3 and 4 join it.
#[must_use]
pub fn fits_partial(group: &[Card], card: &Card, requirement: GroupRequirement) -> bool {
    if card.is_skip() {
        return false;
    }
    if card.is_wild() {
        return true;
    }
    match requirement {
        GroupRequirement::Set(_) => {
            let value = card.value();
            group.iter().filter(|c| !c.is_wild()).all(|c| c.value() == value)
        }
        GroupRequirement::Run(_) => {
            let value = card.value();
            group.iter().all(|c| c.is_wild() || c.value() != value)
        }
        GroupRequirement::Color(_) => {
            let color = card.color();
            group.iter().filter(|c| !c.is_wild()).all(|c| c.color() == color)
        }
    }
}

/// Can `card` be appended to a group of a completed phase?
///
/// Wilds always can. A number card must match a set's number, sit directly
/// below or above a run's lowest or highest number, or match the color of the
/// group's first number card. Any number card may join a group with no number
/// cards.
#[must_use]
pub fn can_extend_group(card: &Card, group: &[Card], requirement: GroupRequirement) -> bool {
    if card.is_skip() {
        return false;
    }
    if card.is_wild() {
        return true;
    }
    match requirement {
        GroupRequirement::Set(_) => {
            let mut existing = group.iter().filter_map(Card::value).peekable();
            existing.peek().is_none() || existing.any(|v| Some(v) == card.value())
        }
        GroupRequirement::Run(_) => {
            let existing = group.iter().filter_map(Card::value);
            let (Some(min), Some(max)) = (existing.clone().min(), existing.max()) else {
                return true;
            };
            match card.value() {
                Some(v) => v + 1 == min || v == max + 1,
                None => false,
            }
        }
        GroupRequirement::Color(_) => match group.iter().find_map(Card::color) {
            Some(dominant) => card.color() == Some(dominant),
            None => true,
        },
    }
}
