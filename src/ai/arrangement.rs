//! Greedy search for a hand layout that completes a phase.
//!
//! ## Strategy
//!
//! - Sets: for each required set, the number with the most copies (the
//!   smaller number on ties), topped up with wilds.
//! - Runs: the window with the fewest gaps (the lowest start on ties), gaps
//!   filled with wilds.
//! - Color: the most common color with at least four cards, topped up with
//!   wilds to seven.
//! - Set + run: sets first, then the run from what is left.
//!
//! The search is greedy and can miss layouts a smarter search would find.
//! Results are candidates; the caller still validates them.

use std::collections::{BTreeMap, BTreeSet};

use super::evaluate::dominant_color;
use crate::cards::deck::MAX_CARD_VALUE;
use crate::cards::Card;
use crate::phases::catalog::COLOR_PHASE_SIZE;
use crate::phases::PhaseDefinition;

/// Fewest number cards of one color worth building a color phase on.
const MIN_COLOR_BASE: usize = 4;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Arrangement {
    pub group1: Vec<Card>,
    pub group2: Vec<Card>,
}

impl Arrangement {
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.group1.iter().chain(self.group2.iter())
    }
}

/// Best-effort layout of `hand` for `phase`.
#[must_use]
pub fn find_arrangement(hand: &[Card], phase: &PhaseDefinition) -> Option<Arrangement> {
    if phase.is_color_phase {
        return find_color(hand);
    }
    match (phase.set_sizes.is_empty(), phase.run_sizes.first()) {
        (false, Some(&run)) => find_sets_and_run(hand, phase.set_sizes, run),
        (false, None) => find_sets(hand, phase.set_sizes),
        (true, Some(&run)) => find_run(hand, run).map(|group1| Arrangement {
            group1,
            group2: Vec::new(),
        }),
        (true, None) => None,
    }
}

fn split_wilds(hand: &[Card]) -> (Vec<Card>, Vec<Card>) {
    hand.iter().partition(|c| c.is_wild())
}

fn find_color(hand: &[Card]) -> Option<Arrangement> {
    let (wilds, others) = split_wilds(hand);
    let color = dominant_color(&others);
    let mut group1: Vec<Card> = others
        .into_iter()
        .filter(|c| c.color() == Some(color))
        .collect();
    if group1.len() < MIN_COLOR_BASE {
        return None;
    }
    let needed = COLOR_PHASE_SIZE.saturating_sub(group1.len());
    if needed > wilds.len() {
        return None;
    }
    group1.extend(wilds.into_iter().take(needed));
    Some(Arrangement {
        group1,
        group2: Vec::new(),
    })
}

fn find_sets(hand: &[Card], sizes: &[usize]) -> Option<Arrangement> {
    let (wilds, others) = split_wilds(hand);
    let mut by_number: BTreeMap<u8, Vec<Card>> = BTreeMap::new();
    for card in others {
        if let Some(value) = card.value() {
            by_number.entry(value).or_default().push(card);
        }
    }

    let mut wilds = wilds.into_iter();
    let mut spare_wilds = wilds.len();
    let mut sets = Vec::with_capacity(sizes.len());
    for &size in sizes {
        // Largest group the remaining wilds can finish; BTreeMap order
        // settles ties on the smaller number.
        let mut best: Option<(u8, usize)> = None;
        for (&number, cards) in &by_number {
            let available = cards.len();
            if available == 0 || size.saturating_sub(available) > spare_wilds {
                continue;
            }
            if best.map_or(true, |(_, most)| available > most) {
                best = Some((number, available));
            }
        }
        let (number, _) = best?;

        let pool = by_number.get_mut(&number)?;
        let take = pool.len().min(size);
        let mut set: Vec<Card> = pool.drain(..take).collect();
        let needed = size - set.len();
        set.extend(wilds.by_ref().take(needed));
        spare_wilds -= needed;
        sets.push(set);
    }

    let mut sets = sets.into_iter();
    Some(Arrangement {
        group1: sets.next().unwrap_or_default(),
        group2: sets.next().unwrap_or_default(),
    })
}

/// Start of the window of `len` numbers with the fewest gaps that `wilds`
/// can cover. Needs at least one held number in the window.
#[must_use]
pub fn best_run_start(held: &BTreeSet<u8>, wilds: usize, len: usize) -> Option<u8> {
    let len = u8::try_from(len).ok()?;
    if len == 0 || len > MAX_CARD_VALUE {
        return None;
    }
    let mut best: Option<(usize, u8)> = None;
    for start in 1..=MAX_CARD_VALUE - len + 1 {
        let present = (start..start + len).filter(|n| held.contains(n)).count();
        let gaps = len as usize - present;
        if present == 0 || gaps > wilds {
            continue;
        }
        if best.map_or(true, |(fewest, _)| gaps < fewest) {
            best = Some((gaps, start));
        }
    }
    best.map(|(_, start)| start)
}

fn find_run(hand: &[Card], len: usize) -> Option<Vec<Card>> {
    let (wilds, others) = split_wilds(hand);
    let held: BTreeSet<u8> = others.iter().filter_map(Card::value).collect();
    let start = best_run_start(&held, wilds.len(), len)?;

    let mut wilds = wilds.into_iter();
    let mut run = Vec::with_capacity(len);
    for number in start..start + len as u8 {
        let card = match others.iter().find(|c| c.value() == Some(number)) {
            Some(card) => *card,
            None => wilds.next()?,
        };
        run.push(card);
    }
    Some(run)
}

fn find_sets_and_run(hand: &[Card], sizes: &[usize], run: usize) -> Option<Arrangement> {
    let sets = find_sets(hand, sizes)?;
    let remaining: Vec<Card> = hand
        .iter()
        .filter(|c| !sets.cards().any(|used| used.id == c.id))
        .copied()
        .collect();
    let group2 = find_run(&remaining, run)?;
    Some(Arrangement {
        group1: sets.group1,
        group2,
    })
}
