//! The ten phases.
//!
//! ## Definitions
//!
//! [`PhaseDefinition`] records are static and never change. A game may
//! shuffle the *order* in which players attempt them; that order is a
//! [`PhaseOrder`] fixed once per game. A player's `current_phase` is a
//! position in the order (1-based), not a catalog ordinal.
//!
//! ## Groups
//!
//! Each definition expands to at most two [`GroupRequirement`]s. Sets come
//! first, then the run, so combined phases always put the run in group 2.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::builder::GroupSlot;
use crate::core::GameRng;

/// Number of phases a player must complete to win.
pub const PHASE_COUNT: usize = 10;

/// Cards required by the color phase.
pub const COLOR_PHASE_SIZE: usize = 7;

/// One of the ten fixed phase records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PhaseDefinition {
    /// Catalog ordinal, 1..=10.
    pub ordinal: u8,
    pub description: &'static str,
    pub set_sizes: &'static [usize],
    pub run_sizes: &'static [usize],
    pub is_color_phase: bool,
}

static CATALOG: [PhaseDefinition; PHASE_COUNT] = [
    PhaseDefinition {
        ordinal: 1,
        description: "2 sets of 3",
        set_sizes: &[3, 3],
        run_sizes: &[],
        is_color_phase: false,
    },
    PhaseDefinition {
        ordinal: 2,
        description: "1 set of 3 + 1 run of 4",
        set_sizes: &[3],
        run_sizes: &[4],
        is_color_phase: false,
    },
    PhaseDefinition {
        ordinal: 3,
        description: "1 set of 4 + 1 run of 4",
        set_sizes: &[4],
        run_sizes: &[4],
        is_color_phase: false,
    },
    PhaseDefinition {
        ordinal: 4,
        description: "1 run of 7",
        set_sizes: &[],
        run_sizes: &[7],
        is_color_phase: false,
    },
    PhaseDefinition {
        ordinal: 5,
        description: "1 run of 8",
        set_sizes: &[],
        run_sizes: &[8],
        is_color_phase: false,
    },
    PhaseDefinition {
        ordinal: 6,
        description: "1 run of 9",
        set_sizes: &[],
        run_sizes: &[9],
        is_color_phase: false,
    },
    PhaseDefinition {
        ordinal: 7,
        description: "2 sets of 4",
        set_sizes: &[4, 4],
        run_sizes: &[],
        is_color_phase: false,
    },
    PhaseDefinition {
        ordinal: 8,
        description: "7 cards of one color",
        set_sizes: &[],
        run_sizes: &[],
        is_color_phase: true,
    },
    PhaseDefinition {
        ordinal: 9,
        description: "1 set of 5 + 1 set of 2",
        set_sizes: &[5, 2],
        run_sizes: &[],
        is_color_phase: false,
    },
    PhaseDefinition {
        ordinal: 10,
        description: "1 set of 5 + 1 set of 3",
        set_sizes: &[5, 3],
        run_sizes: &[],
        is_color_phase: false,
    },
];

/// What a single group of cards must form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupRequirement {
    /// At least `n` cards of one number.
    Set(usize),
    /// At least `n` consecutive numbers.
    Run(usize),
    /// At least `n` cards of one color.
    Color(usize),
}

impl GroupRequirement {
    #[must_use]
    pub fn size(self) -> usize {
        match self {
            GroupRequirement::Set(n) | GroupRequirement::Run(n) | GroupRequirement::Color(n) => n,
        }
    }
}

impl std::fmt::Display for GroupRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupRequirement::Set(n) => write!(f, "Set of {}", n),
            GroupRequirement::Run(n) => write!(f, "Run of {}", n),
            GroupRequirement::Color(n) => write!(f, "{} Cards of One Color", n),
        }
    }
}

impl PhaseDefinition {
    /// Look up a catalog entry by ordinal (1..=10).
    #[must_use]
    pub fn get(ordinal: u8) -> Option<&'static PhaseDefinition> {
        CATALOG.get((ordinal as usize).checked_sub(1)?)
    }

    /// The whole catalog in ordinal order.
    #[must_use]
    pub fn all() -> &'static [PhaseDefinition] {
        &CATALOG
    }

    /// Group requirements, sets first.
    #[must_use]
    pub fn requirements(&self) -> SmallVec<[GroupRequirement; 2]> {
        if self.is_color_phase {
            return smallvec![GroupRequirement::Color(COLOR_PHASE_SIZE)];
        }
        self.set_sizes
            .iter()
            .map(|&n| GroupRequirement::Set(n))
            .chain(self.run_sizes.iter().map(|&n| GroupRequirement::Run(n)))
            .collect()
    }

    /// Phases made of one group accept cards in either builder group.
    #[must_use]
    pub fn is_single_group(&self) -> bool {
        self.requirements().len() == 1
    }

    /// Requirement for one group, if the phase defines that group.
    #[must_use]
    pub fn requirement(&self, slot: GroupSlot) -> Option<GroupRequirement> {
        self.requirements().get(slot.index()).copied()
    }

    /// Heading shown above a group, e.g. `"Set of 3"`.
    #[must_use]
    pub fn group_label(&self, slot: GroupSlot) -> String {
        match (self.requirement(slot), slot) {
            (Some(req), _) => req.to_string(),
            (None, GroupSlot::First) => "Cards".to_string(),
            (None, GroupSlot::Second) => "Additional Cards".to_string(),
        }
    }

    /// Instruction line for a player attempting this phase at `position`.
    #[must_use]
    pub fn hint(&self, position: u8) -> String {
        let mut hint = format!("Phase {}: {}", position, self.description);
        if self.is_color_phase {
            hint.push_str(" (All cards must be the same color)");
            return hint;
        }
        if !self.set_sizes.is_empty() {
            hint.push_str(&format!(" | Sets: {} cards each", join_sizes(self.set_sizes)));
        }
        if !self.run_sizes.is_empty() {
            hint.push_str(&format!(
                " | Runs: {} consecutive cards",
                join_sizes(self.run_sizes)
            ));
        }
        hint
    }
}

fn join_sizes(sizes: &[usize]) -> String {
    sizes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The order in which every player attempts the ten phases in one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseOrder {
    ordinals: [u8; PHASE_COUNT],
}

impl PhaseOrder {
    /// Catalog order, 1 through 10.
    #[must_use]
    pub fn standard() -> Self {
        let mut ordinals = [0u8; PHASE_COUNT];
        for (i, slot) in ordinals.iter_mut().enumerate() {
            *slot = i as u8 + 1;
        }
        Self { ordinals }
    }

    /// A random permutation of the catalog.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut order = Self::standard();
        rng.shuffle(&mut order.ordinals);
        order
    }

    /// Definition at a 1-based position. `None` past the tenth phase.
    #[must_use]
    pub fn definition_at(&self, position: u8) -> Option<&'static PhaseDefinition> {
        let ordinal = *self.ordinals.get((position as usize).checked_sub(1)?)?;
        PhaseDefinition::get(ordinal)
    }

    #[must_use]
    pub fn ordinals(&self) -> &[u8; PHASE_COUNT] {
        &self.ordinals
    }
}

impl Default for PhaseOrder {
    fn default() -> Self {
        Self::standard()
    }
}
