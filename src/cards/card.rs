//! Card faces and identities.
//!
//! A [`Card`] pairs a stable [`CardId`] with its face. Number cards carry a
//! value (1-12) and one of four colors; wild and skip cards carry neither.

use serde::{Deserialize, Serialize};

/// Identity of one physical card, stable for the lifetime of a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Suit color of a number card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What is printed on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Number { value: u8, color: Color },
    /// Stands in for any number or color inside a phase.
    Wild,
    /// Discarding it makes the next player lose their turn.
    Skip,
}

/// A single card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
}

impl Card {
    #[must_use]
    pub const fn number(id: CardId, value: u8, color: Color) -> Self {
        Self {
            id,
            kind: CardKind::Number { value, color },
        }
    }

    #[must_use]
    pub const fn wild(id: CardId) -> Self {
        Self {
            id,
            kind: CardKind::Wild,
        }
    }

    #[must_use]
    pub const fn skip(id: CardId) -> Self {
        Self {
            id,
            kind: CardKind::Skip,
        }
    }

    #[must_use]
    pub fn is_wild(&self) -> bool {
        matches!(self.kind, CardKind::Wild)
    }

    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self.kind, CardKind::Skip)
    }

    /// Face value of a number card.
    #[must_use]
    pub fn value(&self) -> Option<u8> {
        match self.kind {
            CardKind::Number { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Color of a number card.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match self.kind {
            CardKind::Number { color, .. } => Some(color),
            _ => None,
        }
    }

    /// Points charged for holding this card when a round ends.
    #[must_use]
    pub fn penalty(&self) -> u32 {
        match self.kind {
            CardKind::Number { value, .. } if value <= 9 => 5,
            CardKind::Number { .. } => 10,
            CardKind::Wild => 25,
            CardKind::Skip => 15,
        }
    }

    /// Short face label: the number, `W` or `S`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.kind {
            CardKind::Number { value, .. } => value.to_string(),
            CardKind::Wild => "W".to_string(),
            CardKind::Skip => "S".to_string(),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            CardKind::Number { value, color } => write!(f, "{} {}", color, value),
            CardKind::Wild => f.write_str("wild"),
            CardKind::Skip => f.write_str("skip"),
        }
    }
}
