use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Strength is derived from rank alone; suit never affects ordering.
    pub const fn strength(self, is_revolution: bool) -> u8 {
        self.rank.strength(is_revolution)
    }

    /// Any eight clears the field when played (eight-cut rule).
    pub const fn is_eight(self) -> bool {
        matches!(self.rank, Rank::Eight)
    }

    pub const fn is_starter(self) -> bool {
        matches!(self.rank, Rank::Three) && matches!(self.suit, Suit::Diamonds)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.rank)
    }
}
