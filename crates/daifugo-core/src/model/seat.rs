use core::fmt;
use serde::{Deserialize, Serialize};

/// Table position in fixed turn order. `South` (index 0) is the human
/// seat by convention; play rotates South -> East -> North -> West.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    South = 0,
    East = 1,
    North = 2,
    West = 3,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::South, Seat::East, Seat::North, Seat::West];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::South),
            1 => Some(Seat::East),
            2 => Some(Seat::North),
            3 => Some(Seat::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::South => Seat::East,
            Seat::East => Seat::North,
            Seat::North => Seat::West,
            Seat::West => Seat::South,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::South => "South",
            Seat::East => "East",
            Seat::North => "North",
            Seat::West => "West",
        };
        f.write_str(label)
    }
}
