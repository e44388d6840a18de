use core::fmt;
use serde::{Deserialize, Serialize};

/// Finish rank for a seat that has emptied its hand. A seat still playing
/// has no placing (`Option<Placing>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Placing {
    Daifugo = 1,
    Fugo = 2,
    Hinmin = 3,
    Daihinmin = 4,
}

impl Placing {
    pub const ORDERED: [Placing; 4] = [
        Placing::Daifugo,
        Placing::Fugo,
        Placing::Hinmin,
        Placing::Daihinmin,
    ];

    pub const fn from_position(position: usize) -> Option<Self> {
        match position {
            1 => Some(Placing::Daifugo),
            2 => Some(Placing::Fugo),
            3 => Some(Placing::Hinmin),
            4 => Some(Placing::Daihinmin),
            _ => None,
        }
    }

    pub const fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Placing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Placing::Daifugo => "Daifugo",
            Placing::Fugo => "Fugo",
            Placing::Hinmin => "Hinmin",
            Placing::Daihinmin => "Daihinmin",
        };
        f.write_str(label)
    }
}

/// How a seat's decisions are obtained: an AI seat computes them
/// synchronously through a policy, a human seat suspends the engine until
/// an external actor supplies a validated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    Human,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub controller: Controller,
}

impl PlayerProfile {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Human,
        }
    }

    pub fn ai(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            controller: Controller::Ai,
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self.controller, Controller::Ai)
    }
}
