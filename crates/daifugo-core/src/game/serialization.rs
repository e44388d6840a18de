use super::match_state::MatchState;
use crate::model::player::{Placing, PlayerProfile};
use serde::{Deserialize, Serialize};

/// Round-boundary snapshot of a match. In-progress plays are not
/// captured; restoring re-deals the round from the seed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSnapshot {
    pub seed: u64,
    pub round_number: u32,
    pub profiles: [PlayerProfile; 4],
    pub placings: [Option<Placing>; 4],
}

impl MatchSnapshot {
    pub fn capture(state: &MatchState) -> Self {
        MatchSnapshot {
            seed: state.seed(),
            round_number: state.round_number(),
            profiles: state.profiles().clone(),
            placings: *state.previous_placings(),
        }
    }

    pub fn restore(self) -> MatchState {
        MatchState::with_seed_round(self.profiles, self.seed, self.round_number, self.placings)
    }

    pub fn to_json(state: &MatchState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
