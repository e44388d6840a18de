use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use daifugo_bot::{HeuristicPolicy, Policy, PolicyContext};
use daifugo_core::game::match_state::MatchState;
use daifugo_core::model::moves::Move;
use daifugo_core::model::player::{Placing, PlayerProfile};
use daifugo_core::model::round::{RoundPhase, RoundState};
use daifugo_core::model::seat::Seat;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::RosterConfig;

/// Hard cap on turns within one round; a round that exceeds it is a bug,
/// not a slow game.
const MAX_TURNS_PER_ROUND: usize = 10_000;

/// Drives seeded multi-round matches with a heuristic policy in every
/// seat, streaming one JSONL row per finished round.
pub struct SimRunner {
    config: RosterConfig,
    jsonl_path: PathBuf,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub rounds_played: u32,
    pub seed: u64,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub standings: Vec<PlayerStanding>,
}

/// Per-player totals across the run. `placing_counts[0]` counts Daifugo
/// finishes through `placing_counts[3]` for Daihinmin.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStanding {
    pub id: String,
    pub name: String,
    pub placing_counts: [u32; 4],
}

#[derive(Debug, Serialize)]
struct RoundLogRow {
    seed: u64,
    round: u32,
    seats: [SeatResult; 4],
}

#[derive(Debug, Serialize)]
struct SeatResult {
    seat: String,
    player: String,
    placing: String,
    position: usize,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode log row: {0}")]
    Json(#[from] serde_json::Error),
    #[error("engine rejected a policy decision: {0}")]
    Rejected(String),
    #[error("round exceeded {MAX_TURNS_PER_ROUND} turns without finishing")]
    Stuck,
}

impl SimRunner {
    /// Build a runner from a validated roster.
    pub fn new(config: RosterConfig) -> Self {
        let jsonl_path = config.output.jsonl_path();
        Self { config, jsonl_path }
    }

    /// Play `rounds` rounds from `seed`, streaming JSONL rows to disk.
    pub fn run(&self, rounds: u32, seed: u64) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.jsonl_path.parent())?;
        let mut writer = BufWriter::new(File::create(&self.jsonl_path)?);

        let mut master = StdRng::seed_from_u64(seed);
        let match_seed = master.next_u64();

        // Unattended human seats fall back to the heuristic so a roster
        // written for interactive play still simulates headlessly.
        let mut policies: Vec<HeuristicPolicy> = self
            .config
            .players
            .iter()
            .map(|p| HeuristicPolicy::with_seed(p.params.to_ai_params(), master.next_u64()))
            .collect();

        let profiles = self.seat_profiles();
        let mut state = MatchState::with_seed(profiles, match_seed);
        let mut standings = self.empty_standings();
        let mut rows_written = 0usize;

        for round_number in 1..=rounds {
            if matches!(state.round().phase(), RoundPhase::Exchanging(_)) {
                resolve_exchange(state.round_mut(), &mut policies)?;
            }

            play_round(state.round_mut(), &mut policies)?;
            record_standings(&mut standings, state.round());
            rows_written +=
                self.write_round_row(&mut writer, match_seed, round_number, state.round())?;

            event!(
                target: "daifugo_sim::round",
                Level::INFO,
                round = round_number,
                placings = ?state.round().placings(),
                "round finished"
            );

            if round_number < rounds {
                state.start_next_round();
            }
        }

        writer.flush()?;

        Ok(RunSummary {
            rounds_played: rounds,
            seed,
            rows_written,
            jsonl_path: self.jsonl_path.clone(),
            standings,
        })
    }

    fn seat_profiles(&self) -> [PlayerProfile; 4] {
        let mut profiles = self
            .config
            .players
            .iter()
            .map(|p| PlayerProfile::ai(p.name.clone()));
        std::array::from_fn(|_| profiles.next().unwrap_or_else(|| PlayerProfile::ai("?")))
    }

    fn empty_standings(&self) -> Vec<PlayerStanding> {
        self.config
            .players
            .iter()
            .map(|p| PlayerStanding {
                id: p.id.clone(),
                name: p.name.clone(),
                placing_counts: [0; 4],
            })
            .collect()
    }

    fn write_round_row(
        &self,
        writer: &mut BufWriter<File>,
        match_seed: u64,
        round_number: u32,
        round: &RoundState,
    ) -> Result<usize, RunnerError> {
        let mut seats = Seat::LOOP.iter().copied().map(|seat| {
            let placing = round.placing(seat).unwrap_or(Placing::Daihinmin);
            SeatResult {
                seat: seat.to_string(),
                player: self.config.players[seat.index()].id.clone(),
                placing: placing.to_string(),
                position: placing.position(),
            }
        });
        let row = RoundLogRow {
            seed: match_seed,
            round: round_number,
            seats: std::array::from_fn(|_| seats.next().expect("four seats")),
        };
        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        Ok(1)
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn resolve_exchange(
    round: &mut RoundState,
    policies: &mut [HeuristicPolicy],
) -> Result<(), RunnerError> {
    for seat in round.exchange_pending() {
        let count = round
            .exchange_required_count(seat)
            .ok_or_else(|| RunnerError::Rejected(format!("no exchange due for {seat}")))?;
        let give = {
            let ctx = PolicyContext::for_seat(round, seat);
            policies[seat.index()].choose_exchange(&ctx, count)
        };
        round
            .submit_exchange(seat, &give)
            .map_err(|err| RunnerError::Rejected(format!("{err:?}")))?;
    }
    round
        .resolve_exchange()
        .map_err(|err| RunnerError::Rejected(format!("{err:?}")))
}

fn play_round(
    round: &mut RoundState,
    policies: &mut [HeuristicPolicy],
) -> Result<(), RunnerError> {
    for _ in 0..MAX_TURNS_PER_ROUND {
        if round.is_finished() {
            return Ok(());
        }
        let seat = round.turn();
        let chosen = {
            let ctx = PolicyContext::for_seat(round, seat);
            policies[seat.index()].choose_move(&ctx)
        };
        match chosen {
            Move::Pass => {
                round
                    .pass(seat)
                    .map_err(|err| RunnerError::Rejected(format!("{err:?}")))?;
            }
            Move::Play(set) => {
                round
                    .play_cards(seat, set.cards())
                    .map_err(|err| RunnerError::Rejected(format!("{err:?}")))?;
            }
        }
    }
    Err(RunnerError::Stuck)
}

fn record_standings(standings: &mut [PlayerStanding], round: &RoundState) {
    for seat in Seat::LOOP.iter().copied() {
        if let Some(placing) = round.placing(seat) {
            standings[seat.index()].placing_counts[placing.position() - 1] += 1;
        }
    }
}
