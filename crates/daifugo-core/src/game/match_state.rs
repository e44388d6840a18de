use crate::model::deck::Deck;
use crate::model::player::{Placing, PlayerProfile};
use crate::model::round::RoundState;
use crate::model::seat::Seat;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Cross-round owner: player identities and the previous round's placings
/// persist here while exactly one `RoundState` is live at a time. All
/// randomness (shuffles, the defensive random starting seat) flows
/// through the single seeded rng so a seed reproduces a whole match.
#[derive(Debug, Clone)]
pub struct MatchState {
    profiles: [PlayerProfile; 4],
    placings: [Option<Placing>; 4],
    current_round: RoundState,
    round_number: u32,
    rng: StdRng,
    seed: u64,
}

impl MatchState {
    pub fn new(profiles: [PlayerProfile; 4]) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(profiles, seed)
    }

    pub fn with_seed(profiles: [PlayerProfile; 4], seed: u64) -> Self {
        Self::with_seed_round(profiles, seed, 1, [None; 4])
    }

    /// Rebuild a match at a round boundary: earlier rounds' shuffles are
    /// replayed against the seed so the deal matches the original run.
    pub fn with_seed_round(
        profiles: [PlayerProfile; 4],
        seed: u64,
        round_number: u32,
        placings: [Option<Placing>; 4],
    ) -> Self {
        let normalized_round = round_number.max(1);
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 1..normalized_round {
            let _ = Deck::shuffled(&mut rng);
            let _ = random_seat(&mut rng);
        }

        let deck = Deck::shuffled(&mut rng);
        let fallback = random_seat(&mut rng);
        let previous = placings_complete(&placings).then_some(&placings);
        let current_round = RoundState::deal(&deck, previous, fallback);

        Self {
            profiles,
            placings,
            current_round,
            round_number: normalized_round,
            rng,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn profiles(&self) -> &[PlayerProfile; 4] {
        &self.profiles
    }

    pub fn profile(&self, seat: Seat) -> &PlayerProfile {
        &self.profiles[seat.index()]
    }

    /// Placings from the most recently completed round; drives the next
    /// exchange.
    pub fn previous_placings(&self) -> &[Option<Placing>; 4] {
        &self.placings
    }

    pub fn round(&self) -> &RoundState {
        &self.current_round
    }

    pub fn round_mut(&mut self) -> &mut RoundState {
        &mut self.current_round
    }

    /// Record the finished round's ranking and deal the next round. The
    /// new round opens in the exchange phase because the placings are now
    /// complete.
    pub fn start_next_round(&mut self) -> bool {
        if !self.current_round.is_finished() {
            return false;
        }

        self.placings = *self.current_round.placings();
        self.round_number += 1;

        let deck = Deck::shuffled(&mut self.rng);
        let fallback = random_seat(&mut self.rng);
        self.current_round = RoundState::deal(&deck, Some(&self.placings), fallback);
        true
    }
}

fn placings_complete(placings: &[Option<Placing>; 4]) -> bool {
    placings.iter().all(Option::is_some)
}

fn random_seat<R: Rng + ?Sized>(rng: &mut R) -> Seat {
    Seat::from_index(rng.gen_range(0..4)).unwrap_or(Seat::South)
}
