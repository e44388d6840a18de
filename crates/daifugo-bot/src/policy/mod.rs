mod heuristic;

pub use heuristic::HeuristicPolicy;

use daifugo_core::model::card::Card;
use daifugo_core::model::field::Field;
use daifugo_core::model::hand::Hand;
use daifugo_core::model::moves::Move;
use daifugo_core::model::player::Placing;
use daifugo_core::model::round::RoundState;
use daifugo_core::model::seat::Seat;

/// Read-only view handed to a policy when its seat must act. Carries only
/// information a player at the table can see: its own hand, the field,
/// the mode flag, opponents' card counts, and settled placings. Opponent
/// hands are deliberately absent.
pub struct PolicyContext<'a> {
    pub seat: Seat,
    pub hand: &'a Hand,
    pub field: &'a Field,
    pub is_revolution: bool,
    pub hand_sizes: [usize; 4],
    pub placings: &'a [Option<Placing>; 4],
}

impl<'a> PolicyContext<'a> {
    pub fn for_seat(round: &'a RoundState, seat: Seat) -> Self {
        Self {
            seat,
            hand: round.hand(seat),
            field: round.field(),
            is_revolution: round.is_revolution(),
            hand_sizes: round.hand_sizes(),
            placings: round.placings(),
        }
    }
}

/// Decision seam for a seat. The engine drives state; a policy only
/// chooses among moves the engine will accept.
pub trait Policy: Send {
    /// Pick a move for the seat to act. Must come from the legal set for
    /// the context's hand and field.
    fn choose_move(&mut self, ctx: &PolicyContext<'_>) -> Move;

    /// Pick `count` cards to give back during the exchange phase.
    fn choose_exchange(&mut self, ctx: &PolicyContext<'_>, count: usize) -> Vec<Card>;
}
