use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::Placing;
use crate::model::seat::Seat;

/// Post-deal card swap between the previous round's ranked seats. The
/// losing side's tribute (highest base-strength cards) is taken
/// automatically when the state is built; the winning side's returns are
/// chosen, so the state suspends until every winner has submitted.
#[derive(Debug, Clone)]
pub struct ExchangeState {
    pairs: Vec<ExchangePair>,
}

#[derive(Debug, Clone)]
struct ExchangePair {
    winner: Seat,
    loser: Seat,
    count: usize,
    tribute: Vec<Card>,
    returned: Option<Vec<Card>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeError {
    NotInExchangePhase,
    NotAnExchangeSeat(Seat),
    AlreadySubmitted(Seat),
    WrongCount { required: usize, actual: usize },
    CardNotInHand(Card),
    Incomplete,
}

impl ExchangeState {
    /// Build the exchange from the previous round's placings, removing
    /// each loser's tribute immediately. Returns `None` when the placings
    /// are not a complete ranking of all four seats.
    pub fn from_placings(placings: &[Option<Placing>; 4], hands: &mut [Hand; 4]) -> Option<Self> {
        let seat_of = |wanted: Placing| -> Option<Seat> {
            Seat::LOOP
                .iter()
                .copied()
                .find(|seat| placings[seat.index()] == Some(wanted))
        };

        let daifugo = seat_of(Placing::Daifugo)?;
        let fugo = seat_of(Placing::Fugo)?;
        let hinmin = seat_of(Placing::Hinmin)?;
        let daihinmin = seat_of(Placing::Daihinmin)?;

        let mut pairs = Vec::with_capacity(2);
        for (winner, loser, count) in [(daifugo, daihinmin, 2), (fugo, hinmin, 1)] {
            let tribute = hands[loser.index()].strongest(count);
            for card in tribute.iter() {
                hands[loser.index()].remove(*card);
            }
            pairs.push(ExchangePair {
                winner,
                loser,
                count,
                tribute,
                returned: None,
            });
        }

        Some(Self { pairs })
    }

    /// Winner seats that still owe a selection, in pair order.
    pub fn pending_seats(&self) -> Vec<Seat> {
        self.pairs
            .iter()
            .filter(|pair| pair.returned.is_none())
            .map(|pair| pair.winner)
            .collect()
    }

    /// How many cards `seat` still has to give back, if it owes any.
    pub fn required_count(&self, seat: Seat) -> Option<usize> {
        self.pairs
            .iter()
            .find(|pair| pair.winner == seat && pair.returned.is_none())
            .map(|pair| pair.count)
    }

    /// Record a winner's give-back selection, removing the cards from its
    /// hand. Wrong counts and unknown cards are rejected without touching
    /// any state, so the caller can simply re-prompt.
    pub fn submit_return(
        &mut self,
        seat: Seat,
        cards: &[Card],
        hand: &mut Hand,
    ) -> Result<(), ExchangeError> {
        let pair = self
            .pairs
            .iter_mut()
            .find(|pair| pair.winner == seat)
            .ok_or(ExchangeError::NotAnExchangeSeat(seat))?;

        if pair.returned.is_some() {
            return Err(ExchangeError::AlreadySubmitted(seat));
        }

        if cards.len() != pair.count {
            return Err(ExchangeError::WrongCount {
                required: pair.count,
                actual: cards.len(),
            });
        }

        if !hand.contains_all(cards) {
            let missing = cards
                .iter()
                .copied()
                .find(|&card| !hand.contains(card))
                .unwrap_or(cards[0]);
            return Err(ExchangeError::CardNotInHand(missing));
        }

        if !hand.remove_all(cards) {
            return Err(ExchangeError::CardNotInHand(cards[0]));
        }

        pair.returned = Some(cards.to_vec());
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.pairs.iter().all(|pair| pair.returned.is_some())
    }

    /// Distribute every transfer at once: tribute to the winners, chosen
    /// returns to the losers. All four transfers are unconditional.
    pub fn apply(self, hands: &mut [Hand; 4]) -> Result<(), ExchangeError> {
        if !self.is_complete() {
            return Err(ExchangeError::Incomplete);
        }

        for pair in self.pairs {
            hands[pair.winner.index()].add_all(&pair.tribute);
            let returned = pair.returned.expect("complete exchange has returns");
            hands[pair.loser.index()].add_all(&returned);
        }

        Ok(())
    }
}
