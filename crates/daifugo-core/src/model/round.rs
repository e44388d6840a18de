use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::exchange::{ExchangeError, ExchangeState};
use crate::model::field::Field;
use crate::model::hand::Hand;
use crate::model::moves::{Move, MoveError, legal_moves, validate_move};
use crate::model::player::Placing;
use crate::model::seat::Seat;
use std::array;

/// Three consecutive passes (everyone but the last player to lay cards)
/// clear the field. Kept literal even when finished seats shrink the
/// rotation; see DESIGN.md.
const PASSES_TO_CLEAR: u8 = 3;

const CARDS_PER_SEAT: usize = 13;

#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [Hand; 4],
    field: Field,
    is_revolution: bool,
    consecutive_passes: u8,
    has_passed: [bool; 4],
    turn: Seat,
    finish_order: Vec<Seat>,
    placings: [Option<Placing>; 4],
    phase: RoundPhase,
}

#[derive(Debug, Clone)]
pub enum RoundPhase {
    /// Suspended until every exchange winner has chosen its give-backs.
    Exchanging(ExchangeState),
    Playing,
    Finished,
}

/// What a successful play did, for the caller/render layer to observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    pub placing: Option<Placing>,
    pub revolution_toggled: bool,
    pub field_cleared: bool,
    pub round_over: bool,
    pub next_turn: Option<Seat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOutcome {
    pub field_cleared: bool,
    pub next_turn: Seat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    NotInPlayPhase,
    OutOfTurn { expected: Seat, actual: Seat },
    Illegal(MoveError),
}

impl RoundState {
    /// Deal a fresh round: 13 cards per seat, field clear, revolution off.
    /// When `previous` holds a complete ranking the round opens in the
    /// exchange phase (tribute already collected). The starting seat is
    /// the 3 of diamonds holder; `fallback` covers the defensive case of
    /// no hand holding it and should be chosen at random by the caller.
    pub fn deal(deck: &Deck, previous: Option<&[Option<Placing>; 4]>, fallback: Seat) -> Self {
        let cards = deck.cards();
        let mut hands: [Hand; 4] = array::from_fn(|seat| {
            let start = seat * CARDS_PER_SEAT;
            let end = (start + CARDS_PER_SEAT).min(cards.len());
            Hand::with_cards(cards[start..end].to_vec())
        });

        let phase = previous
            .and_then(|placings| ExchangeState::from_placings(placings, &mut hands))
            .map(RoundPhase::Exchanging)
            .unwrap_or(RoundPhase::Playing);

        let turn = Self::starter_holder(&hands).unwrap_or(fallback);

        Self {
            hands,
            field: Field::new(),
            is_revolution: false,
            consecutive_passes: 0,
            has_passed: [false; 4],
            turn,
            finish_order: Vec::new(),
            placings: [None; 4],
            phase,
        }
    }

    fn starter_holder(hands: &[Hand; 4]) -> Option<Seat> {
        Seat::LOOP
            .iter()
            .copied()
            .find(|seat| hands[seat.index()].iter().any(|c| c.is_starter()))
    }

    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, RoundPhase::Finished)
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    /// Public information: how many cards each seat still holds.
    pub fn hand_sizes(&self) -> [usize; 4] {
        array::from_fn(|i| self.hands[i].len())
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn is_revolution(&self) -> bool {
        self.is_revolution
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    pub fn has_passed(&self, seat: Seat) -> bool {
        self.has_passed[seat.index()]
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn finish_order(&self) -> &[Seat] {
        &self.finish_order
    }

    pub fn placing(&self, seat: Seat) -> Option<Placing> {
        self.placings[seat.index()]
    }

    pub fn placings(&self) -> &[Option<Placing>; 4] {
        &self.placings
    }

    /// Every legal move for the seat against the current field.
    pub fn legal_moves_for(&self, seat: Seat) -> Vec<Move> {
        legal_moves(&self.hands[seat.index()], &self.field, self.is_revolution)
    }

    /// Winner seats whose exchange selection is still outstanding.
    pub fn exchange_pending(&self) -> Vec<Seat> {
        match &self.phase {
            RoundPhase::Exchanging(state) => state.pending_seats(),
            _ => Vec::new(),
        }
    }

    pub fn exchange_required_count(&self, seat: Seat) -> Option<usize> {
        match &self.phase {
            RoundPhase::Exchanging(state) => state.required_count(seat),
            _ => None,
        }
    }

    /// Submit a winner's give-back selection during the exchange phase.
    pub fn submit_exchange(&mut self, seat: Seat, cards: &[Card]) -> Result<(), ExchangeError> {
        match &mut self.phase {
            RoundPhase::Exchanging(state) => {
                state.submit_return(seat, cards, &mut self.hands[seat.index()])
            }
            _ => Err(ExchangeError::NotInExchangePhase),
        }
    }

    /// Apply a completed exchange and enter the play phase. The 3 of
    /// diamonds may have changed hands, so the starting seat is resolved
    /// again here.
    pub fn resolve_exchange(&mut self) -> Result<(), ExchangeError> {
        let state = match &self.phase {
            RoundPhase::Exchanging(state) => state.clone(),
            _ => return Err(ExchangeError::NotInExchangePhase),
        };

        if !state.is_complete() {
            return Err(ExchangeError::Incomplete);
        }

        state.apply(&mut self.hands)?;
        for hand in self.hands.iter_mut() {
            hand.sort(self.is_revolution);
        }

        if let Some(starter) = Self::starter_holder(&self.hands) {
            self.turn = starter;
        }
        self.phase = RoundPhase::Playing;
        Ok(())
    }

    /// Play a validated same-rank set for `seat`. A rejected play mutates
    /// nothing and leaves the turn with the same seat.
    pub fn play_cards(&mut self, seat: Seat, cards: &[Card]) -> Result<PlayOutcome, PlayError> {
        if !matches!(self.phase, RoundPhase::Playing) {
            return Err(PlayError::NotInPlayPhase);
        }
        if seat != self.turn {
            return Err(PlayError::OutOfTurn {
                expected: self.turn,
                actual: seat,
            });
        }

        let set = validate_move(
            &self.hands[seat.index()],
            cards,
            &self.field,
            self.is_revolution,
        )
        .map_err(PlayError::Illegal)?;

        if !self.hands[seat.index()].remove_all(set.cards()) {
            return Err(PlayError::Illegal(MoveError::CardNotInHand(cards[0])));
        }
        self.field.set(set.cards().to_vec());
        self.consecutive_passes = 0;
        self.has_passed[seat.index()] = false;

        // Post-play rules, in order: finish, revolution, eight-cut. The
        // last two are independent checks and can both fire on one play.
        let placing = if self.hands[seat.index()].is_empty() {
            Some(self.record_finish(seat))
        } else {
            None
        };
        let round_over = self.finish_order.len() == 4;

        let revolution_toggled = set.triggers_revolution();
        if revolution_toggled {
            self.is_revolution = !self.is_revolution;
        }

        let eight_cut = set.contains_eight();
        if eight_cut {
            self.field.clear();
            self.consecutive_passes = 0;
        }

        let next_turn = if round_over {
            self.phase = RoundPhase::Finished;
            None
        } else {
            // Eight-cut grants the same seat another action, unless that
            // seat just finished; then rotation proceeds normally.
            if !(eight_cut && placing.is_none()) {
                self.advance_turn();
            }
            Some(self.turn)
        };

        Ok(PlayOutcome {
            placing,
            revolution_toggled,
            field_cleared: eight_cut,
            round_over,
            next_turn,
        })
    }

    /// Pass is always legal for the seat to act.
    pub fn pass(&mut self, seat: Seat) -> Result<PassOutcome, PlayError> {
        if !matches!(self.phase, RoundPhase::Playing) {
            return Err(PlayError::NotInPlayPhase);
        }
        if seat != self.turn {
            return Err(PlayError::OutOfTurn {
                expected: self.turn,
                actual: seat,
            });
        }

        self.has_passed[seat.index()] = true;
        self.consecutive_passes += 1;

        let field_cleared = self.consecutive_passes >= PASSES_TO_CLEAR;
        if field_cleared {
            self.field.clear();
            self.consecutive_passes = 0;
        }

        self.advance_turn();
        Ok(PassOutcome {
            field_cleared,
            next_turn: self.turn,
        })
    }

    fn record_finish(&mut self, seat: Seat) -> Placing {
        self.finish_order.push(seat);
        let placing = Placing::from_position(self.finish_order.len())
            .expect("at most four finishers per round");
        self.placings[seat.index()] = Some(placing);

        // Third finisher settles the round: the sole remaining seat is
        // the Daihinmin.
        if self.finish_order.len() == 3 {
            if let Some(last) = Seat::LOOP
                .iter()
                .copied()
                .find(|s| self.placings[s.index()].is_none())
            {
                self.finish_order.push(last);
                self.placings[last.index()] = Some(Placing::Daihinmin);
            }
        }

        placing
    }

    fn advance_turn(&mut self) {
        for _ in 0..4 {
            self.turn = self.turn.next();
            if self.placings[self.turn.index()].is_none() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayError, RoundPhase, RoundState};
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::hand::Hand;
    use crate::model::moves::MoveError;
    use crate::model::player::Placing;
    use crate::model::rank::Rank;
    use crate::model::seat::Seat;
    use crate::model::suit::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    /// Build a playing-phase round with fixed hands and turn.
    fn rigged_round(hands: [Vec<Card>; 4], turn: Seat) -> RoundState {
        let deck = Deck::standard();
        let mut round = RoundState::deal(&deck, None, Seat::South);
        round.hands = hands.map(Hand::with_cards);
        round.turn = turn;
        round
    }

    #[test]
    fn dealing_distributes_thirteen_cards_per_seat() {
        let deck = Deck::shuffled_with_seed(7);
        let round = RoundState::deal(&deck, None, Seat::South);

        assert_eq!(round.hand_sizes(), [13, 13, 13, 13]);
        assert!(matches!(round.phase(), RoundPhase::Playing));
        assert!(round.field().is_empty());
        assert!(!round.is_revolution());
        assert!(round.finish_order().is_empty());
    }

    #[test]
    fn starting_seat_holds_three_of_diamonds() {
        let deck = Deck::shuffled_with_seed(21);
        let round = RoundState::deal(&deck, None, Seat::South);

        let starter = card(Rank::Three, Suit::Diamonds);
        let expected = Seat::LOOP
            .iter()
            .copied()
            .find(|seat| round.hand(*seat).contains(starter))
            .expect("three of diamonds is dealt");
        assert_eq!(round.turn(), expected);
    }

    #[test]
    fn play_transfers_ownership_to_field() {
        let deck = Deck::standard();
        let mut round = RoundState::deal(&deck, None, Seat::South);
        let seat = round.turn();

        let single = [round.hand(seat).cards()[0]];
        let outcome = round.play_cards(seat, &single).unwrap();

        assert_eq!(round.hand(seat).len(), 12);
        assert!(!round.hand(seat).contains(single[0]));
        assert_eq!(round.field().cards(), &single);
        assert_eq!(outcome.next_turn, Some(seat.next()));
        assert!(!outcome.round_over);
    }

    #[test]
    fn rejected_play_changes_nothing_and_keeps_the_turn() {
        let deck = Deck::standard();
        let mut round = RoundState::deal(&deck, None, Seat::South);
        let seat = round.turn();
        let other = seat.next();

        let stolen = [round.hand(other).cards()[0]];
        let err = round.play_cards(seat, &stolen).unwrap_err();
        assert_eq!(err, PlayError::Illegal(MoveError::CardNotInHand(stolen[0])));
        assert_eq!(round.turn(), seat);
        assert_eq!(round.hand_sizes(), [13, 13, 13, 13]);

        let theirs = [round.hand(other).cards()[0]];
        assert_eq!(
            round.play_cards(other, &theirs).unwrap_err(),
            PlayError::OutOfTurn {
                expected: seat,
                actual: other
            }
        );
    }

    #[test]
    fn three_passes_clear_the_field() {
        let mut round = rigged_round(
            [
                vec![card(Rank::King, Suit::Spades), card(Rank::Two, Suit::Spades)],
                vec![card(Rank::Four, Suit::Hearts), card(Rank::Five, Suit::Hearts)],
                vec![card(Rank::Four, Suit::Diamonds), card(Rank::Five, Suit::Diamonds)],
                vec![card(Rank::Four, Suit::Clubs), card(Rank::Five, Suit::Clubs)],
            ],
            Seat::South,
        );

        round
            .play_cards(Seat::South, &[card(Rank::King, Suit::Spades)])
            .unwrap();

        assert!(!round.pass(Seat::East).unwrap().field_cleared);
        assert!(!round.pass(Seat::North).unwrap().field_cleared);
        let third = round.pass(Seat::West).unwrap();
        assert!(third.field_cleared);
        assert!(round.field().is_empty());
        assert_eq!(round.consecutive_passes(), 0);
        // Rotation still advances past the last passer.
        assert_eq!(third.next_turn, Seat::South);
    }

    #[test]
    fn four_of_a_rank_toggles_revolution_without_extra_turn() {
        let mut round = rigged_round(
            [
                vec![
                    card(Rank::Nine, Suit::Spades),
                    card(Rank::Nine, Suit::Hearts),
                    card(Rank::Nine, Suit::Diamonds),
                    card(Rank::Nine, Suit::Clubs),
                    card(Rank::Three, Suit::Spades),
                ],
                vec![card(Rank::Four, Suit::Hearts)],
                vec![card(Rank::Four, Suit::Diamonds)],
                vec![card(Rank::Four, Suit::Clubs)],
            ],
            Seat::South,
        );

        let nines = [
            card(Rank::Nine, Suit::Spades),
            card(Rank::Nine, Suit::Hearts),
            card(Rank::Nine, Suit::Diamonds),
            card(Rank::Nine, Suit::Clubs),
        ];
        let outcome = round.play_cards(Seat::South, &nines).unwrap();

        assert!(outcome.revolution_toggled);
        assert!(round.is_revolution());
        assert!(!outcome.field_cleared, "nines do not cut the field");
        assert_eq!(outcome.next_turn, Some(Seat::East), "no extra turn");
        assert_eq!(round.field().len(), 4);
    }

    #[test]
    fn eight_cut_clears_field_and_retains_the_turn() {
        let mut round = rigged_round(
            [
                vec![card(Rank::Eight, Suit::Spades), card(Rank::Three, Suit::Spades)],
                vec![card(Rank::Four, Suit::Hearts)],
                vec![card(Rank::Four, Suit::Diamonds)],
                vec![card(Rank::Four, Suit::Clubs)],
            ],
            Seat::South,
        );

        let outcome = round
            .play_cards(Seat::South, &[card(Rank::Eight, Suit::Spades)])
            .unwrap();

        assert!(outcome.field_cleared);
        assert!(!outcome.revolution_toggled);
        assert!(round.field().is_empty());
        assert_eq!(outcome.next_turn, Some(Seat::South), "same seat acts again");

        // The freed seat may open with anything, weak cards included.
        round
            .play_cards(Seat::South, &[card(Rank::Three, Suit::Spades)])
            .unwrap();
    }

    #[test]
    fn four_eights_fire_both_rules_at_once() {
        let mut round = rigged_round(
            [
                vec![
                    card(Rank::Eight, Suit::Spades),
                    card(Rank::Eight, Suit::Hearts),
                    card(Rank::Eight, Suit::Diamonds),
                    card(Rank::Eight, Suit::Clubs),
                    card(Rank::Three, Suit::Spades),
                ],
                vec![card(Rank::Four, Suit::Hearts)],
                vec![card(Rank::Four, Suit::Diamonds)],
                vec![card(Rank::Four, Suit::Clubs)],
            ],
            Seat::South,
        );

        let eights = [
            card(Rank::Eight, Suit::Spades),
            card(Rank::Eight, Suit::Hearts),
            card(Rank::Eight, Suit::Diamonds),
            card(Rank::Eight, Suit::Clubs),
        ];
        let outcome = round.play_cards(Seat::South, &eights).unwrap();

        assert!(outcome.revolution_toggled);
        assert!(outcome.field_cleared);
        assert!(round.is_revolution());
        assert!(round.field().is_empty());
        assert_eq!(outcome.next_turn, Some(Seat::South));
    }

    #[test]
    fn finishing_with_an_eight_advances_normally() {
        let mut round = rigged_round(
            [
                vec![card(Rank::Eight, Suit::Spades)],
                vec![card(Rank::Four, Suit::Hearts), card(Rank::Five, Suit::Hearts)],
                vec![card(Rank::Four, Suit::Diamonds), card(Rank::Five, Suit::Diamonds)],
                vec![card(Rank::Four, Suit::Clubs), card(Rank::Five, Suit::Clubs)],
            ],
            Seat::South,
        );

        let outcome = round
            .play_cards(Seat::South, &[card(Rank::Eight, Suit::Spades)])
            .unwrap();

        assert_eq!(outcome.placing, Some(Placing::Daifugo));
        assert!(outcome.field_cleared);
        assert_eq!(outcome.next_turn, Some(Seat::East), "no extra turn for a finished seat");
    }

    #[test]
    fn third_finisher_settles_the_round() {
        let mut round = rigged_round(
            [
                vec![card(Rank::Five, Suit::Spades)],
                vec![card(Rank::Six, Suit::Hearts)],
                vec![card(Rank::Seven, Suit::Diamonds)],
                vec![card(Rank::Three, Suit::Clubs), card(Rank::Four, Suit::Clubs)],
            ],
            Seat::South,
        );

        let first = round
            .play_cards(Seat::South, &[card(Rank::Five, Suit::Spades)])
            .unwrap();
        assert_eq!(first.placing, Some(Placing::Daifugo));
        assert!(!first.round_over);

        let second = round
            .play_cards(Seat::East, &[card(Rank::Six, Suit::Hearts)])
            .unwrap();
        assert_eq!(second.placing, Some(Placing::Fugo));

        let third = round
            .play_cards(Seat::North, &[card(Rank::Seven, Suit::Diamonds)])
            .unwrap();
        assert_eq!(third.placing, Some(Placing::Hinmin));
        assert!(third.round_over);
        assert_eq!(third.next_turn, None);

        assert!(round.is_finished());
        assert_eq!(round.placing(Seat::West), Some(Placing::Daihinmin));
        assert_eq!(
            round.finish_order(),
            &[Seat::South, Seat::East, Seat::North, Seat::West]
        );
        assert_eq!(
            round.pass(Seat::West).unwrap_err(),
            PlayError::NotInPlayPhase
        );
    }

    #[test]
    fn rotation_skips_finished_seats() {
        let mut round = rigged_round(
            [
                vec![card(Rank::Five, Suit::Spades)],
                vec![card(Rank::Six, Suit::Hearts), card(Rank::Seven, Suit::Hearts)],
                vec![card(Rank::Six, Suit::Diamonds), card(Rank::Seven, Suit::Diamonds)],
                vec![card(Rank::Six, Suit::Clubs), card(Rank::Seven, Suit::Clubs)],
            ],
            Seat::South,
        );

        round
            .play_cards(Seat::South, &[card(Rank::Five, Suit::Spades)])
            .unwrap();

        // South has finished; after West the turn must come back to East.
        round.pass(Seat::East).unwrap();
        round.pass(Seat::North).unwrap();
        let outcome = round.pass(Seat::West).unwrap();
        assert_eq!(outcome.next_turn, Seat::East);
    }

    #[test]
    fn exchange_phase_blocks_play_until_resolved() {
        let deck = Deck::shuffled_with_seed(3);
        let placings = [
            Some(Placing::Daifugo),
            Some(Placing::Fugo),
            Some(Placing::Hinmin),
            Some(Placing::Daihinmin),
        ];
        let mut round = RoundState::deal(&deck, Some(&placings), Seat::South);

        assert!(matches!(round.phase(), RoundPhase::Exchanging(_)));
        assert_eq!(round.exchange_pending(), vec![Seat::South, Seat::East]);
        assert_eq!(
            round
                .play_cards(Seat::South, &[round.hand(Seat::South).cards()[0]])
                .unwrap_err(),
            PlayError::NotInPlayPhase
        );

        let south_gives = round.hand(Seat::South).weakest(2);
        round.submit_exchange(Seat::South, &south_gives).unwrap();
        let east_gives = round.hand(Seat::East).weakest(1);
        round.submit_exchange(Seat::East, &east_gives).unwrap();

        round.resolve_exchange().unwrap();
        assert!(matches!(round.phase(), RoundPhase::Playing));
        assert_eq!(round.hand_sizes(), [13, 13, 13, 13]);

        // The starting seat tracks the three of diamonds after the swap.
        let starter = card(Rank::Three, Suit::Diamonds);
        let expected = Seat::LOOP
            .iter()
            .copied()
            .find(|seat| round.hand(*seat).contains(starter))
            .expect("three of diamonds in some hand");
        assert_eq!(round.turn(), expected);
    }

    #[test]
    fn first_round_has_no_exchange() {
        let deck = Deck::shuffled_with_seed(3);
        let round = RoundState::deal(&deck, None, Seat::South);
        assert!(matches!(round.phase(), RoundPhase::Playing));
        assert!(round.exchange_pending().is_empty());
    }
}
