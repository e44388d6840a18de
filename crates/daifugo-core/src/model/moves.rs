use crate::model::card::Card;
use crate::model::field::Field;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use core::fmt;

/// One candidate action for the seat to act: pass, or lay down a
/// same-rank set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    Pass,
    Play(PlaySet),
}

impl Move {
    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    pub fn play(&self) -> Option<&PlaySet> {
        match self {
            Move::Pass => None,
            Move::Play(set) => Some(set),
        }
    }
}

/// A validated same-rank set together with its derived rank/strength.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaySet {
    cards: Vec<Card>,
    rank: Rank,
    strength: u8,
}

impl PlaySet {
    fn new(cards: Vec<Card>, is_revolution: bool) -> Self {
        debug_assert!(!cards.is_empty());
        debug_assert!(cards.iter().all(|c| c.rank == cards[0].rank));
        let rank = cards[0].rank;
        Self {
            cards,
            rank,
            strength: rank.strength(is_revolution),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn strength(&self) -> u8 {
        self.strength
    }

    pub fn contains_eight(&self) -> bool {
        self.cards.iter().any(|c| c.is_eight())
    }

    /// Four or more cards of one rank toggle the revolution flag.
    pub fn triggers_revolution(&self) -> bool {
        self.count() >= 4
    }
}

impl fmt::Display for PlaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

/// Why an externally supplied selection was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    EmptySelection,
    MixedRanks,
    CardNotInHand(Card),
    CountMismatch { required: usize, actual: usize },
    TooWeak { required: u8, actual: u8 },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::EmptySelection => f.write_str("no cards selected"),
            MoveError::MixedRanks => f.write_str("selected cards are not all one rank"),
            MoveError::CardNotInHand(card) => write!(f, "{card} is not in the hand"),
            MoveError::CountMismatch { required, actual } => {
                write!(f, "field requires {required} cards, got {actual}")
            }
            MoveError::TooWeak { required, actual } => {
                write!(f, "strength {actual} does not beat the field's {required}")
            }
        }
    }
}

/// Enumerate every legal move for `hand` against `field`. Pass is always
/// first; non-pass moves follow in ascending rank-value order, smaller
/// sets before larger ones within a rank.
pub fn legal_moves(hand: &Hand, field: &Field, is_revolution: bool) -> Vec<Move> {
    let mut moves = vec![Move::Pass];

    let required = field.len();
    let min_strength = field.strength(is_revolution);

    for rank in Rank::ORDERED.iter().copied() {
        let group: Vec<Card> = hand.iter().copied().filter(|c| c.rank == rank).collect();
        if group.is_empty() {
            continue;
        }

        if required > 0 {
            // Must match the field's count exactly and strictly beat it.
            let beats = min_strength
                .map(|min| rank.strength(is_revolution) > min)
                .unwrap_or(true);
            if group.len() >= required && beats {
                let cards = group[..required].to_vec();
                moves.push(Move::Play(PlaySet::new(cards, is_revolution)));
            }
        } else {
            for n in 1..=group.len() {
                let cards = group[..n].to_vec();
                moves.push(Move::Play(PlaySet::new(cards, is_revolution)));
            }
        }
    }

    moves
}

/// Validate an externally supplied selection against the same legality
/// rule the enumerator uses. Returns the derived set on success; the hand
/// is not modified either way.
pub fn validate_move(
    hand: &Hand,
    cards: &[Card],
    field: &Field,
    is_revolution: bool,
) -> Result<PlaySet, MoveError> {
    if cards.is_empty() {
        return Err(MoveError::EmptySelection);
    }

    let rank = cards[0].rank;
    if cards.iter().any(|c| c.rank != rank) {
        return Err(MoveError::MixedRanks);
    }

    let mut probe = hand.clone();
    for &card in cards {
        if !probe.remove(card) {
            return Err(MoveError::CardNotInHand(card));
        }
    }

    if !field.is_empty() {
        if cards.len() != field.len() {
            return Err(MoveError::CountMismatch {
                required: field.len(),
                actual: cards.len(),
            });
        }
        let required = field
            .strength(is_revolution)
            .expect("non-empty field has a strength");
        let actual = rank.strength(is_revolution);
        if actual <= required {
            return Err(MoveError::TooWeak { required, actual });
        }
    }

    Ok(PlaySet::new(cards.to_vec(), is_revolution))
}
