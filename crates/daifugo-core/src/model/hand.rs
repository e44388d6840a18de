use crate::model::card::Card;
use crate::model::rank::Rank;

/// Cards owned by exactly one seat. Cards only ever leave through
/// `remove`/`remove_all`, so a played card cannot reappear here.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort(false);
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn add_all(&mut self, cards: &[Card]) {
        self.cards.extend_from_slice(cards);
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    /// Remove a whole set atomically: either every requested card is
    /// present (as a multiset) and all are removed, or the hand is left
    /// untouched and `false` is returned.
    pub fn remove_all(&mut self, cards: &[Card]) -> bool {
        let mut indices = Vec::with_capacity(cards.len());
        for card in cards {
            match self
                .cards
                .iter()
                .enumerate()
                .position(|(i, c)| c == card && !indices.contains(&i))
            {
                Some(index) => indices.push(index),
                None => return false,
            }
        }
        indices.sort_unstable();
        for index in indices.into_iter().rev() {
            self.cards.remove(index);
        }
        true
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn contains_all(&self, cards: &[Card]) -> bool {
        let mut probe = self.clone();
        cards.iter().all(|&card| probe.remove(card))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn rank_count(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|c| c.rank == rank).count()
    }

    /// Sort ascending by strength under the given mode.
    pub fn sort(&mut self, is_revolution: bool) {
        self.cards.sort_by_key(|c| c.strength(is_revolution));
    }

    /// The `count` highest cards by base (non-revolution) strength, the
    /// ordering the exchange uses.
    pub fn strongest(&self, count: usize) -> Vec<Card> {
        let mut sorted = self.cards.clone();
        sorted.sort_by_key(|c| c.rank.base_strength());
        let skip = sorted.len().saturating_sub(count);
        sorted.split_off(skip)
    }

    /// The `count` lowest cards by base strength.
    pub fn weakest(&self, count: usize) -> Vec<Card> {
        let mut sorted = self.cards.clone();
        sorted.sort_by_key(|c| c.rank.base_strength());
        sorted.truncate(count.min(sorted.len()));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        let c = card(Rank::Three, Suit::Clubs);
        hand.add(c);
        assert!(hand.contains(c));
        assert!(hand.remove(c));
        assert!(!hand.contains(c));
        assert!(!hand.remove(c));
    }

    #[test]
    fn remove_all_is_atomic() {
        let mut hand = Hand::with_cards(vec![
            card(Rank::Six, Suit::Spades),
            card(Rank::Six, Suit::Hearts),
            card(Rank::King, Suit::Clubs),
        ]);

        let missing = [card(Rank::Six, Suit::Spades), card(Rank::Six, Suit::Clubs)];
        assert!(!hand.remove_all(&missing));
        assert_eq!(hand.len(), 3);

        let pair = [card(Rank::Six, Suit::Spades), card(Rank::Six, Suit::Hearts)];
        assert!(hand.remove_all(&pair));
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn remove_all_rejects_duplicate_requests() {
        let mut hand = Hand::with_cards(vec![card(Rank::Six, Suit::Spades)]);
        let twice = [card(Rank::Six, Suit::Spades), card(Rank::Six, Suit::Spades)];
        assert!(!hand.remove_all(&twice));
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn sort_follows_mode_strength() {
        let mut hand = Hand::new();
        hand.add(card(Rank::Two, Suit::Clubs));
        hand.add(card(Rank::Three, Suit::Spades));
        hand.add(card(Rank::Ace, Suit::Hearts));

        hand.sort(false);
        assert_eq!(hand.cards()[0].rank, Rank::Three);
        assert_eq!(hand.cards()[2].rank, Rank::Two);

        hand.sort(true);
        assert_eq!(hand.cards()[0].rank, Rank::Two);
        assert_eq!(hand.cards()[2].rank, Rank::Three);
    }

    #[test]
    fn strongest_and_weakest_use_base_strength() {
        let hand = Hand::with_cards(vec![
            card(Rank::Two, Suit::Clubs),
            card(Rank::Five, Suit::Spades),
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Four, Suit::Diamonds),
        ]);

        let top = hand.strongest(2);
        assert_eq!(top.len(), 2);
        assert!(top.iter().any(|c| c.rank == Rank::Two));
        assert!(top.iter().any(|c| c.rank == Rank::Ace));

        let bottom = hand.weakest(2);
        assert!(bottom.iter().any(|c| c.rank == Rank::Four));
        assert!(bottom.iter().any(|c| c.rank == Rank::Five));
    }

    #[test]
    fn rank_count_counts_multiset() {
        let hand = Hand::with_cards(vec![
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Nine, Suit::Spades),
            card(Rank::Ten, Suit::Clubs),
        ]);
        assert_eq!(hand.rank_count(Rank::Nine), 2);
        assert_eq!(hand.rank_count(Rank::Jack), 0);
    }
}
