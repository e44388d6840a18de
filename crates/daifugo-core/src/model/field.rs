use crate::model::card::Card;
use crate::model::rank::Rank;

/// The cards most recently played to the table. Empty at round start and
/// after a clear; otherwise a single-rank set.
#[derive(Debug, Clone, Default)]
pub struct Field {
    cards: Vec<Card>,
}

impl Field {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Replace the field with a freshly played set. The caller validates
    /// that the cards share one rank.
    pub fn set(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn rank(&self) -> Option<Rank> {
        self.cards.first().map(|c| c.rank)
    }

    /// Strength a challenger has to beat, under the current mode.
    pub fn strength(&self, is_revolution: bool) -> Option<u8> {
        self.rank().map(|rank| rank.strength(is_revolution))
    }
}

#[cfg(test)]
mod tests {
    use super::Field;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn empty_field_has_no_rank_or_strength() {
        let field = Field::new();
        assert!(field.is_empty());
        assert_eq!(field.rank(), None);
        assert_eq!(field.strength(false), None);
    }

    #[test]
    fn set_and_clear_replace_contents() {
        let mut field = Field::new();
        field.set(vec![
            Card::new(Rank::Five, Suit::Clubs),
            Card::new(Rank::Five, Suit::Hearts),
        ]);
        assert_eq!(field.len(), 2);
        assert_eq!(field.rank(), Some(Rank::Five));
        assert_eq!(field.strength(false), Some(2));
        assert_eq!(field.strength(true), Some(11));

        field.clear();
        assert!(field.is_empty());
    }
}
