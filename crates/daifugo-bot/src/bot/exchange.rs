use daifugo_core::model::card::Card;
use daifugo_core::model::hand::Hand;

/// Exchange selections for an unattended seat. Tribute from the losing
/// seats is collected by the engine itself; only the winners' give-backs
/// need a decision, and the obvious one is to shed the weakest cards.
pub struct ExchangePlanner;

impl ExchangePlanner {
    pub fn choose_return(hand: &Hand, count: usize) -> Vec<Card> {
        hand.weakest(count)
    }
}
