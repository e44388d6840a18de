use super::AiParams;
use daifugo_core::model::field::Field;
use daifugo_core::model::hand::Hand;
use daifugo_core::model::moves::{Move, legal_moves};
use daifugo_core::model::rank::Rank;
use rand::Rng;

/// Desirability of one candidate move. Deterministic terms plus a bounded
/// noise term of `uniform(-1, 1) * 50 * epsilon`, applied to every
/// candidate (Pass included) so play never becomes fully predictable.
/// With `epsilon == 0` the result is a pure function of its inputs.
pub fn score_move<R: Rng + ?Sized>(
    candidate: &Move,
    hand: &Hand,
    params: &AiParams,
    rng: &mut R,
) -> f64 {
    let mut score = rng.gen_range(-1.0..1.0) * 50.0 * params.epsilon;

    let Some(set) = candidate.play() else {
        return score;
    };

    let count = set.count();
    let strength = set.strength() as f64;

    // Base incentive to act rather than pass.
    score += 100.0 * params.w_attack;

    // Impact: high strength and bigger sets.
    score += strength * 5.0;
    score += (count as f64 - 1.0) * 20.0;

    // An eight clears the field, useful on both offense and defense.
    if set.contains_eight() {
        score += 50.0 * (params.w_attack + params.w_defense);
    }

    // Conserve the strongest ordinary holding early; the penalty fades as
    // the hand empties.
    let endgame_factor = (13.0 - hand.len() as f64) / 13.0;
    if set.strength() == Rank::TOP_STRENGTH {
        score -= 100.0 * params.w_trump * (1.0 - endgame_factor);
    }

    // Breaking up a larger same-rank set costs flexibility.
    if hand.rank_count(set.rank()) > count {
        score -= 60.0 * params.w_defense;
    }

    // Four of a rank toggles the revolution.
    if count >= 4 {
        score += 150.0 * params.w_revolution;
    }

    // Going out overrides everything else.
    if hand.len() == count {
        score += 10000.0;
    }

    score
}

pub struct MovePlanner;

impl MovePlanner {
    /// Enumerate, score, and pick the best candidate. Ties break toward
    /// the earlier enumeration entry, though the per-candidate noise
    /// makes exact ties rare by construction.
    pub fn choose<R: Rng + ?Sized>(
        hand: &Hand,
        field: &Field,
        is_revolution: bool,
        params: &AiParams,
        rng: &mut R,
    ) -> Move {
        let candidates = legal_moves(hand, field, is_revolution);

        let mut best: Option<(usize, f64)> = None;
        for (index, candidate) in candidates.iter().enumerate() {
            let score = score_move(candidate, hand, params, rng);
            match best {
                None => best = Some((index, score)),
                Some((_, best_score)) if score > best_score => best = Some((index, score)),
                Some(_) => {}
            }
        }

        let (index, _) = best.expect("pass is always a candidate");
        candidates.into_iter().nth(index).expect("index from enumeration")
    }
}
