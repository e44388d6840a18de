use crate::bot::{AiParams, ExchangePlanner, MovePlanner};
use crate::policy::{Policy, PolicyContext};
use daifugo_core::model::card::Card;
use daifugo_core::model::moves::Move;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, event};

/// Weighted-scoring policy with its own rng for the noise term. Seeding
/// the policy separately from the match keeps deals reproducible while
/// still letting two runs differ in AI whims.
pub struct HeuristicPolicy {
    params: AiParams,
    rng: StdRng,
}

impl HeuristicPolicy {
    pub fn new(params: AiParams) -> Self {
        Self::with_seed(params, rand::random())
    }

    pub fn with_seed(params: AiParams, seed: u64) -> Self {
        Self {
            params,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn params(&self) -> &AiParams {
        &self.params
    }
}

impl Policy for HeuristicPolicy {
    fn choose_move(&mut self, ctx: &PolicyContext<'_>) -> Move {
        let chosen = MovePlanner::choose(
            ctx.hand,
            ctx.field,
            ctx.is_revolution,
            &self.params,
            &mut self.rng,
        );

        match &chosen {
            Move::Pass => event!(
                target: "daifugo_bot::play",
                Level::DEBUG,
                seat = %ctx.seat,
                hand_len = ctx.hand.len(),
                "pass"
            ),
            Move::Play(set) => event!(
                target: "daifugo_bot::play",
                Level::DEBUG,
                seat = %ctx.seat,
                set = %set,
                strength = set.strength(),
                hand_len = ctx.hand.len(),
                "play"
            ),
        }

        chosen
    }

    fn choose_exchange(&mut self, ctx: &PolicyContext<'_>, count: usize) -> Vec<Card> {
        let give = ExchangePlanner::choose_return(ctx.hand, count);
        event!(
            target: "daifugo_bot::exchange",
            Level::DEBUG,
            seat = %ctx.seat,
            count,
            "give back weakest"
        );
        give
    }
}
