pub mod bot;
pub mod policy;

pub use bot::{AiParams, ExchangePlanner, MovePlanner, score_move};
pub use policy::{HeuristicPolicy, Policy, PolicyContext};
