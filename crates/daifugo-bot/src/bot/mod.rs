mod exchange;
mod score;

pub use exchange::ExchangePlanner;
pub use score::{MovePlanner, score_move};

/// Per-character scoring weights. Loaded once when the seat is created
/// and read-only afterwards; every weight defaults to 0.5 with a 0.1
/// noise amplitude when character data supplies nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiParams {
    pub w_attack: f64,
    pub w_defense: f64,
    pub w_revolution: f64,
    pub w_trump: f64,
    pub epsilon: f64,
}

impl Default for AiParams {
    fn default() -> Self {
        Self {
            w_attack: 0.5,
            w_defense: 0.5,
            w_revolution: 0.5,
            w_trump: 0.5,
            epsilon: 0.1,
        }
    }
}
