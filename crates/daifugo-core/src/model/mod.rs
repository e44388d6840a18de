pub mod card;
pub mod deck;
pub mod exchange;
pub mod field;
pub mod hand;
pub mod moves;
pub mod player;
pub mod rank;
pub mod round;
pub mod seat;
pub mod suit;
