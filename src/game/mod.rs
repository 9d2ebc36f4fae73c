//! Game state: seats, the hand/trick state machine, and history records.

pub mod player;
pub mod record;
pub mod state;

pub use player::Player;
pub use record::{GameOutcome, TrickRecord};
pub use state::{new_game, Game, HandResult, Phase};
