//! Core types: seats, RNG, configuration, errors, board actions.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use action::{ActionRecord, BoardAction};
pub use config::{
    GameConfig, ATTRIBUTE_COUNT, DECK_SIZE, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS, SLOT_COUNT,
    WIN_THRESHOLD,
};
pub use error::ConfigError;
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
