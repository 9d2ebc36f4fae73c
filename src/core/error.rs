//! Configuration errors.
//!
//! The player count is the only thing a caller can get wrong. Everything
//! past game construction is an internal invariant and panics on violation.

use thiserror::Error;

use super::config::{MAX_PLAYERS, MIN_PLAYERS};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid number of players: {count} (must be {min}-{max})", min = MIN_PLAYERS, max = MAX_PLAYERS)]
    InvalidPlayerCount { count: usize },
}
