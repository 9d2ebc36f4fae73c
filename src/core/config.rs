//! Game configuration and fixed rule constants.
//!
//! The rule set is fixed: six attributes, seven-card hands, first to ten
//! tricks. Only the table size, narration, and seed are configurable.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Number of card attributes (and board slots).
pub const ATTRIBUTE_COUNT: usize = 6;

/// Number of priority slots on the protocol board.
pub const SLOT_COUNT: usize = ATTRIBUTE_COUNT;

/// One card per attribute combination.
pub const DECK_SIZE: usize = 1 << ATTRIBUTE_COUNT;

/// Cards dealt to every player each hand, and tricks per hand.
pub const HAND_SIZE: usize = 7;

/// Tricks needed to win.
pub const WIN_THRESHOLD: u32 = 10;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;

/// Game configuration.
///
/// ```
/// use bee_holder::core::GameConfig;
///
/// let config = GameConfig::new(3).verbose().with_seed(42);
/// assert!(config.validate().is_ok());
/// assert!(GameConfig::new(6).validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (2-5).
    pub player_count: usize,

    /// Narrate every phase through `tracing` at info level.
    pub verbose: bool,

    /// Seed for the game RNG. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Create a quiet, unseeded configuration.
    ///
    /// Not validated until `validate` (or game construction).
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            verbose: false,
            seed: None,
        }
    }

    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the player count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            Ok(())
        } else {
            Err(ConfigError::InvalidPlayerCount {
                count: self.player_count,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_covers_every_combination() {
        assert_eq!(DECK_SIZE, 64);
        assert!(HAND_SIZE * MAX_PLAYERS <= DECK_SIZE);
    }

    #[test]
    fn test_validate_range() {
        for n in 0..10 {
            let result = GameConfig::new(n).validate();
            if (2..=5).contains(&n) {
                assert!(result.is_ok(), "{n} players should be valid");
            } else {
                assert_eq!(result, Err(ConfigError::InvalidPlayerCount { count: n }));
            }
        }
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new(4).verbose().with_seed(9);
        assert_eq!(config.player_count, 4);
        assert!(config.verbose);
        assert_eq!(config.seed, Some(9));

        let quiet = config.with_verbose(false);
        assert!(!quiet.verbose);
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::new(2).with_seed(1);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
