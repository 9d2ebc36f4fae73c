//! Trick history and final game outcome.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ActionRecord, PlayerId, PlayerMap, MAX_PLAYERS};
use crate::rules::{Judgement, Plays};

/// Everything that happened in one trick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickRecord {
    /// Hand number (1-based).
    pub hand: u32,

    /// Trick number within the hand (1-based).
    pub trick: u8,

    /// Who led the trick.
    pub leader: PlayerId,

    /// Revealed cards in leader-first order.
    pub plays: Plays,

    pub judgement: Judgement,

    /// Manipulations applied after judgement. Empty on the last trick of a
    /// hand and when sudden death ended the game.
    pub actions: SmallVec<[ActionRecord; MAX_PLAYERS]>,
}

/// Read-back summary of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: PlayerId,

    /// Tricks won per player.
    pub tricks: PlayerMap<u32>,

    /// Times each player reached a 2-trick winning streak.
    pub two_streaks: PlayerMap<u32>,

    /// Times each player reached a 3-trick winning streak.
    pub three_streaks: PlayerMap<u32>,

    /// Hands started, including one cut short by sudden death.
    pub hands_played: u32,

    /// Whether the game went to sudden death.
    pub sudden_death: bool,
}

impl GameOutcome {
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.tricks.player_count()
    }

    #[must_use]
    pub fn total_tricks(&self) -> u32 {
        self.tricks.values().sum()
    }
}
