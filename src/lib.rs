//! # bee-holder
//!
//! Simulator for *Eye of the Bee-Holder*, a trick-taking card game where a
//! drafted protocol board, not a trump suit, decides every trick.
//!
//! ## Rules in Brief
//!
//! 1. **Deck**: 64 cards, one per combination of six binary attributes.
//!
//! 2. **Protocol board**: six priority slots, each holding one attribute
//!    token with a required value. A card scores `2^(5-i)` for every slot
//!    `i` it matches, so one higher slot outranks all lower slots together.
//!
//! 3. **Judgement**: slots are checked from the top. Plays that fail a
//!    matched slot are eliminated; slots nobody matches are skipped.
//!    Survivors of every slot are tie-broken by play order.
//!
//! 4. **Manipulation**: after tricks 1-6 every player flips or swaps
//!    tokens, and may not repeat the previous player's action.
//!
//! First to ten tricks with a strict lead wins. A tie at ten or more
//! goes to sudden death.
//!
//! ## Modules
//!
//! - `core`: seats, RNG, configuration, errors, board actions
//! - `cards`: attributes, cards, and the deck
//! - `board`: tokens, the protocol board, and scoring
//! - `rules`: drafting, trick play and judgement, manipulation AI
//! - `game`: the hand/game state machine and its records
//! - `stats`: batch statistics over many games

pub mod board;
pub mod cards;
pub mod core;
pub mod game;
pub mod rules;
pub mod stats;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, BoardAction, ConfigError, GameConfig, GameRng, PlayerId, PlayerMap,
};

pub use crate::cards::{full_deck, is_complete_deck, Attribute, Card};

pub use crate::board::{best_card, score, AttributeToken, ProtocolBoard};

pub use crate::rules::{choose_action, choose_card, choose_token, judge, Judgement, Play};

pub use crate::game::{new_game, Game, GameOutcome, HandResult, Phase, Player, TrickRecord};

pub use crate::stats::{run_statistics, run_statistics_sequential, GameStats};
