//! Card model: attributes, cards, and the deck.
//!
//! ## Key Types
//!
//! - `Attribute`: one of six binary categories
//! - `Card`: an immutable 6-bit attribute vector
//! - `full_deck`/`is_complete_deck`: deck construction and validation

pub mod attributes;
pub mod card;
pub mod deck;

pub use attributes::Attribute;
pub use card::Card;
pub use deck::{full_deck, is_complete_deck};
