//! The 64-card deck.
//!
//! One card per attribute combination. Cards are never created or destroyed
//! after the deck is built; they only move between hands, score piles, and
//! the box.

use rustc_hash::FxHashSet;

use super::card::Card;
use crate::core::DECK_SIZE;

/// All 64 cards in index order.
#[must_use]
pub fn full_deck() -> Vec<Card> {
    (0..DECK_SIZE as u8).map(Card::from_index).collect()
}

/// Whether `cards` is exactly the full deck: 64 cards, none repeated.
///
/// ```
/// use bee_holder::cards::{full_deck, is_complete_deck};
///
/// let mut deck = full_deck();
/// assert!(is_complete_deck(&deck));
/// deck[0] = deck[1];
/// assert!(!is_complete_deck(&deck));
/// ```
#[must_use]
pub fn is_complete_deck<'a>(cards: impl IntoIterator<Item = &'a Card>) -> bool {
    let mut seen = FxHashSet::default();
    let mut count = 0usize;
    for card in cards {
        count += 1;
        if !seen.insert(*card) {
            return false;
        }
    }
    count == DECK_SIZE
}
