//! Card desirability against a board.
//!
//! A matched slot `i` is worth `2^(5 - i)`. Slot 0 (32) outweighs every
//! lower slot combined (31), so the integer order is the lexicographic order
//! of matches by slot priority.

use super::protocol::ProtocolBoard;
use crate::cards::Card;
use crate::core::SLOT_COUNT;

/// Weight of a matched slot.
#[must_use]
pub const fn slot_weight(slot: usize) -> u32 {
    1 << (SLOT_COUNT - 1 - slot)
}

/// Score a card against the board. Empty slots contribute nothing.
///
/// ```
/// use bee_holder::board::{score, AttributeToken, ProtocolBoard};
/// use bee_holder::cards::{Attribute, Card};
///
/// let mut board = ProtocolBoard::new();
/// board.place(0, AttributeToken::new(Attribute::Texture, true));
/// board.place(5, AttributeToken::new(Attribute::Payload, true));
///
/// assert_eq!(score(Card::from_index(0b10_0001), &board), 33);
/// assert_eq!(score(Card::from_index(0), &board), 0);
/// ```
#[must_use]
pub fn score(card: Card, board: &ProtocolBoard) -> u32 {
    board
        .tokens()
        .filter(|(_, token)| token.accepts(card))
        .map(|(slot, _)| slot_weight(slot))
        .sum()
}

/// Index and score of the best card in `hand`; ties go to the earliest.
///
/// `None` for an empty hand.
#[must_use]
pub fn best_card(hand: &[Card], board: &ProtocolBoard) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;
    for (i, &card) in hand.iter().enumerate() {
        let s = score(card, board);
        if best.map_or(true, |(_, top)| s > top) {
            best = Some((i, s));
        }
    }
    best
}
