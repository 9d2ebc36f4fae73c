//! The protocol board: six priority-ordered token slots.
//!
//! Slot 0 is the highest priority. Slots are shown 1-based to players
//! ("Slot 1" .. "Slot 6"). Drafting fills every slot with a distinct
//! attribute; manipulation flips values and swaps tokens between slots but
//! never adds or removes one.

use serde::{Deserialize, Serialize};

use super::token::AttributeToken;
use crate::cards::Attribute;
use crate::core::{BoardAction, SLOT_COUNT};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProtocolBoard {
    slots: [Option<AttributeToken>; SLOT_COUNT],
}

impl ProtocolBoard {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fully populated board, slot 0 first.
    ///
    /// ```
    /// use bee_holder::board::{AttributeToken, ProtocolBoard};
    /// use bee_holder::cards::Attribute;
    ///
    /// let board = ProtocolBoard::from_tokens(Attribute::ALL.map(|a| AttributeToken::new(a, true)));
    /// assert!(board.is_complete());
    /// ```
    #[must_use]
    pub fn from_tokens(tokens: [AttributeToken; SLOT_COUNT]) -> Self {
        Self {
            slots: tokens.map(Some),
        }
    }

    /// Remove every token.
    pub fn clear(&mut self) {
        self.slots = [None; SLOT_COUNT];
    }

    /// Put a token into an empty slot.
    ///
    /// Panics if the slot is occupied or the attribute is already placed.
    pub fn place(&mut self, slot: usize, token: AttributeToken) {
        assert!(self.slots[slot].is_none(), "slot {} already filled", slot + 1);
        assert!(
            !self.contains(token.attribute),
            "{} already on the board",
            token.attribute
        );
        self.slots[slot] = Some(token);
    }

    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<&AttributeToken> {
        self.slots[slot].as_ref()
    }

    /// Populated slots in priority order as `(slot index, token)`.
    pub fn tokens(&self) -> impl Iterator<Item = (usize, &AttributeToken)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|token| (i, token)))
    }

    #[must_use]
    pub fn contains(&self, attribute: Attribute) -> bool {
        self.tokens().any(|(_, token)| token.attribute == attribute)
    }

    /// Every slot filled and every attribute present exactly once.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
            && Attribute::ALL.iter().all(|&attr| self.contains(attr))
    }

    /// Apply a manipulation. Both flips and swaps are their own inverse.
    pub fn apply(&mut self, action: BoardAction) {
        match action {
            BoardAction::Flip(slot) => {
                if let Some(token) = self.slots[slot].as_mut() {
                    token.flip();
                }
            }
            BoardAction::Swap(a, b) => self.slots.swap(a, b),
        }
    }
}

impl std::fmt::Display for ProtocolBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (n, (i, token)) in self.tokens().enumerate() {
            if n > 0 {
                writeln!(f)?;
            }
            write!(f, "Slot {}: {}", i + 1, token)?;
        }
        Ok(())
    }
}
