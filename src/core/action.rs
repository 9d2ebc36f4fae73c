//! Board manipulation actions.
//!
//! After every trick but the last of a hand, each player either flips the
//! value of one slot's token or swaps the tokens of two slots. There are
//! 21 candidates: six flips, then fifteen swaps.

use serde::{Deserialize, Serialize};

use super::config::SLOT_COUNT;
use super::player::PlayerId;

/// A single board manipulation.
///
/// Slot indices are 0-based. Swaps are unordered: `Swap(1, 4)` and
/// `Swap(4, 1)` are the same manipulation, see [`BoardAction::same_as`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardAction {
    /// Invert the value of the token in a slot.
    Flip(usize),
    /// Exchange the tokens of two distinct slots.
    Swap(usize, usize),
}

impl BoardAction {
    /// All candidate actions in search order: flips by ascending slot, then
    /// swaps by ascending `(a, b)` with `a < b`.
    ///
    /// ```
    /// use bee_holder::core::BoardAction;
    ///
    /// let all: Vec<_> = BoardAction::candidates().collect();
    /// assert_eq!(all.len(), 21);
    /// assert_eq!(all[0], BoardAction::Flip(0));
    /// assert_eq!(all[6], BoardAction::Swap(0, 1));
    /// assert_eq!(all[20], BoardAction::Swap(4, 5));
    /// ```
    pub fn candidates() -> impl Iterator<Item = BoardAction> {
        let flips = (0..SLOT_COUNT).map(BoardAction::Flip);
        let swaps = (0..SLOT_COUNT)
            .flat_map(|a| (a + 1..SLOT_COUNT).map(move |b| BoardAction::Swap(a, b)));
        flips.chain(swaps)
    }

    /// Equality up to swap order.
    #[must_use]
    pub fn same_as(&self, other: &BoardAction) -> bool {
        match (*self, *other) {
            (BoardAction::Flip(a), BoardAction::Flip(b)) => a == b,
            (BoardAction::Swap(a1, b1), BoardAction::Swap(a2, b2)) => {
                (a1 == a2 && b1 == b2) || (a1 == b2 && b1 == a2)
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for BoardAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardAction::Flip(slot) => write!(f, "flip slot {}", slot + 1),
            BoardAction::Swap(a, b) => write!(f, "swap slots {}+{}", a + 1, b + 1),
        }
    }
}

/// An action taken during a manipulation round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who acted.
    pub player: PlayerId,

    /// The action applied to the board.
    pub action: BoardAction,

    /// Best achievable score for the player once the action was applied.
    pub score: Option<u32>,
}
