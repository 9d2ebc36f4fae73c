//! Trick play and judgement.
//!
//! ## Play
//!
//! In leader-first order every player reveals the card in their hand that
//! scores highest against the current board.
//!
//! ## Judgement
//!
//! A priority cascade over the board. Starting with every play active, each
//! slot in priority order narrows the active set to the plays matching its
//! token. A slot nobody active matches is skipped instead of eliminating
//! everyone. The cascade stops as soon as one play remains. If several
//! survive all six slots, the one closest to the leader wins.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{best_card, AttributeToken, ProtocolBoard};
use crate::cards::Card;
use crate::core::{PlayerId, MAX_PLAYERS, SLOT_COUNT};

/// A card revealed by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub player: PlayerId,
    pub card: Card,
}

/// Plays of one trick in leader-first order.
pub type Plays = SmallVec<[Play; MAX_PLAYERS]>;

/// Index of the card a player reveals: the best scoring, first on ties.
///
/// Panics on an empty hand.
#[must_use]
pub fn choose_card(hand: &[Card], board: &ProtocolBoard) -> usize {
    match best_card(hand, board) {
        Some((index, _)) => index,
        None => panic!("cannot choose a card from an empty hand"),
    }
}

/// What one slot did to the active plays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotOutcome {
    /// No active play matched; the slot imposed nothing.
    Unmatched,
    /// Plays not matching the token were removed (possibly none).
    Filtered {
        eliminated: SmallVec<[PlayerId; MAX_PLAYERS]>,
    },
}

/// One consulted slot of the cascade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCheck {
    pub slot: usize,
    pub token: AttributeToken,
    pub outcome: SlotOutcome,
}

/// Result of judging a trick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgement {
    pub winner: PlayerId,

    /// Slots consulted, in order, until one play remained.
    pub checks: SmallVec<[SlotCheck; SLOT_COUNT]>,

    /// Several plays survived every slot; the earliest in play order won.
    pub tie_break: bool,
}

impl Judgement {
    /// Players eliminated, in elimination order.
    pub fn eliminated(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.checks
            .iter()
            .flat_map(|check| match &check.outcome {
                SlotOutcome::Unmatched => &[][..],
                SlotOutcome::Filtered { eliminated } => eliminated.as_slice(),
            })
            .copied()
    }
}

/// Judge a trick.
///
/// Panics if `plays` is empty.
///
/// ```
/// use bee_holder::board::{AttributeToken, ProtocolBoard};
/// use bee_holder::cards::{Attribute, Card};
/// use bee_holder::core::PlayerId;
/// use bee_holder::rules::{judge, Play};
///
/// let board = ProtocolBoard::from_tokens(Attribute::ALL.map(|a| AttributeToken::new(a, true)));
/// let plays = [
///     Play { player: PlayerId::new(0), card: Card::from_index(0b00_0010) },
///     Play { player: PlayerId::new(1), card: Card::from_index(0b00_0001) },
/// ];
/// assert_eq!(judge(&board, &plays).winner, PlayerId::new(1));
/// ```
#[must_use]
pub fn judge(board: &ProtocolBoard, plays: &[Play]) -> Judgement {
    assert!(!plays.is_empty(), "cannot judge a trick with no plays");

    let mut active: SmallVec<[usize; MAX_PLAYERS]> = (0..plays.len()).collect();
    let mut checks = SmallVec::new();

    for (slot, token) in board.tokens() {
        if active.len() == 1 {
            break;
        }

        let (matching, rest): (SmallVec<[usize; MAX_PLAYERS]>, SmallVec<[usize; MAX_PLAYERS]>) =
            active.iter().copied().partition(|&i| token.accepts(plays[i].card));

        let outcome = if matching.is_empty() {
            SlotOutcome::Unmatched
        } else {
            active = matching;
            SlotOutcome::Filtered {
                eliminated: rest.iter().map(|&i| plays[i].player).collect(),
            }
        };

        checks.push(SlotCheck {
            slot,
            token: *token,
            outcome,
        });
    }

    Judgement {
        winner: plays[active[0]].player,
        checks,
        tie_break: active.len() > 1,
    }
}
