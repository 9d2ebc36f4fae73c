//! Drafting the protocol board.
//!
//! Once per hand, before the first trick, every attribute token is placed
//! into a slot. Players draft counter-clockwise starting with the seat just
//! before the leader; the leader drafts last and so fills the
//! highest-priority slots.
//!
//! Slot assignment per player count is a fixed table of picks. Each pick is
//! `(position in draft order, slot index)` and picks run in table order.

use smallvec::SmallVec;
use tracing::debug;

use crate::board::{AttributeToken, ProtocolBoard};
use crate::cards::{Attribute, Card};
use crate::core::{PlayerId, ATTRIBUTE_COUNT, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS, SLOT_COUNT};

/// `(drafter position, slot index)` pairs in draft order.
pub type DraftTable = [(usize, usize); SLOT_COUNT];

/// Draft tables for 2, 3, 4, and 5 players.
pub const DRAFT_TABLES: [DraftTable; MAX_PLAYERS - MIN_PLAYERS + 1] = [
    // 2 players alternate upward from slot 6.
    [(0, 5), (1, 4), (0, 3), (1, 2), (0, 1), (1, 0)],
    // 3 players take two adjacent slots each.
    [(0, 5), (0, 4), (1, 3), (1, 2), (2, 1), (2, 0)],
    // 4 players: two, two, one, one.
    [(0, 5), (0, 4), (1, 3), (1, 2), (2, 1), (3, 0)],
    // 5 players: the first drafter takes two, the rest one each.
    [(0, 5), (0, 4), (1, 3), (2, 2), (3, 1), (4, 0)],
];

/// The draft table for a table size.
///
/// Panics outside 2-5 players.
#[must_use]
pub fn draft_table(player_count: usize) -> &'static DraftTable {
    assert!(
        (MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count),
        "no draft table for {player_count} players"
    );
    &DRAFT_TABLES[player_count - MIN_PLAYERS]
}

/// Seats in draft order: counter-clockwise from the seat before the leader,
/// ending with the leader.
///
/// ```
/// use bee_holder::core::PlayerId;
/// use bee_holder::rules::draft_order;
///
/// let order = draft_order(PlayerId::new(1), 4);
/// assert_eq!(order.as_slice(), &[PlayerId::new(0), PlayerId::new(3), PlayerId::new(2), PlayerId::new(1)]);
/// ```
#[must_use]
pub fn draft_order(leader: PlayerId, player_count: usize) -> SmallVec<[PlayerId; MAX_PLAYERS]> {
    (1..=player_count)
        .map(|offset| leader.counter_clockwise(offset, player_count))
        .collect()
}

/// Choose the token a player places into `slot`.
///
/// For slot 0 the player plays to strength: the value they hold more of,
/// scored by that count. Lower slots bury the stronger side: the value they
/// hold less of, scored by `7 - count` of the other value. The first
/// attribute in `available` with the strictly best score wins.
///
/// Panics if `available` is empty.
#[must_use]
pub fn choose_token(hand: &[Card], available: &[Attribute], slot: usize) -> AttributeToken {
    assert!(!available.is_empty(), "no tokens left to draft");

    let mut best: Option<(AttributeToken, usize)> = None;
    for &attribute in available {
        let trues = hand.iter().filter(|card| card.value(attribute)).count();
        let falses = hand.len() - trues;

        let (value, score) = if slot == 0 {
            if trues > falses {
                (true, trues)
            } else {
                (false, falses)
            }
        } else if trues < falses {
            (true, HAND_SIZE.saturating_sub(falses))
        } else {
            (false, HAND_SIZE.saturating_sub(trues))
        };

        if best.map_or(true, |(_, top)| score > top) {
            best = Some((AttributeToken::new(attribute, value), score));
        }
    }

    match best {
        Some((token, _)) => token,
        None => unreachable!("available is non-empty"),
    }
}

/// One placement made during drafting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DraftPick {
    pub player: PlayerId,
    pub slot: usize,
    pub token: AttributeToken,
}

/// Clear the board and draft all six tokens.
///
/// `hand_of` gives each drafter's current hand. Returns the picks in the
/// order they were made.
pub fn draft_board<'a>(
    board: &mut ProtocolBoard,
    leader: PlayerId,
    player_count: usize,
    hand_of: impl Fn(PlayerId) -> &'a [Card],
) -> SmallVec<[DraftPick; SLOT_COUNT]> {
    board.clear();

    let order = draft_order(leader, player_count);
    let mut available: SmallVec<[Attribute; ATTRIBUTE_COUNT]> = Attribute::ALL.into_iter().collect();
    let mut picks = SmallVec::new();

    for &(position, slot) in draft_table(player_count) {
        let player = order[position];
        let token = choose_token(hand_of(player), &available, slot);
        board.place(slot, token);
        available.retain(|attr| *attr != token.attribute);

        debug!(%player, slot = slot + 1, %token, "drafted token");
        picks.push(DraftPick { player, slot, token });
    }

    assert!(board.is_complete(), "board incomplete after drafting");
    picks
}
