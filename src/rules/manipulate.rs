//! Board manipulation after a trick.
//!
//! Each player, leader first, applies exactly one flip or swap chosen by a
//! one-ply search: try every candidate on a scratch copy of the board, score
//! the player's best remaining card, revert, and keep the first candidate
//! with the highest score. The action a player applies is forbidden to the
//! next player in the same round.

use smallvec::SmallVec;
use tracing::trace;

use crate::board::{best_card, ProtocolBoard};
use crate::cards::Card;
use crate::core::{BoardAction, PlayerId, MAX_PLAYERS};

/// A player's chosen manipulation with the search details behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionChoice {
    pub action: BoardAction,

    /// Best score over the player's hand once the action is applied.
    pub score: Option<u32>,

    /// Best card index on the board before the action.
    pub card_before: Option<usize>,

    /// Best card index once the action is applied.
    pub card_after: Option<usize>,

    /// The action the previous player took, excluded from the search.
    pub blocked: Option<BoardAction>,
}

/// Search every legal action for the one maximising the player's best card.
///
/// The caller's board is not modified.
///
/// ```
/// use bee_holder::board::{AttributeToken, ProtocolBoard};
/// use bee_holder::cards::{Attribute, Card};
/// use bee_holder::core::BoardAction;
/// use bee_holder::rules::choose_action;
///
/// let board = ProtocolBoard::from_tokens(Attribute::ALL.map(|a| AttributeToken::new(a, true)));
/// let hand = [Card::from_index(0)];
///
/// let choice = choose_action(&hand, &board, None);
/// assert_eq!(choice.action, BoardAction::Flip(0));
/// assert_eq!(choice.score, Some(32));
/// ```
#[must_use]
pub fn choose_action(hand: &[Card], board: &ProtocolBoard, previous: Option<BoardAction>) -> ActionChoice {
    let card_before = best_card(hand, board).map(|(index, _)| index);
    let mut scratch = board.clone();
    let mut best: Option<(BoardAction, Option<(usize, u32)>)> = None;

    let legal = BoardAction::candidates()
        .filter(|candidate| previous.map_or(true, |prev| !candidate.same_as(&prev)));

    for candidate in legal {
        scratch.apply(candidate);
        let outcome = best_card(hand, &scratch);
        scratch.apply(candidate);

        let score = outcome.map(|(_, s)| s);
        trace!(%candidate, ?score, "evaluated action");

        let improves = match best {
            None => true,
            Some((_, top)) => score > top.map(|(_, s)| s),
        };
        if improves {
            best = Some((candidate, outcome));
        }
    }
    debug_assert_eq!(&scratch, board, "action search must leave the board as found");

    match best {
        Some((action, outcome)) => ActionChoice {
            action,
            score: outcome.map(|(_, s)| s),
            card_before,
            card_after: outcome.map(|(index, _)| index),
            blocked: previous,
        },
        None => unreachable!("at most one of 21 candidates is blocked"),
    }
}

/// Run a full manipulation round, leader first, applying each choice.
///
/// Returns `(player, choice)` in the order the actions were applied.
pub fn action_round<'a>(
    board: &mut ProtocolBoard,
    leader: PlayerId,
    player_count: usize,
    hand_of: impl Fn(PlayerId) -> &'a [Card],
) -> SmallVec<[(PlayerId, ActionChoice); MAX_PLAYERS]> {
    let mut previous = None;
    let mut taken = SmallVec::new();

    for player in PlayerId::leader_first(leader, player_count) {
        let choice = choose_action(hand_of(player), board, previous);
        board.apply(choice.action);
        previous = Some(choice.action);
        taken.push((player, choice));
    }

    taken
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::AttributeToken;
    use crate::cards::Attribute;
    use crate::core::PlayerMap;

    fn all_true_board() -> ProtocolBoard {
        ProtocolBoard::from_tokens(Attribute::ALL.map(|a| AttributeToken::new(a, true)))
    }

    #[test]
    fn test_neutral_swap_wins_when_every_flip_hurts() {
        let board = all_true_board();
        let hand = [Card::from_index(63)];

        // Every flip loses a match; the first swap keeps all six.
        let choice = choose_action(&hand, &board, None);
        assert_eq!(choice.action, BoardAction::Swap(0, 1));
        assert_eq!(choice.score, Some(63));
    }

    #[test]
    fn test_blocked_action_is_skipped() {
        let board = all_true_board();
        let hand = [Card::from_index(0)];

        let choice = choose_action(&hand, &board, Some(BoardAction::Flip(0)));
        // Flip(0) would give 32; next best is flipping slot 2 for 16.
        assert_eq!(choice.action, BoardAction::Flip(1));
        assert_eq!(choice.score, Some(16));
        assert_eq!(choice.blocked, Some(BoardAction::Flip(0)));
    }

    #[test]
    fn test_flipping_top_slot_beats_swapping_match_up() {
        let board = all_true_board();
        // Matches only Payload (slot 6). Flipping slot 1 gives 32 + 1 = 33,
        // swapping 1 and 6 gives 32.
        let hand = [Card::from_index(0b10_0000)];
        let choice = choose_action(&hand, &board, None);
        assert_eq!(choice.action, BoardAction::Flip(0));
        assert_eq!(choice.score, Some(33));
    }

    #[test]
    fn test_choice_reports_best_cards() {
        let board = all_true_board();
        let hand = [Card::from_index(0b00_0010), Card::from_index(0b00_0000)];
        let choice = choose_action(&hand, &board, None);
        assert_eq!(choice.card_before, Some(0));
        // Flip(0): card 0 gains slot 1 on top of slot 2, card 1 only slot 1.
        assert_eq!(choice.action, BoardAction::Flip(0));
        assert_eq!(choice.card_after, Some(0));
        assert_eq!(choice.score, Some(48));
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let board = all_true_board();
        let before = board.clone();
        let _ = choose_action(&[Card::from_index(17)], &board, Some(BoardAction::Swap(2, 3)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_round_never_repeats_previous_action() {
        let hands: PlayerMap<Vec<Card>> = PlayerMap::with_value(4, vec![Card::from_index(0)]);
        let mut board = all_true_board();

        let taken = action_round(&mut board, PlayerId::new(2), 4, |p| hands[p].as_slice());

        assert_eq!(taken.len(), 4);
        assert_eq!(taken[0].0, PlayerId::new(2));
        for pair in taken.windows(2) {
            assert!(!pair[1].1.action.same_as(&pair[0].1.action));
        }
    }
}
