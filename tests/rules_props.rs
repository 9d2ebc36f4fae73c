//! Property tests for scoring, judgement, and the AI heuristics.

use proptest::prelude::*;

use bee_holder::board::{best_card, score, slot_weight, AttributeToken, ProtocolBoard};
use bee_holder::cards::{Attribute, Card};
use bee_holder::core::{BoardAction, PlayerId, SLOT_COUNT};
use bee_holder::rules::{choose_action, choose_card, choose_token, judge, Play};

fn card() -> impl Strategy<Value = Card> {
    (0u8..64).prop_map(Card::from_index)
}

fn board() -> impl Strategy<Value = ProtocolBoard> {
    (Just(Attribute::ALL.to_vec()).prop_shuffle(), prop::array::uniform6(any::<bool>())).prop_map(
        |(order, values)| {
            let tokens: [AttributeToken; SLOT_COUNT] =
                std::array::from_fn(|slot| AttributeToken::new(order[slot], values[slot]));
            ProtocolBoard::from_tokens(tokens)
        },
    )
}

fn hand() -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card(), 1..=7)
}

fn plays() -> impl Strategy<Value = Vec<Play>> {
    prop::sample::subsequence((0u8..64).collect::<Vec<_>>(), 2..=5)
        .prop_shuffle()
        .prop_map(|cards| {
            cards
                .into_iter()
                .enumerate()
                .map(|(i, index)| Play {
                    player: PlayerId::new(i as u8),
                    card: Card::from_index(index),
                })
                .collect()
        })
}

fn action() -> impl Strategy<Value = BoardAction> {
    prop::sample::select(BoardAction::candidates().collect::<Vec<_>>())
}

fn tokens_of(board: &ProtocolBoard) -> Vec<AttributeToken> {
    board.tokens().map(|(_, token)| *token).collect()
}

proptest! {
    /// Score is the sum of the weights of matched slots.
    #[test]
    fn prop_score_sums_matched_weights(card in card(), board in board()) {
        let expected: u32 = board
            .tokens()
            .filter(|(_, token)| token.accepts(card))
            .map(|(slot, _)| slot_weight(slot))
            .sum();
        prop_assert_eq!(score(card, &board), expected);
    }

    /// Agreeing on higher slots and matching slot k beats anything that
    /// misses slot k, whatever happens below.
    #[test]
    fn prop_score_respects_priority(
        board in board(),
        base in card(),
        slot in 0..SLOT_COUNT,
        lower in prop::array::uniform6(any::<bool>()),
    ) {
        let tokens = tokens_of(&board);
        let mut winner = base.values();
        winner[tokens[slot].attribute.index()] = tokens[slot].value;
        let mut loser = winner;
        loser[tokens[slot].attribute.index()] = !tokens[slot].value;
        for below in slot + 1..SLOT_COUNT {
            loser[tokens[below].attribute.index()] = lower[below];
        }

        prop_assert!(score(Card::from_values(winner), &board) > score(Card::from_values(loser), &board));
    }

    /// Moving slots nobody matches to the bottom changes nothing.
    #[test]
    fn prop_unmatched_slots_do_not_affect_judgement(board in board(), plays in plays()) {
        let tokens = tokens_of(&board);
        let (matched, unmatched): (Vec<_>, Vec<_>) = tokens
            .iter()
            .partition(|token| plays.iter().any(|play| token.accepts(play.card)));
        let reordered: Vec<AttributeToken> = matched.into_iter().chain(unmatched).copied().collect();
        let moved = ProtocolBoard::from_tokens(std::array::from_fn(|slot| reordered[slot]));

        let original = judge(&board, &plays);
        let other = judge(&moved, &plays);
        prop_assert_eq!(original.winner, other.winner);
        prop_assert_eq!(original.eliminated().collect::<Vec<_>>(), other.eliminated().collect::<Vec<_>>());
    }

    /// Same inputs, same judgement; the winner survives every check.
    #[test]
    fn prop_judgement_is_deterministic(board in board(), plays in plays()) {
        let first = judge(&board, &plays);
        prop_assert_eq!(&first, &judge(&board, &plays));

        let eliminated: Vec<_> = first.eliminated().collect();
        prop_assert!(!eliminated.contains(&first.winner));
        if first.tie_break {
            let survivor = plays
                .iter()
                .find(|play| !eliminated.contains(&play.player))
                .map(|play| play.player);
            prop_assert_eq!(survivor, Some(first.winner));
        }
    }

    /// The chosen card scores at least as well as any other.
    #[test]
    fn prop_chosen_card_is_best(hand in hand(), board in board()) {
        let chosen = choose_card(&hand, &board);
        let top = score(hand[chosen], &board);
        prop_assert!(hand.iter().all(|&c| score(c, &board) <= top));
        prop_assert!(hand[..chosen].iter().all(|&c| score(c, &board) < top));
    }

    /// The action search never repeats the previous action, leaves the board
    /// alone, and finds the best legal action.
    #[test]
    fn prop_action_search(hand in hand(), board in board(), previous in prop::option::of(action())) {
        let before = board.clone();
        let choice = choose_action(&hand, &board, previous);
        prop_assert_eq!(&board, &before);

        if let Some(prev) = previous {
            prop_assert!(!choice.action.same_as(&prev));
        }

        let best = BoardAction::candidates()
            .filter(|candidate| previous.map_or(true, |prev| !candidate.same_as(&prev)))
            .filter_map(|candidate| {
                let mut scratch = board.clone();
                scratch.apply(candidate);
                best_card(&hand, &scratch).map(|(_, s)| s)
            })
            .max();
        prop_assert_eq!(choice.score, best);
    }

    /// Drafted tokens always come from what is left.
    #[test]
    fn prop_drafted_token_is_available(
        hand in hand(),
        available in prop::sample::subsequence(Attribute::ALL.to_vec(), 1..=6),
        slot in 0..SLOT_COUNT,
    ) {
        let token = choose_token(&hand, &available, slot);
        prop_assert!(available.contains(&token.attribute));
    }
}
