//! Per-seat game data.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::PlayerId;

/// A seat at the table.
///
/// Hand order only matters for display and for first-occurrence
/// tie-breaks when choosing a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Cards still held this hand.
    pub hand: Vec<Card>,

    /// Tricks won over the whole game.
    pub tricks_won: u32,

    /// Cards collected from won tricks this hand.
    pub score_pile: Vec<Card>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            hand: Vec::new(),
            tricks_won: 0,
            score_pile: Vec::new(),
        }
    }

    /// Credit a won trick and collect its cards.
    pub fn award_trick(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.tricks_won += 1;
        self.score_pile.extend(cards);
    }

    /// Remove every card from hand and score pile. Trick count is kept.
    pub fn surrender_cards(&mut self) -> impl Iterator<Item = Card> + '_ {
        self.hand.drain(..).chain(self.score_pile.drain(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_trick() {
        let mut player = Player::new(PlayerId::new(1));
        player.award_trick([Card::from_index(3), Card::from_index(9)]);

        assert_eq!(player.tricks_won, 1);
        assert_eq!(player.score_pile.len(), 2);
    }

    #[test]
    fn test_surrender_keeps_trick_count() {
        let mut player = Player::new(PlayerId::new(0));
        player.hand = vec![Card::from_index(1), Card::from_index(2)];
        player.award_trick([Card::from_index(5)]);

        let cards: Vec<_> = player.surrender_cards().collect();

        assert_eq!(cards.len(), 3);
        assert!(player.hand.is_empty());
        assert!(player.score_pile.is_empty());
        assert_eq!(player.tricks_won, 1);
    }
}
