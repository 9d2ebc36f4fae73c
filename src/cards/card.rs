//! Cards as 6-bit attribute vectors.

use serde::{Deserialize, Serialize};

use super::attributes::Attribute;
use crate::core::DECK_SIZE;

/// An immutable card. Bit `i` holds the value of `Attribute::ALL[i]`.
///
/// ```
/// use bee_holder::cards::{Attribute, Card};
///
/// let card = Card::from_values([true, false, false, false, false, true]);
/// assert!(card.value(Attribute::Texture));
/// assert!(card.matches(Attribute::Payload, true));
/// assert_eq!(card.to_string(), "[Shiny, Feathered, Stinger, Striped, Sleek, Pollen]");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card(u8);

impl Card {
    /// Build a card from its index in [0, 63].
    ///
    /// Panics on an out-of-range index.
    #[must_use]
    pub fn from_index(index: u8) -> Self {
        assert!((index as usize) < DECK_SIZE, "card index {index} out of range");
        Self(index)
    }

    /// Build a card from one value per attribute.
    #[must_use]
    pub fn from_values(values: [bool; 6]) -> Self {
        let bits = values
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &v)| acc | (u8::from(v) << i));
        Self(bits)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// The card's value for an attribute.
    #[must_use]
    pub const fn value(self, attribute: Attribute) -> bool {
        self.0 & (1 << attribute.index()) != 0
    }

    /// Whether the card shows `value` for `attribute`.
    #[must_use]
    pub const fn matches(self, attribute: Attribute, value: bool) -> bool {
        self.value(attribute) == value
    }

    #[must_use]
    pub fn values(self) -> [bool; 6] {
        Attribute::ALL.map(|attr| self.value(attr))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, attr) in Attribute::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(attr.value_name(self.value(*attr)))?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trips_through_values() {
        for i in 0..DECK_SIZE as u8 {
            let card = Card::from_index(i);
            assert_eq!(Card::from_values(card.values()), card);
        }
    }

    #[test]
    fn test_bit_layout() {
        let card = Card::from_index(0b10_0001);
        assert!(card.value(Attribute::Texture));
        assert!(!card.value(Attribute::Antennae));
        assert!(card.value(Attribute::Payload));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_from_index_rejects_64() {
        let _ = Card::from_index(64);
    }
}
