//! The six card attributes.
//!
//! Every attribute is binary. The `false` and `true` faces have names used
//! only for display:
//!
//! | Attribute | false     | true      |
//! |-----------|-----------|-----------|
//! | Texture   | Fuzzy     | Shiny     |
//! | Antennae  | Feathered | Whips     |
//! | Weapon    | Stinger   | Mandibles |
//! | Pattern   | Striped   | Solid     |
//! | Wings     | Sleek     | Flutter   |
//! | Payload   | Honey     | Pollen    |

use serde::{Deserialize, Serialize};

use crate::core::ATTRIBUTE_COUNT;

/// Card attribute category. Declaration order is the enumeration order used
/// for every tie-break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Texture,
    Antennae,
    Weapon,
    Pattern,
    Wings,
    Payload,
}

impl Attribute {
    /// All attributes in enumeration order.
    pub const ALL: [Attribute; ATTRIBUTE_COUNT] = [
        Attribute::Texture,
        Attribute::Antennae,
        Attribute::Weapon,
        Attribute::Pattern,
        Attribute::Wings,
        Attribute::Payload,
    ];

    /// Bit position of this attribute in a card.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Attribute::Texture => "Texture",
            Attribute::Antennae => "Antennae",
            Attribute::Weapon => "Weapon",
            Attribute::Pattern => "Pattern",
            Attribute::Wings => "Wings",
            Attribute::Payload => "Payload",
        }
    }

    /// Display name of one face of this attribute.
    #[must_use]
    pub const fn value_name(self, value: bool) -> &'static str {
        match (self, value) {
            (Attribute::Texture, false) => "Fuzzy",
            (Attribute::Texture, true) => "Shiny",
            (Attribute::Antennae, false) => "Feathered",
            (Attribute::Antennae, true) => "Whips",
            (Attribute::Weapon, false) => "Stinger",
            (Attribute::Weapon, true) => "Mandibles",
            (Attribute::Pattern, false) => "Striped",
            (Attribute::Pattern, true) => "Solid",
            (Attribute::Wings, false) => "Sleek",
            (Attribute::Wings, true) => "Flutter",
            (Attribute::Payload, false) => "Honey",
            (Attribute::Payload, true) => "Pollen",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_enumeration_order() {
        for (i, attr) in Attribute::ALL.iter().enumerate() {
            assert_eq!(attr.index(), i);
        }
    }

    #[test]
    fn test_value_names() {
        assert_eq!(Attribute::Texture.value_name(true), "Shiny");
        assert_eq!(Attribute::Texture.value_name(false), "Fuzzy");
        assert_eq!(Attribute::Payload.value_name(true), "Pollen");
        assert_eq!(Attribute::Wings.to_string(), "Wings");
    }
}
