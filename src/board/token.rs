//! Attribute tokens placed on the protocol board.

use serde::{Deserialize, Serialize};

use crate::cards::{Attribute, Card};

/// An (attribute, value) constraint occupying one board slot.
///
/// ```
/// use bee_holder::board::AttributeToken;
/// use bee_holder::cards::Attribute;
///
/// let token = AttributeToken::new(Attribute::Texture, true);
/// assert_eq!(token.to_string(), "Texture=Shiny");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeToken {
    pub attribute: Attribute,
    pub value: bool,
}

impl AttributeToken {
    #[must_use]
    pub const fn new(attribute: Attribute, value: bool) -> Self {
        Self { attribute, value }
    }

    /// Whether `card` satisfies this token.
    #[must_use]
    pub const fn accepts(&self, card: Card) -> bool {
        card.matches(self.attribute, self.value)
    }

    /// Invert the token's value in place.
    pub fn flip(&mut self) {
        self.value = !self.value;
    }
}

impl std::fmt::Display for AttributeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.attribute, self.attribute.value_name(self.value))
    }
}
