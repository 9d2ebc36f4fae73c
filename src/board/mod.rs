//! Protocol board, its tokens, and the scoring function every AI decision
//! is measured with.

pub mod protocol;
pub mod scoring;
pub mod token;

pub use protocol::ProtocolBoard;
pub use scoring::{best_card, score, slot_weight};
pub use token::AttributeToken;
