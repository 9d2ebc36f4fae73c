//! The rules engine: drafting, trick play and judgement, manipulation.
//!
//! Every AI decision here is a pure function of a hand and a board. The
//! game state machine owns the players and the board and feeds them in.

pub mod draft;
pub mod manipulate;
pub mod trick;

pub use draft::{choose_token, draft_board, draft_order, draft_table, DraftPick, DRAFT_TABLES};
pub use manipulate::{action_round, choose_action, ActionChoice};
pub use trick::{choose_card, judge, Judgement, Play, Plays, SlotCheck, SlotOutcome};
