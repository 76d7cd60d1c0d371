//! Round progression: state machine, events and winning claims.
//!
//! - `GameState`: the single owner of everything that changes in a round
//! - `GameController`: applies ticks and operator commands to a state
//! - `GameEvent`: one-way notifications for narration and displays
//! - `ClaimTicket`: a declared win waiting to be submitted

pub mod claim;
pub mod controller;
pub mod event;

pub use claim::{ClaimReceipt, ClaimState, ClaimTicket, WinningClaim};
pub use controller::{
    CheckOutcome, CheckRecord, ClaimResolution, GameController, GameState, GameStatus, Outcome,
    RoundSnapshot, TickOutcome,
};
pub use event::GameEvent;
