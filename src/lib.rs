//! # bingo-caller
//!
//! A bingo caller engine: draws numbers 1 to 75 without repetition, checks
//! selected cards against a winning pattern and drives a round from start to
//! a single declared winner.
//!
//! ## Design Principles
//!
//! 1. **One owner per round**: all mutable round data lives in `GameState`,
//!    and only the session task touches it.
//!
//! 2. **Injectable randomness and time**: draws come from a `DrawSource`
//!    and the cadence from a `Scheduler`, so tests replay exact games.
//!
//! 3. **A win is committed before it is reported**: the round is concluded
//!    synchronously, then the claim is submitted in the background.
//!
//! ## Modules
//!
//! - `core`: number universe, call history, draw pool, RNG, configuration
//! - `cards`: cards and the catalog they are selected from
//! - `rules`: line and pattern evaluation
//! - `game`: round state machine, events and claims
//! - `narration`: spoken call announcements
//! - `service`: claim submission
//! - `runtime`: the session task and draw scheduling

pub mod core;
pub mod cards;
pub mod rules;
pub mod game;
pub mod narration;
pub mod service;
pub mod runtime;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use crate::core::{
    BallNumber, Category, CalledSet, DrawPool, DrawSource, EvaluationMode, GameRng,
    Language, RoundConfig, ScriptedSource, WinningPattern, UNIVERSE_SIZE,
};

pub use crate::cards::{Card, CardCatalog, CardId, Cell};

pub use crate::rules::{evaluate, Evaluation, Line};

pub use crate::game::{
    CheckOutcome, ClaimState, ClaimTicket, GameController, GameEvent, GameState, GameStatus,
    Outcome, RoundSnapshot, TickOutcome, WinningClaim,
};

pub use crate::narration::{NarrationSink, Narrator};

pub use crate::service::ClaimService;

pub use crate::runtime::{ManualScheduler, Notice, Scheduler, Session, SessionHandle, TokioScheduler};

pub use crate::error::{Error, Result};
