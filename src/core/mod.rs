//! Core engine types: number universe, call history, draw pool, RNG,
//! configuration.
//!
//! These are the building blocks the game controller threads through a
//! round. None of them know about cards or winning.

pub mod number;
pub mod rng;
pub mod pool;
pub mod called;
pub mod config;

pub use number::{BallNumber, Category, MAX_NUMBER, MIN_NUMBER, UNIVERSE_SIZE};
pub use rng::{DrawSource, GameRng, ScriptedSource};
pub use pool::DrawPool;
pub use called::{BoardRow, CalledSet};
pub use config::{ClaimsConfig, EvaluationMode, Language, RoundConfig, WinningPattern};
