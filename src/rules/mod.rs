//! Card evaluation against a winning pattern.
//!
//! The evaluator decides, for one card and the current calls:
//! - how many of the twelve lines are complete
//! - whether every cell is marked
//! - whether the round's pattern is satisfied
//!
//! It owns no state; the game controller decides what to do with the result.

pub mod evaluator;

pub use evaluator::{evaluate, evaluate_grid, Evaluation, Line, LINE_COUNT};
