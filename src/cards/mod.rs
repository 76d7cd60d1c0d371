//! Card system: immutable bingo cards and the catalog they come from.
//!
//! ## Architecture
//!
//! - `Card`: a validated 5x5 grid keyed by `CardId`, with at most one free cell
//! - `CardRecord`: the catalog file shape (`card_id` plus `B`..`O` columns)
//! - `CardCatalog`: read-only lookup of every card a shop owns
//!
//! The engine never mutates catalog data.

pub mod card;
pub mod catalog;

pub use card::{Card, CardId, CardRecord, Cell, GRID_SIZE};
pub use catalog::CardCatalog;
