//! Random sources for the draw pool.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the identical call sequence
//! - **Injectable**: The pool draws through the [`DrawSource`] trait, so tests
//!   can script exact call orders with [`ScriptedSource`]
//!
//! ```
//! use bingo_caller::core::{DrawPool, GameRng};
//!
//! let mut a = DrawPool::new(GameRng::new(42));
//! let mut b = DrawPool::new(GameRng::new(42));
//!
//! for _ in 0..10 {
//!     assert_eq!(a.draw_next().unwrap(), b.draw_next().unwrap());
//! }
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::number::BallNumber;

/// Chooses which of the remaining numbers is drawn next.
///
/// `remaining` is never empty when `pick` is called. The returned index must
/// be in bounds.
pub trait DrawSource: Send {
    fn pick(&mut self, remaining: &[BallNumber]) -> usize;
}

/// Seedable RNG backing live draws.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG with a seed taken from the thread RNG.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }
}

impl DrawSource for GameRng {
    fn pick(&mut self, remaining: &[BallNumber]) -> usize {
        self.gen_range_usize(0..remaining.len())
    }
}

/// Draws a prescribed sequence of numbers, then falls back to the lowest
/// remaining number.
///
/// Scripted numbers that are already drawn are skipped.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    script: VecDeque<BallNumber>,
}

impl ScriptedSource {
    /// Script the given raw values. Values outside `1..=75` are dropped.
    pub fn new(values: impl IntoIterator<Item = u8>) -> Self {
        Self {
            script: values.into_iter().filter_map(BallNumber::new).collect(),
        }
    }

    /// Numbers still waiting in the script.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.script.len()
    }
}

impl DrawSource for ScriptedSource {
    fn pick(&mut self, remaining: &[BallNumber]) -> usize {
        while let Some(next) = self.script.pop_front() {
            if let Some(idx) = remaining.iter().position(|&n| n == next) {
                return idx;
            }
        }

        // Lowest remaining number
        remaining
            .iter()
            .enumerate()
            .min_by_key(|(_, n)| **n)
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }
}
