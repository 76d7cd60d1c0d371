//! Draw pool: the undrawn part of the number universe.

use tracing::debug;

use super::number::BallNumber;
use super::rng::DrawSource;
use crate::error::{Error, Result};

/// Numbers not yet called this round.
///
/// Draws are uniform over whatever remains at call time (given a uniform
/// source) and never repeat until [`DrawPool::reset`].
pub struct DrawPool {
    remaining: Vec<BallNumber>,
    source: Box<dyn DrawSource>,
}

impl DrawPool {
    /// Create a full pool drawing through `source`.
    pub fn new(source: impl DrawSource + 'static) -> Self {
        Self {
            remaining: BallNumber::all().collect(),
            source: Box::new(source),
        }
    }

    /// Draw one number and remove it from the pool.
    ///
    /// Fails with [`Error::ExhaustedPool`] once every number has been drawn.
    pub fn draw_next(&mut self) -> Result<BallNumber> {
        if self.remaining.is_empty() {
            return Err(Error::ExhaustedPool);
        }

        let idx = self.source.pick(&self.remaining).min(self.remaining.len() - 1);
        let number = self.remaining.swap_remove(idx);
        debug!(number = number.value(), remaining = self.remaining.len(), "drew number");
        Ok(number)
    }

    /// Refill the pool with the full universe. The random source carries on.
    pub fn reset(&mut self) {
        self.remaining = BallNumber::all().collect();
    }

    /// Remaining numbers in unspecified order.
    #[must_use]
    pub fn remaining(&self) -> &[BallNumber] {
        &self.remaining
    }

    #[must_use]
    pub fn remaining_len(&self) -> usize {
        self.remaining.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    #[must_use]
    pub fn contains(&self, number: BallNumber) -> bool {
        self.remaining.contains(&number)
    }
}

impl std::fmt::Debug for DrawPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawPool")
            .field("remaining", &self.remaining.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::number::UNIVERSE_SIZE;
    use crate::core::rng::{GameRng, ScriptedSource};
    use std::collections::HashSet;

    #[test]
    fn test_draws_whole_universe_without_repeats() {
        let mut pool = DrawPool::new(GameRng::new(42));
        let mut seen = HashSet::new();

        for _ in 0..UNIVERSE_SIZE {
            let n = pool.draw_next().unwrap();
            assert!(seen.insert(n), "{} drawn twice", n);
            assert!(!pool.contains(n));
        }

        assert_eq!(seen.len(), UNIVERSE_SIZE);
        assert!(pool.is_empty());
        assert!(matches!(pool.draw_next(), Err(Error::ExhaustedPool)));
    }

    #[test]
    fn test_reset_refills() {
        let mut pool = DrawPool::new(GameRng::new(1));
        for _ in 0..10 {
            pool.draw_next().unwrap();
        }
        assert_eq!(pool.remaining_len(), UNIVERSE_SIZE - 10);

        pool.reset();
        assert_eq!(pool.remaining_len(), UNIVERSE_SIZE);
    }

    #[test]
    fn test_scripted_order() {
        let mut pool = DrawPool::new(ScriptedSource::new([5, 12, 28]));
        let drawn: Vec<u8> = (0..3).map(|_| pool.draw_next().unwrap().value()).collect();
        assert_eq!(drawn, vec![5, 12, 28]);
    }

    #[test]
    fn test_roughly_uniform_first_draw() {
        // Every number should show up as a first draw across many seeds
        let mut firsts = HashSet::new();
        for seed in 0..2000 {
            let mut pool = DrawPool::new(GameRng::new(seed));
            firsts.insert(pool.draw_next().unwrap());
        }
        assert_eq!(firsts.len(), UNIVERSE_SIZE);
    }
}
