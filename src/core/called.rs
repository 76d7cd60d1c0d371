//! Call history and membership.
//!
//! `CalledSet` keeps two views of the same calls:
//! - an ordered history, most recent first, for the board display
//! - a hash set for O(1) membership tests during win checks
//!
//! Both use `im` persistent structures so snapshots clone in O(1).

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use super::number::{BallNumber, Category, UNIVERSE_SIZE};

/// Numbers called so far in a round.
///
/// Invariant: no number appears twice, so `len() <= 75`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BallNumber>", into = "Vec<BallNumber>")]
pub struct CalledSet {
    /// Newest first.
    history: Vector<BallNumber>,
    members: ImHashSet<BallNumber>,
}

/// One category row of the call board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardRow {
    pub category: Category,
    /// The category's 15 numbers, ascending, with a called flag.
    pub cells: Vec<(BallNumber, bool)>,
}

impl CalledSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call. Returns `false` (and changes nothing) if the number
    /// was already called.
    pub fn record(&mut self, number: BallNumber) -> bool {
        if self.members.contains(&number) {
            return false;
        }
        self.members.insert(number);
        self.history.push_front(number);
        true
    }

    #[must_use]
    pub fn contains(&self, number: BallNumber) -> bool {
        self.members.contains(&number)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// The current (most recent) call.
    #[must_use]
    pub fn last(&self) -> Option<BallNumber> {
        self.history.front().copied()
    }

    /// Calls newest first.
    pub fn history(&self) -> impl Iterator<Item = BallNumber> + '_ {
        self.history.iter().copied()
    }

    /// Up to `n` most recent calls, newest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<BallNumber> {
        self.history.iter().take(n).copied().collect()
    }

    /// `(calls made, universe size)`, shown as e.g. `12/75`.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.len(), UNIVERSE_SIZE)
    }

    /// The full call board, one row per category.
    #[must_use]
    pub fn board(&self) -> Vec<BoardRow> {
        Category::ALL
            .iter()
            .map(|&category| BoardRow {
                category,
                cells: category.numbers().map(|n| (n, self.contains(n))).collect(),
            })
            .collect()
    }

    /// Forget every call.
    pub fn clear(&mut self) {
        self.history.clear();
        self.members.clear();
    }

    /// Build a set from raw values given in call order. Out-of-range values
    /// and repeats are ignored.
    #[must_use]
    pub fn from_values(values: &[u8]) -> Self {
        values.iter().filter_map(|&v| BallNumber::new(v)).collect()
    }
}

impl FromIterator<BallNumber> for CalledSet {
    /// Numbers are taken in call order; repeats are ignored.
    fn from_iter<T: IntoIterator<Item = BallNumber>>(iter: T) -> Self {
        let mut set = CalledSet::new();
        for number in iter {
            set.record(number);
        }
        set
    }
}

impl TryFrom<Vec<BallNumber>> for CalledSet {
    type Error = String;

    /// Input is newest first, matching the serialized form.
    fn try_from(newest_first: Vec<BallNumber>) -> Result<Self, Self::Error> {
        let mut set = CalledSet::new();
        for number in newest_first.into_iter().rev() {
            if !set.record(number) {
                return Err(format!("{number} appears twice in call history"));
            }
        }
        Ok(set)
    }
}

impl From<CalledSet> for Vec<BallNumber> {
    fn from(set: CalledSet) -> Self {
        set.history.into_iter().collect()
    }
}
