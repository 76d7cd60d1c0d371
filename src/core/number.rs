//! The number universe: balls 1..=75 split into five lettered categories.
//!
//! ## Categories
//!
//! | Letter | Range  |
//! |--------|--------|
//! | B      | 1-15   |
//! | I      | 16-30  |
//! | N      | 31-45  |
//! | G      | 46-60  |
//! | O      | 61-75  |
//!
//! Category boundaries are a static table, not derived from any state.

use serde::{Deserialize, Serialize};

/// Smallest ball number.
pub const MIN_NUMBER: u8 = 1;

/// Largest ball number.
pub const MAX_NUMBER: u8 = 75;

/// Number of balls in the universe.
pub const UNIVERSE_SIZE: usize = MAX_NUMBER as usize;

/// Numbers per category.
pub const CATEGORY_SPAN: u8 = 15;

/// One of the five lettered categories. Also names the card columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    B,
    I,
    N,
    G,
    O,
}

impl Category {
    /// All categories in column order.
    pub const ALL: [Category; 5] = [Category::B, Category::I, Category::N, Category::G, Category::O];

    const RANGES: [(u8, u8); 5] = [(1, 15), (16, 30), (31, 45), (46, 60), (61, 75)];

    /// Column index (B = 0 .. O = 4).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Category letter.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Category::B => 'B',
            Category::I => 'I',
            Category::N => 'N',
            Category::G => 'G',
            Category::O => 'O',
        }
    }

    /// Inclusive `(min, max)` bounds of this category.
    #[must_use]
    pub const fn bounds(self) -> (u8, u8) {
        Self::RANGES[self.index()]
    }

    /// Every number in this category, ascending.
    pub fn numbers(self) -> impl Iterator<Item = BallNumber> {
        let (min, max) = self.bounds();
        (min..=max).map(BallNumber)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A ball number guaranteed to lie in `1..=75`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BallNumber(u8);

impl BallNumber {
    /// Create a ball number, `None` if outside the universe.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= MIN_NUMBER && value <= MAX_NUMBER {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The category this number belongs to.
    #[must_use]
    pub fn category(self) -> Category {
        Category::ALL[((self.0 - 1) / CATEGORY_SPAN) as usize]
    }

    /// Board label, e.g. `B05` or `O75`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{}{:02}", self.category().letter(), self.0)
    }

    /// Iterate over the whole universe in ascending order.
    pub fn all() -> impl Iterator<Item = BallNumber> {
        (MIN_NUMBER..=MAX_NUMBER).map(BallNumber)
    }
}

impl TryFrom<u8> for BallNumber {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("{value} is outside 1..=75"))
    }
}

impl From<BallNumber> for u8 {
    fn from(number: BallNumber) -> Self {
        number.0
    }
}

impl std::fmt::Display for BallNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(BallNumber::new(0).is_none());
        assert!(BallNumber::new(76).is_none());
        assert_eq!(BallNumber::new(1).map(BallNumber::value), Some(1));
        assert_eq!(BallNumber::new(75).map(BallNumber::value), Some(75));
        assert_eq!(BallNumber::all().count(), UNIVERSE_SIZE);
    }

    #[test]
    fn test_category_edges() {
        let cases = [
            (1, Category::B),
            (15, Category::B),
            (16, Category::I),
            (30, Category::I),
            (31, Category::N),
            (45, Category::N),
            (46, Category::G),
            (60, Category::G),
            (61, Category::O),
            (75, Category::O),
        ];
        for (value, expected) in cases {
            let number = BallNumber::new(value).unwrap();
            assert_eq!(number.category(), expected, "category of {}", value);
        }
    }

    #[test]
    fn test_category_numbers_partition_universe() {
        let total: usize = Category::ALL.iter().map(|c| c.numbers().count()).sum();
        assert_eq!(total, UNIVERSE_SIZE);

        for category in Category::ALL {
            assert!(category.numbers().all(|n| n.category() == category));
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(BallNumber::new(5).unwrap().label(), "B05");
        assert_eq!(BallNumber::new(33).unwrap().label(), "N33");
        assert_eq!(BallNumber::new(75).unwrap().label(), "O75");
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let ok: BallNumber = serde_json::from_str("42").unwrap();
        assert_eq!(ok.value(), 42);
        assert!(serde_json::from_str::<BallNumber>("0").is_err());
        assert!(serde_json::from_str::<BallNumber>("99").is_err());
    }
}
