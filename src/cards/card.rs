//! Bingo cards: five lettered columns of five cells.

use serde::{Deserialize, Serialize};

use crate::core::{BallNumber, CalledSet, Category};
use crate::error::{Error, Result};

/// Cells per side of a card.
pub const GRID_SIZE: usize = 5;

/// Catalog identifier of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card {}", self.0)
    }
}

/// One square of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Free space, always marked.
    Free,
    Number(BallNumber),
}

impl Cell {
    /// A cell is marked when it is free or its number has been called.
    #[must_use]
    pub fn is_marked(self, called: &CalledSet) -> bool {
        match self {
            Cell::Free => true,
            Cell::Number(n) => called.contains(n),
        }
    }

    #[must_use]
    pub fn number(self) -> Option<BallNumber> {
        match self {
            Cell::Free => None,
            Cell::Number(n) => Some(n),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Free => f.write_str("FREE"),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Card as it appears in the catalog file: `null` marks the free space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub card_id: u32,
    #[serde(rename = "B")]
    pub b: Vec<Option<u8>>,
    #[serde(rename = "I")]
    pub i: Vec<Option<u8>>,
    #[serde(rename = "N")]
    pub n: Vec<Option<u8>>,
    #[serde(rename = "G")]
    pub g: Vec<Option<u8>>,
    #[serde(rename = "O")]
    pub o: Vec<Option<u8>>,
}

/// An immutable, validated card.
///
/// Stored column-major: `columns[c][r]` is row `r` of column `c` (B = 0).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CardRecord", into = "CardRecord")]
pub struct Card {
    id: CardId,
    columns: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Card {
    /// Build a card from its B, I, N, G, O columns.
    ///
    /// Rejects cards with more than one free cell or a repeated number.
    pub fn from_columns(id: CardId, columns: [[Cell; GRID_SIZE]; GRID_SIZE]) -> Result<Self> {
        let card = Self { id, columns };
        card.check()?;
        Ok(card)
    }

    /// Build a card from rows of raw values, `0` meaning free space.
    ///
    /// Handy for tests and hand-written cards.
    pub fn from_rows(id: CardId, rows: [[u8; GRID_SIZE]; GRID_SIZE]) -> Result<Self> {
        let mut columns = [[Cell::Free; GRID_SIZE]; GRID_SIZE];
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                columns[c][r] = if value == 0 {
                    Cell::Free
                } else {
                    let number = BallNumber::new(value).ok_or_else(|| Error::InvalidCard {
                        card_id: id,
                        message: format!("{value} is outside 1..=75"),
                    })?;
                    Cell::Number(number)
                };
            }
        }
        Self::from_columns(id, columns)
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Cell at `row`, `column` (both 0-based).
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.columns[column][row]
    }

    /// Cells of one lettered column, top to bottom.
    #[must_use]
    pub fn column(&self, category: Category) -> &[Cell; GRID_SIZE] {
        &self.columns[category.index()]
    }

    /// Row-major grid view.
    #[must_use]
    pub fn grid(&self) -> [[Cell; GRID_SIZE]; GRID_SIZE] {
        let mut grid = [[Cell::Free; GRID_SIZE]; GRID_SIZE];
        for (r, row) in grid.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.columns[c][r];
            }
        }
        grid
    }

    /// All 25 cells, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.columns.iter().flat_map(|col| col.iter().copied())
    }

    fn check(&self) -> Result<()> {
        let free = self.cells().filter(|&c| c == Cell::Free).count();
        if free > 1 {
            return Err(Error::InvalidCard {
                card_id: self.id,
                message: format!("{free} free cells, at most one allowed"),
            });
        }

        let mut seen = rustc_hash::FxHashSet::default();
        for number in self.cells().filter_map(Cell::number) {
            if !seen.insert(number) {
                return Err(Error::InvalidCard {
                    card_id: self.id,
                    message: format!("{number} appears more than once"),
                });
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn sample(id: CardId) -> Self {
        Self::from_rows(
            id,
            [
                [1, 16, 31, 46, 61],
                [2, 17, 32, 47, 62],
                [3, 18, 0, 48, 63],
                [4, 19, 34, 49, 64],
                [5, 20, 35, 50, 65],
            ],
        )
        .unwrap()
    }
}

impl TryFrom<CardRecord> for Card {
    type Error = Error;

    fn try_from(record: CardRecord) -> Result<Self> {
        let id = CardId::new(record.card_id);
        let raw_columns = [record.b, record.i, record.n, record.g, record.o];
        let mut columns = [[Cell::Free; GRID_SIZE]; GRID_SIZE];

        for (category, raw) in Category::ALL.iter().zip(raw_columns) {
            if raw.len() != GRID_SIZE {
                return Err(Error::InvalidCard {
                    card_id: id,
                    message: format!("column {} has {} cells, expected 5", category, raw.len()),
                });
            }
            for (r, value) in raw.into_iter().enumerate() {
                columns[category.index()][r] = match value {
                    None => Cell::Free,
                    Some(v) => Cell::Number(BallNumber::new(v).ok_or_else(|| Error::InvalidCard {
                        card_id: id,
                        message: format!("{v} in column {category} is outside 1..=75"),
                    })?),
                };
            }
        }

        Card::from_columns(id, columns)
    }
}

impl From<Card> for CardRecord {
    fn from(card: Card) -> Self {
        let column = |c: Category| -> Vec<Option<u8>> {
            card.column(c).iter().map(|cell| cell.number().map(BallNumber::value)).collect()
        };
        CardRecord {
            card_id: card.id.raw(),
            b: column(Category::B),
            i: column(Category::I),
            n: column(Category::N),
            g: column(Category::G),
            o: column(Category::O),
        }
    }
}
