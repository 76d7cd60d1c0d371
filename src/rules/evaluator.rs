//! Win evaluation for a single card.
//!
//! Evaluation is pure: it reads a grid, the called numbers and the pattern,
//! and returns an [`Evaluation`]. Nothing is cached between calls.
//!
//! ## Lines
//!
//! Twelve candidate lines exist on a 5x5 grid: five rows, five columns and
//! the two diagonals. Each completed line definition counts once, even when
//! it shares cells with another completed line.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, Cell, GRID_SIZE};
use crate::core::{CalledSet, WinningPattern};

/// Total number of candidate lines.
pub const LINE_COUNT: usize = 2 * GRID_SIZE + 2;

/// A candidate winning line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    Row(u8),
    Column(u8),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Line {
    /// All twelve lines: rows, then columns, then diagonals.
    pub const ALL: [Line; LINE_COUNT] = [
        Line::Row(0),
        Line::Row(1),
        Line::Row(2),
        Line::Row(3),
        Line::Row(4),
        Line::Column(0),
        Line::Column(1),
        Line::Column(2),
        Line::Column(3),
        Line::Column(4),
        Line::Diagonal,
        Line::AntiDiagonal,
    ];

    /// `(row, column)` coordinates of the line's five cells.
    #[must_use]
    pub fn cells(self) -> [(usize, usize); GRID_SIZE] {
        let mut out = [(0, 0); GRID_SIZE];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = match self {
                Line::Row(r) => (r as usize, i),
                Line::Column(c) => (i, c as usize),
                Line::Diagonal => (i, i),
                Line::AntiDiagonal => (i, GRID_SIZE - 1 - i),
            };
        }
        out
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Line::Row(r) => write!(f, "row {}", r + 1),
            Line::Column(c) => write!(f, "column {}", crate::core::Category::ALL[*c as usize]),
            Line::Diagonal => f.write_str("diagonal"),
            Line::AntiDiagonal => f.write_str("anti-diagonal"),
        }
    }
}

/// Result of checking one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Completed line definitions, counted independently.
    pub lines_completed: u8,
    /// All 25 cells marked.
    pub full_house: bool,
    /// Whether the pattern is satisfied.
    pub is_winner: bool,
    /// Which lines were completed, in [`Line::ALL`] order.
    pub completed_lines: SmallVec<[Line; 4]>,
}

/// Evaluate a card against the called numbers.
#[must_use]
pub fn evaluate(card: &Card, called: &CalledSet, pattern: WinningPattern) -> Evaluation {
    evaluate_grid(&card.grid(), called, pattern)
}

/// Evaluate a raw row-major grid.
///
/// Unlike [`Card`], a raw grid may hold any number of free cells.
#[must_use]
pub fn evaluate_grid(
    grid: &[[Cell; GRID_SIZE]; GRID_SIZE],
    called: &CalledSet,
    pattern: WinningPattern,
) -> Evaluation {
    let mut marked = [[false; GRID_SIZE]; GRID_SIZE];
    for (r, row) in grid.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            marked[r][c] = cell.is_marked(called);
        }
    }

    let completed_lines: SmallVec<[Line; 4]> = Line::ALL
        .iter()
        .copied()
        .filter(|line| line.cells().iter().all(|&(r, c)| marked[r][c]))
        .collect();

    let lines_completed = completed_lines.len() as u8;
    let full_house = marked.iter().flatten().all(|&m| m);

    let is_winner = match pattern {
        WinningPattern::OneLine => lines_completed >= 1,
        WinningPattern::TwoLines => lines_completed >= 2,
        WinningPattern::FullHouse => full_house,
    };

    Evaluation {
        lines_completed,
        full_house,
        is_winner,
        completed_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn card() -> Card {
        Card::from_rows(
            CardId::new(1),
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

    #[test]
    fn test_line_cells() {
        assert_eq!(Line::Row(2).cells()[4], (2, 4));
        assert_eq!(Line::Column(1).cells()[3], (3, 1));
        assert_eq!(Line::Diagonal.cells()[3], (3, 3));
        assert_eq!(Line::AntiDiagonal.cells()[0], (0, 4));
        assert_eq!(Line::AntiDiagonal.cells()[4], (4, 0));
    }

    #[test]
    fn test_nothing_called() {
        let eval = evaluate(&card(), &CalledSet::new(), WinningPattern::OneLine);
        assert_eq!(eval.lines_completed, 0);
        assert!(!eval.full_house);
        assert!(!eval.is_winner);
    }

    #[test]
    fn test_middle_row_uses_free_cell() {
        let called = CalledSet::from_values(&[3, 18, 48, 63]);
        let eval = evaluate(&card(), &called, WinningPattern::OneLine);

        assert_eq!(eval.lines_completed, 1);
        assert_eq!(eval.completed_lines.as_slice(), &[Line::Row(2)]);
        assert!(eval.is_winner);

        let eval = evaluate(&card(), &called, WinningPattern::TwoLines);
        assert!(!eval.is_winner);
    }

    #[test]
    fn test_column_and_diagonals() {
        // Column N: 31, 32, FREE, 34, 35
        let called = CalledSet::from_values(&[31, 32, 34, 35]);
        let eval = evaluate(&card(), &called, WinningPattern::OneLine);
        assert_eq!(eval.completed_lines.as_slice(), &[Line::Column(2)]);

        // Diagonal: 1, 17, FREE, 49, 65
        let called = CalledSet::from_values(&[1, 17, 49, 65]);
        let eval = evaluate(&card(), &called, WinningPattern::OneLine);
        assert_eq!(eval.completed_lines.as_slice(), &[Line::Diagonal]);

        // Anti-diagonal: 61, 47, FREE, 19, 5
        let called = CalledSet::from_values(&[61, 47, 19, 5]);
        let eval = evaluate(&card(), &called, WinningPattern::OneLine);
        assert_eq!(eval.completed_lines.as_slice(), &[Line::AntiDiagonal]);
    }

    #[test]
    fn test_crossing_lines_count_separately() {
        // Row 2 and column N share the free cell
        let called = CalledSet::from_values(&[3, 18, 48, 63, 31, 32, 34, 35]);
        let eval = evaluate(&card(), &called, WinningPattern::TwoLines);

        assert_eq!(eval.lines_completed, 2);
        assert!(eval.is_winner);
    }

    #[test]
    fn test_all_free_grid_is_full_house() {
        let grid = [[Cell::Free; GRID_SIZE]; GRID_SIZE];
        let eval = evaluate_grid(&grid, &CalledSet::new(), WinningPattern::FullHouse);

        assert!(eval.full_house);
        assert!(eval.is_winner);
        assert_eq!(eval.lines_completed as usize, LINE_COUNT);
    }

    #[test]
    fn test_line_display() {
        assert_eq!(Line::Row(0).to_string(), "row 1");
        assert_eq!(Line::Column(3).to_string(), "column G");
    }
}
