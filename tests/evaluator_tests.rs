//! Card evaluation properties.
//!
//! These tests check line counting, full house detection and pattern
//! decisions against hand-built cards and call sets.

use proptest::prelude::*;

use bingo_caller::cards::{Card, CardId};
use bingo_caller::core::{CalledSet, WinningPattern};
use bingo_caller::rules::{evaluate, Line, LINE_COUNT};

const CARD_7: [[u8; 5]; 5] = [
    [5, 12, 28, 50, 70],
    [1, 16, 31, 46, 61],
    [2, 17, 32, 47, 62],
    [3, 18, 33, 48, 63],
    [4, 19, 34, 49, 64],
];

fn card_7() -> Card {
    Card::from_rows(CardId::new(7), CARD_7).unwrap()
}

fn center_free_card() -> Card {
    Card::from_rows(
        CardId::new(3),
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

fn all_numbers(rows: &[[u8; 5]; 5]) -> Vec<u8> {
    rows.iter().flatten().copied().filter(|&v| v != 0).collect()
}

/// A card with no free cell and nothing called has nothing.
#[test]
fn test_nothing_called_no_lines_under_any_pattern() {
    let card = card_7();
    let called = CalledSet::new();

    for pattern in WinningPattern::ALL {
        let evaluation = evaluate(&card, &called, pattern);
        assert_eq!(evaluation.lines_completed, 0);
        assert!(!evaluation.full_house);
        assert!(!evaluation.is_winner);
    }
}

/// One complete row wins "1 Line" and nothing else.
#[test]
fn test_one_line_wins_on_first_line() {
    let card = card_7();
    let called = CalledSet::from_values(&[70, 50, 28, 12, 5]);

    let one = evaluate(&card, &called, WinningPattern::OneLine);
    assert!(one.is_winner);
    assert_eq!(one.lines_completed, 1);
    assert_eq!(one.completed_lines.as_slice(), &[Line::Row(0)]);

    assert!(!evaluate(&card, &called, WinningPattern::TwoLines).is_winner);
    assert!(!evaluate(&card, &called, WinningPattern::FullHouse).is_winner);
}

/// Two lines need two complete definitions.
#[test]
fn test_two_lines() {
    let card = card_7();
    let mut values = vec![5, 12, 28, 50, 70];
    values.extend([5, 1, 2, 3, 4]);
    let called = CalledSet::from_values(&values);

    let evaluation = evaluate(&card, &called, WinningPattern::TwoLines);
    assert_eq!(evaluation.lines_completed, 2);
    assert!(evaluation.is_winner);
}

/// Every row marked means every line is complete.
#[test]
fn test_full_grid_completes_all_twelve_lines() {
    let card = card_7();
    let called = CalledSet::from_values(&all_numbers(&CARD_7));

    let evaluation = evaluate(&card, &called, WinningPattern::FullHouse);
    assert!(evaluation.lines_completed >= 5);
    assert_eq!(evaluation.lines_completed as usize, LINE_COUNT);
    assert!(evaluation.full_house);
    assert!(evaluation.is_winner);
}

/// One unmarked cell off the diagonals leaves ten lines: still no full house.
#[test]
fn test_full_house_not_won_when_nearly_full() {
    let card = card_7();
    let values: Vec<u8> = all_numbers(&CARD_7)
        .into_iter()
        .filter(|&v| v != 31)
        .collect();
    let called = CalledSet::from_values(&values);

    let evaluation = evaluate(&card, &called, WinningPattern::FullHouse);
    assert_eq!(evaluation.lines_completed, 10);
    assert!(!evaluation.full_house);
    assert!(!evaluation.is_winner);

    // The same calls easily satisfy the line patterns
    assert!(evaluate(&card, &called, WinningPattern::OneLine).is_winner);
    assert!(evaluate(&card, &called, WinningPattern::TwoLines).is_winner);
}

/// The free cell counts as marked for every line through it.
#[test]
fn test_free_cell_completes_center_lines() {
    let card = center_free_card();
    let called = CalledSet::from_values(&[31, 32, 34, 35]);

    let evaluation = evaluate(&card, &called, WinningPattern::OneLine);
    assert!(evaluation.is_winner);
    assert_eq!(evaluation.completed_lines.as_slice(), &[Line::Column(2)]);
}

proptest! {
    /// Evaluation depends only on its inputs.
    #[test]
    fn prop_evaluate_is_pure(calls in proptest::collection::hash_set(1u8..=75, 0..75)) {
        let card = card_7();
        let values: Vec<u8> = calls.into_iter().collect();
        let called = CalledSet::from_values(&values);

        for pattern in WinningPattern::ALL {
            let first = evaluate(&card, &called, pattern);
            let second = evaluate(&card, &called, pattern);
            prop_assert_eq!(first, second);
        }
    }

    /// Adding calls never removes a completed line.
    #[test]
    fn prop_lines_monotonic(calls in proptest::collection::vec(1u8..=75, 0..40), extra in 1u8..=75) {
        let card = card_7();
        let before = CalledSet::from_values(&calls);
        let mut more = calls.clone();
        more.push(extra);
        let after = CalledSet::from_values(&more);

        let a = evaluate(&card, &before, WinningPattern::OneLine);
        let b = evaluate(&card, &after, WinningPattern::OneLine);
        prop_assert!(b.lines_completed >= a.lines_completed);
    }
}
