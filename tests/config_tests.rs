//! Round configuration and card catalog loading from files.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use bingo_caller::cards::{CardCatalog, CardId};
use bingo_caller::core::{EvaluationMode, Language, RoundConfig, WinningPattern};
use bingo_caller::game::GameController;
use bingo_caller::Error;

const CATALOG: &str = r#"[
  {"card_id": 7,
   "B": [5, 1, 2, 3, 4],
   "I": [12, 16, 17, 18, 19],
   "N": [28, 31, null, 32, 33],
   "G": [50, 46, 47, 48, 49],
   "O": [70, 61, 62, 63, 64]},
  {"card_id": 8,
   "B": [6, 7, 8, 9, 10],
   "I": [21, 22, 23, 24, 25],
   "N": [36, 37, null, 38, 39],
   "G": [51, 52, 53, 54, 55],
   "O": [66, 67, 68, 69, 71]}
]"#;

const ROUND: &str = r#"
round_id = "round-42"
shop_id = "shop-3"
prize = 1200.0
selected_cards = [8, 7]
draw_interval_ms = 2500
winning_pattern = "Full House"
narration_language = "Amharic"
mode = "manual"
seed = 99

[claims]
endpoint = "https://back-office.example/claims"
timeout_ms = 4000
"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_round_and_catalog() {
    let dir = TempDir::new().unwrap();
    let catalog = CardCatalog::from_path(write(&dir, "cards.json", CATALOG)).unwrap();
    let config = RoundConfig::from_path(write(&dir, "round.toml", ROUND)).unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(config.round_id, "round-42");
    assert_eq!(config.selected_cards, vec![CardId::new(8), CardId::new(7)]);
    assert_eq!(config.winning_pattern, WinningPattern::FullHouse);
    assert_eq!(config.narration_language, Language::Amharic);
    assert_eq!(config.mode, EvaluationMode::Manual);
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.draw_interval().as_millis(), 2500);
    let claims = config.claims.as_ref().unwrap();
    assert_eq!(claims.timeout().as_millis(), 4000);

    let controller = GameController::new(config, &catalog).unwrap();
    let order: Vec<CardId> = controller.selected_cards().iter().map(|c| c.id()).collect();
    assert_eq!(order, vec![CardId::new(8), CardId::new(7)]);
}

#[test]
fn test_minimal_round_uses_defaults() {
    let config = RoundConfig::from_toml_str(
        r#"
round_id = "r"
shop_id = "s"
prize = 0.0
selected_cards = [7]
draw_interval_ms = 3000
winning_pattern = "1 line"
"#,
    )
    .unwrap();

    assert_eq!(config.winning_pattern, WinningPattern::OneLine);
    assert_eq!(config.narration_language, Language::English);
    assert_eq!(config.mode, EvaluationMode::Automatic);
    assert!(config.seed.is_none());
    assert!(config.claims.is_none());
}

#[test]
fn test_unknown_pattern_rejected() {
    let text = ROUND.replace("Full House", "3 Lines");
    let err = RoundConfig::from_toml_str(&text).unwrap_err();
    assert!(matches!(err, Error::InvalidPattern(ref p) if p == "3 Lines"));
}

#[test]
fn test_round_with_card_missing_from_catalog() {
    let catalog = CardCatalog::from_json_str(CATALOG).unwrap();
    let text = ROUND.replace("[8, 7]", "[7, 99]");
    let config = RoundConfig::from_toml_str(&text).unwrap();

    let err = GameController::new(config, &catalog).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(err.to_string().contains("Card 99"));
}

#[test]
fn test_bad_catalogs_rejected() {
    let two_free = CATALOG.replace("[12, 16, 17, 18, 19]", "[12, 16, null, 18, 19]");
    assert!(matches!(
        CardCatalog::from_json_str(&two_free),
        Err(Error::InvalidCard { .. })
    ));

    let short_column = CATALOG.replace("[5, 1, 2, 3, 4]", "[5, 1, 2, 3]");
    assert!(matches!(
        CardCatalog::from_json_str(&short_column),
        Err(Error::InvalidCard { .. })
    ));

    let out_of_range = CATALOG.replace("[70, 61, 62, 63, 64]", "[70, 61, 62, 63, 76]");
    assert!(CardCatalog::from_json_str(&out_of_range).is_err());

    let duplicate_id = CATALOG.replace("\"card_id\": 8", "\"card_id\": 7");
    assert!(matches!(
        CardCatalog::from_json_str(&duplicate_id),
        Err(Error::InvalidCard { .. })
    ));

    let repeated_number = CATALOG.replace("[21, 22, 23, 24, 25]", "[21, 22, 23, 24, 21]");
    assert!(CardCatalog::from_json_str(&repeated_number).is_err());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = RoundConfig::from_path(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
