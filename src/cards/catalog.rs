//! Card catalog for id lookup.
//!
//! The `CardCatalog` holds every card a shop can sell. It is loaded once
//! from a JSON array of card records and only read afterwards.

use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::info;

use super::card::{Card, CardId, CardRecord};
use crate::error::{Error, Result};

/// Read-only catalog of cards.
///
/// ## Example
///
/// ```
/// use bingo_caller::cards::{CardCatalog, CardId};
///
/// let json = r#"[{"card_id": 1,
///     "B": [1, 2, 3, 4, 5], "I": [16, 17, 18, 19, 20],
///     "N": [31, 32, null, 34, 35], "G": [46, 47, 48, 49, 50],
///     "O": [61, 62, 63, 64, 65]}]"#;
///
/// let catalog = CardCatalog::from_json_str(json).unwrap();
/// assert!(catalog.contains(CardId::new(1)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Card>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card. Fails if a card with the same ID already exists.
    pub fn insert(&mut self, card: Card) -> Result<()> {
        let id = card.id();
        if self.cards.contains_key(&id) {
            return Err(Error::InvalidCard {
                card_id: id,
                message: "duplicate card id in catalog".to_string(),
            });
        }
        self.cards.insert(id, card);
        Ok(())
    }

    /// Parse a JSON array of card records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<CardRecord> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(Card::try_from(record)?)?;
        }
        Ok(catalog)
    }

    /// Load a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        info!(path = %path.display(), cards = catalog.len(), "loaded card catalog");
        Ok(catalog)
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Check if a card ID is in the catalog.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Clone out the given cards, keeping the requested order.
    ///
    /// Fails on the first ID that is not in the catalog.
    pub fn select(&self, ids: &[CardId]) -> Result<Vec<Card>> {
        ids.iter()
            .map(|&id| {
                self.get(id)
                    .cloned()
                    .ok_or_else(|| Error::config(format!("{id} is not in the card catalog")))
            })
            .collect()
    }
}
