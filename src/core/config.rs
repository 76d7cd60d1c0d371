//! Round configuration.
//!
//! A round is configured once at start and never changes afterwards:
//! - `WinningPattern`: what counts as a win
//! - `Language`: narration language tag
//! - `EvaluationMode`: automatic checks after every draw, or manual checks
//! - `RoundConfig`: combines all of the above with round/shop identity,
//!   prize, selected cards and the draw cadence
//!
//! Configuration files are TOML. Pattern text is parsed at load time, so an
//! unknown pattern fails before the round starts.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cards::{CardCatalog, CardId};
use crate::error::{Error, Result};

/// Winning rule for a round. Serialized by display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum WinningPattern {
    /// At least one completed row, column or diagonal.
    OneLine,
    /// At least two completed lines.
    TwoLines,
    /// Every cell marked.
    FullHouse,
}

impl WinningPattern {
    pub const ALL: [WinningPattern; 3] = [Self::OneLine, Self::TwoLines, Self::FullHouse];

    /// Display name, as used in configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OneLine => "1 Line",
            Self::TwoLines => "2 Lines",
            Self::FullHouse => "Full House",
        }
    }
}

impl FromStr for WinningPattern {
    type Err = Error;

    /// Accepts the display names, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "1 line" => Ok(Self::OneLine),
            "2 lines" => Ok(Self::TwoLines),
            "full house" => Ok(Self::FullHouse),
            _ => Err(Error::InvalidPattern(s.to_string())),
        }
    }
}

impl TryFrom<String> for WinningPattern {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<WinningPattern> for &'static str {
    fn from(pattern: WinningPattern) -> Self {
        pattern.name()
    }
}

impl std::fmt::Display for WinningPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Narration language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Amharic,
    Tigrinya,
}

impl Language {
    /// Parse a language name or tag. Unknown values fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Self::English,
            "am" | "amharic" => Self::Amharic,
            "ti" | "tigrinya" | "tigrigna" => Self::Tigrinya,
            other => {
                warn!(language = other, "unknown narration language, using English");
                Self::English
            }
        }
    }

    /// BCP 47 primary language subtag used to pick a voice.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Amharic => "am",
            Self::Tigrinya => "ti",
        }
    }
}

/// When cards are checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationMode {
    /// Every selected card is checked after each draw.
    #[default]
    Automatic,
    /// Cards are checked only when the operator asks.
    Manual,
}

impl FromStr for EvaluationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "automatic" => Ok(Self::Automatic),
            "manual" => Ok(Self::Manual),
            other => Err(Error::config(format!("unknown evaluation mode {other:?}"))),
        }
    }
}

impl std::fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Automatic => f.write_str("auto"),
            Self::Manual => f.write_str("manual"),
        }
    }
}

/// Where winning claims are posted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsConfig {
    pub endpoint: String,
    /// Request timeout, defaults to 10 seconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl ClaimsConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(10_000))
    }
}

/// On-disk shape of a round file. Converted into [`RoundConfig`] after
/// parsing so pattern and language text go through their own parsers.
#[derive(Debug, Deserialize)]
struct RoundFile {
    round_id: String,
    shop_id: String,
    prize: f64,
    selected_cards: Vec<u32>,
    draw_interval_ms: u64,
    winning_pattern: String,
    #[serde(default)]
    narration_language: Option<String>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    claims: Option<ClaimsConfig>,
}

/// Complete, immutable configuration of one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub round_id: String,
    pub shop_id: String,
    /// Monetary prize, finite and non-negative.
    pub prize: f64,
    /// Cards eligible this round, in the order they are checked.
    pub selected_cards: Vec<CardId>,
    pub draw_interval_ms: u64,
    pub winning_pattern: WinningPattern,
    pub narration_language: Language,
    /// Evaluation mode the round starts in.
    pub mode: EvaluationMode,
    /// Seed for the draw RNG; random when absent.
    pub seed: Option<u64>,
    pub claims: Option<ClaimsConfig>,
}

impl RoundConfig {
    /// Create a configuration with defaults: 1 Line, English, automatic
    /// mode, 3 second cadence, no prize.
    pub fn new(round_id: impl Into<String>, shop_id: impl Into<String>) -> Self {
        Self {
            round_id: round_id.into(),
            shop_id: shop_id.into(),
            prize: 0.0,
            selected_cards: Vec::new(),
            draw_interval_ms: 3_000,
            winning_pattern: WinningPattern::OneLine,
            narration_language: Language::English,
            mode: EvaluationMode::Automatic,
            seed: None,
            claims: None,
        }
    }

    #[must_use]
    pub fn with_prize(mut self, prize: f64) -> Self {
        self.prize = prize;
        self
    }

    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = u32>) -> Self {
        self.selected_cards = cards.into_iter().map(CardId::new).collect();
        self
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: WinningPattern) -> Self {
        self.winning_pattern = pattern;
        self
    }

    #[must_use]
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.draw_interval_ms = interval_ms;
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.narration_language = language;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_claims(mut self, claims: ClaimsConfig) -> Self {
        self.claims = Some(claims);
        self
    }

    /// Draw cadence.
    #[must_use]
    pub fn draw_interval(&self) -> Duration {
        Duration::from_millis(self.draw_interval_ms)
    }

    /// Parse a round from TOML text. Does not check cards against a catalog;
    /// call [`RoundConfig::validate`] for that.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: RoundFile = toml::from_str(text)?;
        let winning_pattern = file.winning_pattern.parse()?;
        let mode = match file.mode.as_deref() {
            Some(mode) => mode.parse()?,
            None => EvaluationMode::default(),
        };

        Ok(Self {
            round_id: file.round_id,
            shop_id: file.shop_id,
            prize: file.prize,
            selected_cards: file.selected_cards.into_iter().map(CardId::new).collect(),
            draw_interval_ms: file.draw_interval_ms,
            winning_pattern,
            narration_language: file
                .narration_language
                .as_deref()
                .map(Language::from_tag)
                .unwrap_or_default(),
            mode,
            seed: file.seed,
            claims: file.claims,
        })
    }

    /// Load a round from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check the configuration against the card catalog.
    pub fn validate(&self, catalog: &CardCatalog) -> Result<()> {
        if self.round_id.trim().is_empty() {
            return Err(Error::config("round_id must not be empty"));
        }
        if !self.prize.is_finite() || self.prize < 0.0 {
            return Err(Error::config(format!(
                "prize must be a non-negative amount, got {}",
                self.prize
            )));
        }
        if self.draw_interval_ms == 0 {
            return Err(Error::config("draw_interval_ms must be positive"));
        }
        if self.selected_cards.is_empty() {
            return Err(Error::config("at least one card must be selected"));
        }

        let mut seen = rustc_hash::FxHashSet::default();
        for &id in &self.selected_cards {
            if !seen.insert(id) {
                return Err(Error::config(format!("{id} is selected twice")));
            }
            if !catalog.contains(id) {
                return Err(Error::config(format!("{id} is not in the card catalog")));
            }
        }

        if let Some(claims) = &self.claims {
            if claims.endpoint.trim().is_empty() {
                return Err(Error::config("claims.endpoint must not be empty"));
            }
        }

        Ok(())
    }
}
