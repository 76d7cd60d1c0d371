//! Error taxonomy for the caller engine.
//!
//! Every operator-facing failure has its own variant so a front end can pick
//! between a retry affordance and a blocking message via [`Error::is_retryable`].

use thiserror::Error;

use crate::cards::CardId;
use crate::game::GameStatus;

#[derive(Error, Debug)]
pub enum Error {
    /// Every number in the universe has been called.
    #[error("draw pool exhausted: all 75 numbers have been called")]
    ExhaustedPool,

    #[error("invalid winning pattern: {0:?}")]
    InvalidPattern(String),

    #[error("{0} is not selected for this round")]
    CardNotSelected(CardId),

    #[error("no numbers have been called yet")]
    NoNumbersCalled,

    #[error("manual check is not allowed while {0}")]
    CheckNotAllowed(GameStatus),

    /// The claim service rejected or never received the winning claim.
    /// The win itself stays declared.
    #[error("claim submission failed for {card_id}: {message}")]
    ClaimSubmissionFailed { card_id: CardId, message: String },

    #[error("invalid {card_id}: {message}")]
    InvalidCard { card_id: CardId, message: String },

    /// The session task has stopped and no longer takes commands.
    #[error("session closed")]
    SessionClosed,

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Build a configuration error from any message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the operator should be offered a retry rather than a
    /// blocking message.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ClaimSubmissionFailed { .. } | Self::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
