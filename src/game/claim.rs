//! Winning claims and their submission state.
//!
//! A claim is created synchronously when a winner is declared and handed
//! out as a [`ClaimTicket`]. The ticket carries the round generation so a
//! result arriving after a restart can be recognised and dropped.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Payload sent to the claim submission service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinningClaim {
    pub card_id: CardId,
    pub round_id: String,
    pub shop_id: String,
    pub prize: f64,
}

/// A claim tagged with the round generation it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaimTicket {
    pub generation: u64,
    pub claim: WinningClaim,
}

/// What the claim service returned on success.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimReceipt {
    /// Raw response body, if any.
    pub body: Option<serde_json::Value>,
}

/// Submission progress of the current round's claim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ClaimState {
    /// No winner declared.
    #[default]
    None,
    /// Submitted, waiting for the service.
    Pending(ClaimTicket),
    /// The service accepted the claim.
    Submitted {
        claim: WinningClaim,
        receipt: ClaimReceipt,
    },
    /// The service failed; the operator may retry.
    Failed { claim: WinningClaim, error: String },
}

impl ClaimState {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, ClaimState::Pending(_))
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, ClaimState::Failed { .. })
    }

    /// The claim involved, whatever its state.
    #[must_use]
    pub fn claim(&self) -> Option<&WinningClaim> {
        match self {
            ClaimState::None => None,
            ClaimState::Pending(ticket) => Some(&ticket.claim),
            ClaimState::Submitted { claim, .. } | ClaimState::Failed { claim, .. } => Some(claim),
        }
    }
}
