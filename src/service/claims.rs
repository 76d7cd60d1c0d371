//! Claim submission services.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::core::ClaimsConfig;
use crate::error::Result;
use crate::game::{ClaimReceipt, WinningClaim};

/// Submits a declared win to the back office.
#[async_trait]
pub trait ClaimService: Send + Sync {
    async fn submit(&self, claim: &WinningClaim) -> Result<ClaimReceipt>;
}

/// Posts claims as JSON to an HTTP endpoint.
///
/// Any non-2xx status is a failure.
#[derive(Clone, Debug)]
pub struct HttpClaimService {
    client: Client,
    endpoint: String,
}

impl HttpClaimService {
    pub fn new(config: &ClaimsConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ClaimService for HttpClaimService {
    async fn submit(&self, claim: &WinningClaim) -> Result<ClaimReceipt> {
        debug!(endpoint = %self.endpoint, card_id = %claim.card_id, "posting claim");
        let response = self
            .client
            .post(&self.endpoint)
            .json(claim)
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
        };
        Ok(ClaimReceipt { body })
    }
}

/// Accepts every claim without sending it anywhere.
#[derive(Clone, Debug, Default)]
pub struct DryRunClaimService;

#[async_trait]
impl ClaimService for DryRunClaimService {
    async fn submit(&self, claim: &WinningClaim) -> Result<ClaimReceipt> {
        info!(
            card_id = %claim.card_id,
            round = %claim.round_id,
            shop = %claim.shop_id,
            prize = claim.prize,
            "dry run: claim not submitted"
        );
        Ok(ClaimReceipt::default())
    }
}

/// Build the service described by the round configuration.
pub fn from_config(config: Option<&ClaimsConfig>) -> Result<Arc<dyn ClaimService>> {
    match config {
        Some(claims) => Ok(Arc::new(HttpClaimService::new(claims)?)),
        None => Ok(Arc::new(DryRunClaimService)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    #[tokio::test]
    async fn test_dry_run_accepts() {
        let claim = WinningClaim {
            card_id: CardId::new(4),
            round_id: "r".into(),
            shop_id: "s".into(),
            prize: 10.0,
        };
        let receipt = DryRunClaimService.submit(&claim).await.unwrap();
        assert!(receipt.body.is_none());
    }

    #[test]
    fn test_from_config() {
        let config = ClaimsConfig {
            endpoint: "http://localhost:1/claims".into(),
            timeout_ms: Some(500),
        };
        assert!(from_config(Some(&config)).is_ok());
        assert!(from_config(None).is_ok());
    }
}
