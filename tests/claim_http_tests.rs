//! HTTP claim submission against a mock back office.

use httpmock::prelude::*;
use serde_json::json;

use bingo_caller::cards::CardId;
use bingo_caller::core::ClaimsConfig;
use bingo_caller::game::WinningClaim;
use bingo_caller::service::{ClaimService, HttpClaimService};
use bingo_caller::Error;

fn claim() -> WinningClaim {
    WinningClaim {
        card_id: CardId::new(7),
        round_id: "round-42".into(),
        shop_id: "shop-3".into(),
        prize: 1200.0,
    }
}

fn service(server: &MockServer) -> HttpClaimService {
    HttpClaimService::new(&ClaimsConfig {
        endpoint: server.url("/claims"),
        timeout_ms: Some(2000),
    })
    .unwrap()
}

#[tokio::test]
async fn test_claim_posted_as_camel_case_json() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/claims")
                .header("content-type", "application/json")
                .json_body(json!({
                    "cardId": 7,
                    "roundId": "round-42",
                    "shopId": "shop-3",
                    "prize": 1200.0
                }));
            then.status(201).json_body(json!({ "claimId": "c-99" }));
        })
        .await;

    let receipt = service(&server).submit(&claim()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(receipt.body, Some(json!({ "claimId": "c-99" })));
}

#[tokio::test]
async fn test_empty_and_plain_text_bodies() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/claims");
            then.status(204);
        })
        .await;

    let receipt = service(&server).submit(&claim()).await.unwrap();
    assert!(receipt.body.is_none());

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/claims");
            then.status(200).body("OK");
        })
        .await;

    let receipt = service(&server).submit(&claim()).await.unwrap();
    assert_eq!(receipt.body, Some(json!("OK")));
}

#[tokio::test]
async fn test_server_error_is_retryable() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/claims");
            then.status(500).body("database unavailable");
        })
        .await;

    let err = service(&server).submit(&claim()).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, Error::Http(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unreachable_endpoint_fails() {
    let service = HttpClaimService::new(&ClaimsConfig {
        endpoint: "http://127.0.0.1:9/claims".into(),
        timeout_ms: Some(500),
    })
    .unwrap();

    let err = service.submit(&claim()).await.unwrap_err();
    assert!(err.is_retryable());
}
