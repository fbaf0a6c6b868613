//! # Study Fetcher Tests
//!
//! Integration tests for batching and the catch-up loop of `trialfeed-studies`,
//! run against a mock studies endpoint.

use anyhow::Result;
use reqwest::Client;
use trialfeed_studies::StudiesClient;
use trialfeed_test_utils::{filter_ids, studies_body, study_json, EchoStudies};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("NCT{:08}", 6_000_000 + i)).collect()
}

#[tokio::test]
async fn test_primary_loop_issues_one_request_per_batch() -> Result<()> {
    // --- Arrange ---
    let server = MockServer::start().await;
    let echo = EchoStudies::new();
    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .respond_with(echo.clone())
        .expect(3)
        .mount(&server)
        .await;

    let client = StudiesClient::new(Client::new(), server.uri());
    let requested = ids(250);

    // --- Act ---
    let records = client.fetch_studies(&requested).await;

    // --- Assert ---
    assert_eq!(records.len(), 250);
    assert_eq!(echo.served(), 3);

    let received = server.received_requests().await.unwrap_or_default();
    let sizes: Vec<usize> = received.iter().map(|r| filter_ids(r).len()).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert!(sizes.iter().all(|size| *size <= 100));
    Ok(())
}

#[tokio::test]
async fn test_no_identifiers_means_no_requests() -> Result<()> {
    // --- Arrange ---
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(EchoStudies::new())
        .expect(0)
        .mount(&server)
        .await;
    let client = StudiesClient::new(Client::new(), server.uri());

    // --- Act ---
    let records = client.fetch_studies(&[]).await;

    // --- Assert ---
    assert!(records.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_catch_up_loop_advances_by_record_count() -> Result<()> {
    // --- Arrange ---
    // Every request yields a single record, whatever it asked for.
    let server = MockServer::start().await;
    let single = studies_body(vec![study_json("NCT1", "One", "Sponsor", &[])]);
    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(single))
        .expect(3)
        .mount(&server)
        .await;

    let client = StudiesClient::new(Client::new(), server.uri());
    let requested = ids(3);

    // --- Act ---
    let records = client.fetch_studies(&requested).await;

    // --- Assert ---
    assert_eq!(records.len(), 3);
    let received = server.received_requests().await.unwrap_or_default();
    let asked: Vec<Vec<String>> = received.iter().map(filter_ids).collect();
    assert_eq!(asked[0], requested);
    assert_eq!(asked[1], requested[1..].to_vec());
    assert_eq!(asked[2], requested[2..].to_vec());
    Ok(())
}

#[tokio::test]
async fn test_failed_batches_contribute_nothing_and_are_not_fatal() -> Result<()> {
    // --- Arrange ---
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let client = StudiesClient::new(Client::new(), server.uri());

    // --- Act ---
    // One primary request, then one catch-up attempt that also fails.
    let records = client.fetch_studies(&ids(2)).await;

    // --- Assert ---
    assert!(records.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_studies_key_is_a_batch_failure() -> Result<()> {
    // --- Arrange ---
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/studies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "totalCount": 0 })))
        .mount(&server)
        .await;

    let client = StudiesClient::new(Client::new(), server.uri());

    // --- Act ---
    let strict = client.try_fetch_batch("NCT1").await;
    let lenient = client.fetch_batch("NCT1").await;

    // --- Assert ---
    assert!(matches!(strict, Err(trialfeed_studies::StudiesError::Decode(_))));
    assert!(lenient.is_empty());
    Ok(())
}
