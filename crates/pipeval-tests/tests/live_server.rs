//! E2E tests over a real TCP socket
//!
//! These start the server on an ephemeral port and talk to it with reqwest,
//! the way the editor frontend does.

use anyhow::Result;
use pipeval_lib::AppConfig;
use pipeval_tests::TestServer;
use pipeval_tests::fixtures::{feedback_pipeline, starter_pipeline};
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use serde_json::{Value, json};

/// Response body as the frontend reads it
#[derive(Debug, Deserialize)]
struct ParseResponse {
    num_nodes: usize,
    num_edges: usize,
    is_dag: bool,
}

#[tokio::test]
async fn test_health_check_over_tcp() -> Result<()> {
    let server = TestServer::start().await?;

    let body: Value = reqwest::get(server.url("/")).await?.json().await?;
    assert_eq!(body, json!({ "Ping": "Pong" }));

    server.stop().await
}

#[tokio::test]
async fn test_submit_pipelines_over_tcp() -> Result<()> {
    let server = TestServer::start().await?;
    let client = Client::new();

    let valid: ParseResponse = client
        .post(server.url("/pipelines/parse"))
        .json(&starter_pipeline())
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!((valid.num_nodes, valid.num_edges), (3, 2));
    assert!(valid.is_dag);

    let cyclic: ParseResponse = client
        .post(server.url("/pipelines/parse"))
        .json(&feedback_pipeline())
        .send()
        .await?
        .json()
        .await?;
    assert!(!cyclic.is_dag);

    server.stop().await
}

#[tokio::test]
async fn test_concurrent_submissions_are_independent() -> Result<()> {
    let server = TestServer::start().await?;
    let client = Client::new();

    let requests = (0..16).map(|i| {
        let client = client.clone();
        let url = server.url("/pipelines/parse");
        let pipeline = if i % 2 == 0 {
            starter_pipeline()
        } else {
            feedback_pipeline()
        };
        tokio::spawn(async move {
            let response: ParseResponse = client.post(url).json(&pipeline).send().await?.json().await?;
            anyhow::Ok((i, response.is_dag))
        })
    });

    for request in requests.collect::<Vec<_>>() {
        let (i, is_dag) = request.await??;
        assert_eq!(is_dag, i % 2 == 0, "request {} got the wrong verdict", i);
    }

    server.stop().await
}

#[tokio::test]
async fn test_invalid_payload_gets_detail() -> Result<()> {
    let server = TestServer::start().await?;

    let response = Client::new()
        .post(server.url("/pipelines/parse"))
        .json(&json!({ "nodes": [{ "id": "a" }], "edges": [] }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await?;
    assert!(body["detail"].is_string());

    server.stop().await
}

#[tokio::test]
async fn test_cors_headers_for_configured_origin() -> Result<()> {
    let config = AppConfig {
        allowed_origins: vec!["https://editor.example.com".to_string()],
        ..AppConfig::default()
    };
    let server = TestServer::start_with(config).await?;

    let response = Client::new()
        .post(server.url("/pipelines/parse"))
        .header(header::ORIGIN, "https://editor.example.com")
        .json(&starter_pipeline())
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://editor.example.com"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );

    server.stop().await
}
