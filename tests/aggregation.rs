//! End-to-end aggregation tests: the engine driving the real HTTP client
//! against a mock upstream service.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use folioquery::{AggregationEngine, HttpUpstreamClient};

fn engine_for(server: &MockServer) -> AggregationEngine<HttpUpstreamClient> {
    AggregationEngine::new(HttpUpstreamClient::new(
        server.uri().parse().unwrap(),
        Duration::from_secs(2),
    ))
}

async fn mount_portfolios(server: &MockServer, names: &[&str]) {
    let body: Vec<_> = names
        .iter()
        .map(|n| json!({"name": n, "is_disabled": false}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/portfolios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_holdings(server: &MockServer, name: &str, holdings: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/holdings", name)))
        .respond_with(ResponseTemplate::new(200).set_body_json(holdings))
        .mount(server)
        .await;
}

async fn mount_cash(server: &MockServer, name: &str, cash: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/cash", name)))
        .respond_with(ResponseTemplate::new(200).set_body_json(cash))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_stock_search_over_http() {
    let server = MockServer::start().await;
    mount_portfolios(&server, &["A", "B", "C"]).await;
    mount_holdings(&server, "A", json!([{"stock_id": "AMZN", "value": 1000.0}])).await;
    mount_holdings(&server, "B", json!([{"stock_id": "GOOGL", "value": 2000.0}])).await;
    mount_holdings(
        &server,
        "C",
        json!([{"stock_id": "GOOGL", "value": 2000.0}, {"stock_id": "MSFT", "value": 1000.0}]),
    )
    .await;

    let engine = engine_for(&server);
    assert_eq!(engine.find_portfolios_holding("AMZN").await, vec!["A"]);
    assert_eq!(engine.find_portfolios_holding("GOOGL").await, vec!["B", "C"]);
}

#[tokio::test]
async fn test_cash_fractions_over_http() {
    let server = MockServer::start().await;
    mount_portfolios(&server, &["A", "B"]).await;
    mount_cash(&server, "A", json!({"value": 100.0})).await;
    mount_holdings(
        &server,
        "A",
        json!([{"stock_id": "AMZN", "value": 1000.0}, {"stock_id": "GOOGL", "value": 2000.0}]),
    )
    .await;
    // B has no cash account; its holdings are never requested.
    mount_cash(&server, "B", json!({"value": null})).await;

    let fractions = engine_for(&server).cash_fractions().await;
    assert_eq!(fractions.len(), 2);
    assert!((fractions["A"] - 100.0 / 3100.0).abs() < 1e-9);
    assert_eq!(fractions["B"], 0.0);
}

#[tokio::test]
async fn test_portfolio_list_failure_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/portfolios"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let engine = engine_for(&server);
    assert!(engine.find_portfolios_holding("AMZN").await.is_empty());
    assert!(engine.cash_fractions().await.is_empty());
}

#[tokio::test]
async fn test_per_portfolio_failure_is_isolated() {
    let server = MockServer::start().await;
    mount_portfolios(&server, &["A", "B"]).await;
    // A's holdings endpoint rejects the request.
    Mock::given(method("GET"))
        .and(path("/A/holdings"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_holdings(&server, "B", json!([{"stock_id": "GOOGL", "value": 2000.0}])).await;

    // Membership excludes the failing portfolio entirely.
    let engine = engine_for(&server);
    assert_eq!(engine.find_portfolios_holding("GOOGL").await, vec!["B"]);

    // Cash fraction keeps the key and defaults it to zero.
    mount_cash(&server, "A", json!({"value": 100.0})).await;
    mount_cash(&server, "B", json!({"value": 500.0})).await;
    let fractions = engine.cash_fractions().await;
    assert_eq!(fractions.len(), 2);
    assert_eq!(fractions["A"], 0.0);
    assert!((fractions["B"] - 0.2).abs() < 1e-9);
}

#[tokio::test]
async fn test_one_slow_portfolio_does_not_block_siblings() {
    let server = MockServer::start().await;
    mount_portfolios(&server, &["Slow", "Fast"]).await;
    Mock::given(method("GET"))
        .and(path("/Slow/holdings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"stock_id": "GOOGL", "value": 1.0}]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    mount_holdings(&server, "Fast", json!([{"stock_id": "GOOGL", "value": 1.0}])).await;

    // The slow portfolio times out and is excluded; the fast one still lands.
    let engine = AggregationEngine::new(HttpUpstreamClient::new(
        server.uri().parse().unwrap(),
        Duration::from_millis(200),
    ));
    assert_eq!(engine.find_portfolios_holding("GOOGL").await, vec!["Fast"]);
}
