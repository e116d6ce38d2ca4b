//! End-to-end HTTP tests against a live listener.

mod common;

use common::harness::spawn_test_server;

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let server = spawn_test_server().await.expect("Server should start");

    let body: serde_json::Value = reqwest::get(format!("{}/healthz", server.url()))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ready_endpoint_reports_index() {
    let server = spawn_test_server().await.expect("Server should start");

    let response = reqwest::get(format!("{}/ready", server.url())).await.unwrap();
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["components"]["index_size"], 4);
    assert_eq!(body["components"]["embedder_mode"], "stub");
}

#[tokio::test]
async fn test_analyze_round_trip() {
    let server = spawn_test_server().await.expect("Server should start");
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/analyze", server.url()))
        .json(&serde_json::json!({
            "title": "Miracle cure scam exposed",
            "text": "Celebrity product pulled after complaints."
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    let evidence = body["verification"]["evidence"].as_array().unwrap();
    assert_eq!(evidence.len(), 4);
    assert_eq!(evidence[0]["url"], "https://example.org/scam");
    assert_eq!(body["verification"]["verdict"], "not_implemented");
}

#[tokio::test]
async fn test_concurrent_analyze_requests() {
    let server = spawn_test_server().await.expect("Server should start");
    let client = reqwest::Client::new();

    let requests = (0..8).map(|i| {
        let client = client.clone();
        let url = format!("{}/analyze", server.url());
        async move {
            client
                .post(url)
                .json(&serde_json::json!({ "text": format!("policy update number {i}") }))
                .send()
                .await
                .map(|r| r.status())
        }
    });

    let handles: Vec<_> = requests.map(tokio::spawn).collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), reqwest::StatusCode::OK);
    }
}

#[tokio::test]
async fn test_analyze_rejects_empty_text() {
    let server = spawn_test_server().await.expect("Server should start");

    let response = reqwest::Client::new()
        .post(format!("{}/analyze", server.url()))
        .json(&serde_json::json!({ "text": "" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], 400);
}
