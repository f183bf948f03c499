use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use simplifier::config::AppConfig;
use simplifier::provider_ollama::OllamaProvider;
use simplifier::routes_simplify::{self, FLAG_FILE};
use simplifier::state::AppState;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_ollama() -> String {
    let app = Router::new()
        .route(
            "/api/generate",
            post(|Json(body): Json<Value>| async move {
                let rules = body["prompt"].as_str().unwrap_or("").contains("Beachte dabei");
                Json(json!({ "response": format!("leicht (rules={rules})") }))
            }),
        )
        .route(
            "/api/tags",
            get(|| async {
                Json(json!({ "models": [
                    { "name": "llama3.2-leichte-sprache:fs" },
                    { "name": "llama3.1-leichte-sprache:fs" }
                ]}))
            }),
        );
    spawn(app).await
}

async fn spawn_backend(export_dir: &std::path::Path) -> String {
    let ollama = spawn_ollama().await;
    let mut cfg = AppConfig::from_vars(|_| None).unwrap();
    cfg.export_path = export_dir.to_path_buf();
    let provider = OllamaProvider::new(format!("{ollama}/api"));
    let state = Arc::new(AppState::new(cfg, Box::new(provider)));
    spawn(routes_simplify::router(state)).await
}

#[tokio::test]
async fn test_simplify_uses_defaults_and_rules_toggle() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_backend(dir.path()).await;
    let client = reqwest::Client::new();

    let resp: Value = client
        .post(format!("{base}/simplify"))
        .json(&json!({ "text": "Die Trägerschaft liegt bei der Gemeinde." }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resp["result"], "leicht (rules=false)");
    assert_eq!(resp["model"], "llama3.1-leichte-sprache:fs");

    let resp: Value = client
        .post(format!("{base}/simplify"))
        .json(&json!({ "text": "Text.", "use_rules": true, "model": "x" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resp["result"], "leicht (rules=true)");
    assert_eq!(resp["model"], "x");
}

#[tokio::test]
async fn test_empty_text_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_backend(dir.path()).await;
    let status = reqwest::Client::new()
        .post(format!("{base}/simplify"))
        .json(&json!({ "text": "  " }))
        .send()
        .await
        .unwrap()
        .status();
    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_models_in_configured_order() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_backend(dir.path()).await;
    let resp: Value = reqwest::get(format!("{base}/models")).await.unwrap().json().await.unwrap();
    assert_eq!(
        resp["models"],
        json!(["llama3.1-leichte-sprache:fs", "llama3.2-leichte-sprache:fs"])
    );
    assert_eq!(resp["default"], "llama3.1-leichte-sprache:fs");
    assert_eq!(resp["provider"]["name"], "ollama");
    assert!(resp["provider"]["base_url"].as_str().unwrap().ends_with("/api"));
}

#[tokio::test]
async fn test_flag_appends_json_line() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_backend(dir.path()).await;
    let client = reqwest::Client::new();

    for i in 0..2 {
        let status = client
            .post(format!("{base}/flag"))
            .json(&json!({ "text": format!("Text {i}"), "result": "Leicht.", "model": "m" }))
            .send()
            .await
            .unwrap()
            .status();
        assert_eq!(status, reqwest::StatusCode::CREATED);
    }

    let text = std::fs::read_to_string(dir.path().join(FLAG_FILE)).unwrap();
    let lines: Vec<Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["text"], "Text 1");
    assert!(lines[0]["flagged_at"].is_string());
}
