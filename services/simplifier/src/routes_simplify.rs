//! JSON backend of the interactive simplification form.

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{extract::State, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::DecodingParams;
use crate::provider::{available_models, selectable_models};
use crate::simplify::simplify_text;
use crate::state::SharedState;

pub const FLAG_FILE: &str = "flagged.jsonl";

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/simplify", post(post_simplify))
        .route("/models", get(get_models))
        .route("/flag", post(post_flag))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Deserialize)]
pub struct SimplifyReq {
    pub text: String,
    pub model: Option<String>,
    pub use_rules: Option<bool>,
    pub top_k: Option<u32>,
    pub top_p: Option<f32>,
    pub temperature: Option<f32>,
}

#[derive(Serialize)]
pub struct SimplifyResp {
    pub result: String,
    pub model: String,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, msg: impl ToString) -> ApiError {
    (status, Json(json!({ "error": msg.to_string() })))
}

pub async fn post_simplify(
    State(state): State<SharedState>,
    Json(req): Json<SimplifyReq>,
) -> Result<Json<SimplifyResp>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "text must not be empty"));
    }

    let cfg = &state.config;
    let model = req.model.unwrap_or_else(|| cfg.default_model.clone());
    let defaults = cfg.decoding;
    let params = DecodingParams {
        top_k: req.top_k.unwrap_or(defaults.top_k),
        top_p: req.top_p.unwrap_or(defaults.top_p),
        temperature: req.temperature.unwrap_or(defaults.temperature),
    };
    let use_rules = req.use_rules.unwrap_or(cfg.use_rules);

    let result = simplify_text(state.provider.as_ref(), &req.text, &model, use_rules, &params)
        .await
        .map_err(|e| api_error(StatusCode::BAD_GATEWAY, e))?;

    Ok(Json(SimplifyResp { result, model }))
}

pub async fn get_models(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let available = available_models(state.provider.as_ref()).await;
    let models = selectable_models(&state.config.model_choices, &available);
    let default = models
        .iter()
        .find(|m| **m == state.config.default_model)
        .or_else(|| models.first())
        .cloned();
    Json(json!({ "models": models, "default": default, "provider": state.provider.info() }))
}

#[derive(Deserialize, Serialize)]
pub struct FlagReq {
    pub text: String,
    pub result: String,
    pub model: String,
    #[serde(default)]
    pub use_rules: bool,
    pub params: Option<DecodingParams>,
}

/// Appends a flagged form result to `<export path>/flagged.jsonl`.
pub async fn post_flag(
    State(state): State<SharedState>,
    Json(req): Json<FlagReq>,
) -> Result<StatusCode, ApiError> {
    let dir = &state.config.export_path;
    let mut line = serde_json::to_value(&req).map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;
    line["flagged_at"] = json!(chrono::Utc::now());
    let mut bytes = serde_json::to_vec(&line).map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;
    bytes.push(b'\n');

    let _guard = state.flag_lock.lock().await;
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;
    let path = dir.join(FLAG_FILE);
    let mut f = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;
    f.write_all(&bytes)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    info!(path = %path.display(), "flagged result");
    Ok(StatusCode::CREATED)
}
