use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use simplifier::config::{AppConfig, DecodingParams};
use simplifier::provider::{available_models, selectable_models, LLMProvider};
use simplifier::provider_ollama::OllamaProvider;
use simplifier::routes_simplify;
use simplifier::simplify::simplify_text;
use simplifier::state::AppState;

pub async fn simplify(
    cfg: &AppConfig,
    text: &str,
    model: &str,
    use_rules: bool,
    params: &DecodingParams,
) -> Result<()> {
    let provider = OllamaProvider::new(cfg.api_base());
    let out = simplify_text(&provider, text, model, use_rules, params)
        .await
        .context("Simplification failed")?;
    println!("{out}");
    Ok(())
}

pub async fn models(cfg: &AppConfig) -> Result<()> {
    let provider = OllamaProvider::new(cfg.api_base());
    let available = available_models(&provider).await;
    for m in selectable_models(&cfg.model_choices, &available) {
        let marker = if m == cfg.default_model { " (default)" } else { "" };
        println!("{m}{marker}");
    }
    Ok(())
}

pub async fn serve(cfg: AppConfig) -> Result<()> {
    let provider = OllamaProvider::new(cfg.api_base());
    let backend = provider.info();
    info!(provider = %backend.name, base_url = %backend.base_url, "model backend");
    let addr = cfg.serve_addr.clone();
    let state = Arc::new(AppState::new(cfg, Box::new(provider)));
    let app = routes_simplify::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("leichte-sprache listening on http://{addr}");
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
