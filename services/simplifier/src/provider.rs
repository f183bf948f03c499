use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::config::DecodingParams;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub base_url: String,
}

/// Why a call to the model service produced no text.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed response from {url}: {reason}")]
    Malformed { url: String, reason: String },

    #[error("response from {url} has no `{field}` field")]
    MissingField { url: String, field: &'static str },
}

impl ProviderError {
    pub fn tag(&self) -> &'static str {
        match self {
            ProviderError::Transport { .. } => "transport",
            ProviderError::Malformed { .. } => "malformed",
            ProviderError::MissingField { .. } => "missing_field",
        }
    }
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        params: &DecodingParams,
    ) -> Result<String, ProviderError>;
    async fn list_models(&self) -> Result<Vec<String>, ProviderError>;
    fn info(&self) -> ProviderInfo;
}

/// Model ids the service reports, or none if it cannot be reached.
pub async fn available_models(provider: &dyn LLMProvider) -> Vec<String> {
    match provider.list_models().await {
        Ok(models) => models,
        Err(e) => {
            warn!(error = %e, "listing models failed");
            Vec::new()
        }
    }
}

/// Configured choices that are also available, in configured order.
pub fn selectable_models(choices: &[String], available: &[String]) -> Vec<String> {
    choices
        .iter()
        .filter(|c| available.contains(c))
        .cloned()
        .collect()
}
