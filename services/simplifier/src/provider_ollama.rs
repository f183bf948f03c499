use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::DecodingParams;
use crate::provider::{LLMProvider, ProviderError, ProviderInfo};

pub struct OllamaProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    /// `base_url` is the API prefix, e.g. `http://localhost:11434/api`.
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        params: &DecodingParams,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/generate", self.base_url);
        let body = serde_json::json!({
            "model": model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": params.temperature,
                "top_p": params.top_p,
                "top_k": params.top_k,
            }
        });

        let resp = match self.client.post(&url).json(&body).send().await {
            Ok(r) => r,
            Err(source) => {
                let err = ProviderError::Transport { url, source };
                report(&err, &body, None);
                return Err(err);
            }
        };
        let status = resp.status();
        let raw = match resp.text().await {
            Ok(t) => t,
            Err(source) => {
                let err = ProviderError::Transport { url, source };
                report(&err, &body, None);
                return Err(err);
            }
        };

        let json: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                let err = ProviderError::Malformed {
                    url,
                    reason: format!("HTTP {status}: {e}"),
                };
                report(&err, &body, Some(&raw));
                return Err(err);
            }
        };

        match json.get("response").and_then(Value::as_str) {
            Some(text) => Ok(text.to_string()),
            None => {
                let err = ProviderError::MissingField {
                    url,
                    field: "response",
                };
                report(&err, &body, Some(&raw));
                Err(err)
            }
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let url = format!("{}/tags", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ProviderError::Transport { url: url.clone(), source })?;
        let raw = resp
            .text()
            .await
            .map_err(|source| ProviderError::Transport { url: url.clone(), source })?;

        let tags: TagsResponse = serde_json::from_str(&raw).map_err(|e| ProviderError::Malformed {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "ollama".to_string(),
            base_url: self.base_url.clone(),
        }
    }
}

fn report(err: &ProviderError, request: &Value, raw: Option<&str>) {
    error!(kind = err.tag(), "generation failed: {err}");
    debug!(request = %request, "request payload");
    if let Some(raw) = raw {
        debug!(response = raw, "raw response");
    }
}
