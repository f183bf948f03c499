use std::path::PathBuf;

use anyhow::{bail, Result};

/// Model ids offered for selection; the first is the default.
pub const LLM_CHOICES: &[&str] = &[
    "llama3.1-leichte-sprache:fs",
    "llama3.1-leichte-sprache-ft:latest",
    "kisz/llama3.1-leichte-sprache-ft:latest",
    "llama3.1-leichte-sprache:basic",
    "llama3.2-leichte-sprache:fs",
    "llama3.2-leichte-sprache-ft:latest",
    "kisz/llama3.2-leichte-sprache-ft:latest",
    "llama3.2-leichte-sprache:basic",
];

/// Sampling options forwarded to the generation endpoint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DecodingParams {
    pub top_k: u32,
    pub top_p: f32,
    pub temperature: f32,
}

impl Default for DecodingParams {
    fn default() -> Self {
        Self {
            top_k: 2,
            top_p: 0.9,
            temperature: 0.2,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub ollama_host: String,
    pub default_model: String,
    pub model_choices: Vec<String>,
    pub decoding: DecodingParams,
    pub use_rules: bool,
    pub serve_addr: String,
    pub export_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F: Fn(&str) -> Option<String>>(var: F) -> Result<Self> {
        let ollama_host = var("OLLAMA_HOST").unwrap_or_else(|| "http://localhost:11434".to_string());
        let model_choices: Vec<String> = LLM_CHOICES.iter().map(|s| s.to_string()).collect();
        let default_model = var("OLLAMA_MODEL").unwrap_or_else(|| model_choices[0].clone());
        let serve_addr = var("SERVE_ADDR").unwrap_or_else(|| "127.0.0.1:7860".to_string());
        let export_path = PathBuf::from(var("EXPORT_PATH").unwrap_or_else(|| "exports".to_string()));

        if !ollama_host.starts_with("http://") && !ollama_host.starts_with("https://") {
            bail!("OLLAMA_HOST must start with http:// or https://");
        }
        if default_model.trim().is_empty() {
            bail!("OLLAMA_MODEL must not be empty");
        }

        Ok(Self {
            ollama_host,
            default_model,
            model_choices,
            decoding: DecodingParams::default(),
            use_rules: false,
            serve_addr,
            export_path,
        })
    }

    /// `{host}/api`, the prefix of every endpoint the client calls.
    pub fn api_base(&self) -> String {
        format!("{}/api", self.ollama_host.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_vars(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = cfg(&[]).unwrap();
        assert_eq!(c.api_base(), "http://localhost:11434/api");
        assert_eq!(c.default_model, LLM_CHOICES[0]);
        assert_eq!(c.decoding, DecodingParams { top_k: 2, top_p: 0.9, temperature: 0.2 });
        assert!(!c.use_rules);
    }

    #[test]
    fn test_overrides() {
        let c = cfg(&[("OLLAMA_HOST", "http://gpu-box:11434/"), ("OLLAMA_MODEL", "llama3.1:latest")]).unwrap();
        assert_eq!(c.api_base(), "http://gpu-box:11434/api");
        assert_eq!(c.default_model, "llama3.1:latest");
    }

    #[test]
    fn test_rejects_host_without_scheme() {
        assert!(cfg(&[("OLLAMA_HOST", "localhost:11434")]).is_err());
    }
}
