//! Leichte Sprache simplification against a local Ollama service: the
//! client, the batch processor, charts and the form backend.

pub mod batch;
pub mod charts;
pub mod config;
pub mod provider;
pub mod provider_ollama;
pub mod routes_simplify;
pub mod simplify;
pub mod state;
