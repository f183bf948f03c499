use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::provider::LLMProvider;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: AppConfig,
    pub provider: Box<dyn LLMProvider>,
    /// Serializes appends to the flag log.
    pub flag_lock: Mutex<()>,
}

impl AppState {
    pub fn new(config: AppConfig, provider: Box<dyn LLMProvider>) -> Self {
        Self {
            config,
            provider,
            flag_lock: Mutex::new(()),
        }
    }
}
