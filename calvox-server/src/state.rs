//! Shared application state.

use std::sync::Arc;

use calvox_intent::GeminiExtractor;

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub extractor: Arc<GeminiExtractor>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let extractor = GeminiExtractor::new(config.gemini_api_key.clone());
        AppState {
            config: Arc::new(config),
            extractor: Arc::new(extractor),
        }
    }
}
