//! Application state for the assistant server

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::embeddings::{EmbeddingProvider, OllamaEmbedder};
use crate::error::Result;
use crate::generation::{GeminiClient, LlmProvider};
use crate::session::SessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Embedding provider
    embedder: Arc<dyn EmbeddingProvider>,
    /// LLM provider for summaries and answers
    llm: Arc<dyn LlmProvider>,
    /// Per-browser sessions
    sessions: SessionStore,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state
    pub async fn new(config: AppConfig) -> Result<Self> {
        tracing::info!("Initializing assistant state...");

        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(OllamaEmbedder::new(&config.embeddings));
        tracing::info!(
            "Embedding client initialized ({}, {} dims)",
            config.embeddings.model,
            config.embeddings.dimensions
        );

        let llm: Arc<dyn LlmProvider> = Arc::new(GeminiClient::new(&config.llm));
        tracing::info!("LLM client initialized ({})", config.llm.model);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                embedder,
                llm,
                sessions: SessionStore::new(),
                ready: RwLock::new(true),
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get embedding provider
    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.embedder
    }

    /// Get LLM provider
    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.inner.llm
    }

    /// Get session store
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}
