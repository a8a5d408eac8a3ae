//! Summary and answer generation via a hosted LLM

mod gemini;
mod prompt;

pub use gemini::GeminiClient;
pub use prompt::PromptBuilder;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM-based text generation
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a prompt to the model and return its textual response verbatim
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is configured and reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model being used
    fn model(&self) -> &str;
}
