//! Assistant server binary
//!
//! Run with: cargo run --bin medilekh-server

use medilekh::{config::AppConfig, server::AssistantServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medilekh=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
=====================================================
  MediLekh - Clinical Document Assistant
  PDF report ingestion, summaries and grounded Q&A
=====================================================
"#
    );

    // Load configuration (medilekh.toml in the working directory, if present)
    let config = AppConfig::load("medilekh.toml")?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - Embedding dimensions: {}", config.embeddings.dimensions);
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!(
        "  - Chunking: {} chars, {} overlap",
        config.chunking.chunk_size,
        config.chunking.chunk_overlap
    );

    // Check the embedding service
    tracing::info!("Checking Ollama at {}...", config.embeddings.base_url);
    let client = reqwest::Client::new();
    match client
        .get(format!("{}/api/tags", config.embeddings.base_url))
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => {
            tracing::info!("Ollama is running");
        }
        _ => {
            tracing::warn!("Ollama not available at {}", config.embeddings.base_url);
            tracing::warn!("Report uploads will fail until it is started:");
            tracing::warn!("  1. Start: ollama serve");
            tracing::warn!("  2. Pull the embedding model: ollama pull {}", config.embeddings.model);
        }
    }

    if config.llm.api_key.as_deref().unwrap_or("").is_empty() {
        tracing::warn!("No Gemini API key configured (set GEMINI_API_KEY)");
        tracing::warn!("Summary and Q&A generation will fail until one is provided");
    }

    // Create and start server
    let server = AssistantServer::new(config).await?;

    println!("\nServer starting...");
    println!("  Page:   http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
