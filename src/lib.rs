//! medilekh: clinical document assistant with retrieval-augmented summaries and Q&A
//!
//! This crate ingests uploaded PDF medical reports, chunks and embeds their text,
//! indexes the chunks for similarity search, and drives a hosted LLM to produce
//! structured clinical summaries and grounded answers. Everything is exposed
//! through a single server-rendered page with per-session state.

pub mod config;
pub mod embeddings;
pub mod error;
pub mod generation;
pub mod highlight;
pub mod ingestion;
pub mod questions;
pub mod retrieval;
pub mod server;
pub mod session;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, ChunkSource, Document, ReportType},
    response::{DocumentSummary, IngestError, IngestResponse},
};
