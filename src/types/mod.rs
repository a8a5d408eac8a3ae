//! Core types for the assistant

pub mod document;
pub mod query;
pub mod response;

pub use document::{Chunk, ChunkSource, Document, ReportType};
pub use query::QuestionRequest;
pub use response::{DocumentSummary, IngestError, IngestResponse};
