//! Report ingestion pipeline: PDF text extraction and chunking

mod chunker;
mod parser;
mod processor;

pub use chunker::TextChunker;
pub use parser::{ParsedReport, PdfParser};
pub use processor::IngestPipeline;
