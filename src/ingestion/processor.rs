//! Ingestion pipeline orchestration

use crate::error::Result;
use crate::types::{Chunk, Document};

use super::chunker::TextChunker;
use super::parser::{ParsedReport, PdfParser};

/// Main ingestion pipeline: parse a PDF, then chunk its text
pub struct IngestPipeline {
    chunker: TextChunker,
}

impl IngestPipeline {
    /// Create a new ingestion pipeline
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunker: TextChunker::new(chunk_size, chunk_overlap),
        }
    }

    /// Parse a PDF file
    pub fn parse_file(&self, filename: &str, data: &[u8]) -> Result<ParsedReport> {
        PdfParser::parse(filename, data)
    }

    /// Full ingestion: parse + chunk
    pub fn ingest(&self, filename: &str, data: &[u8]) -> Result<(Document, Vec<Chunk>, ParsedReport)> {
        let parsed = self.parse_file(filename, data)?;

        let mut doc = Document::new(
            filename.to_string(),
            parsed.content_hash.clone(),
            data.len() as u64,
        );
        doc.total_pages = parsed.total_pages;

        let chunks = self.chunker.chunk_report(&doc, &parsed);
        doc.total_chunks = chunks.len() as u32;

        Ok((doc, chunks, parsed))
    }
}

impl Default for IngestPipeline {
    fn default() -> Self {
        Self::new(500, 50)
    }
}
