//! Fixed-window text chunking with overlap

use crate::types::{Chunk, ChunkSource, Document};

use super::parser::ParsedReport;

/// Text chunker producing windows of at most `chunk_size` characters where
/// each window after the first begins with the last `overlap` characters of
/// its predecessor.
pub struct TextChunker {
    /// Maximum chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker. An overlap at or above the chunk size is
    /// clamped so the window always advances.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            overlap: overlap.min(chunk_size - 1),
        }
    }

    /// Split text into overlapping chunks. Empty input yields an empty
    /// sequence. Windows are measured in characters and never split a UTF-8
    /// scalar.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.windows(text)
            .into_iter()
            .map(|(start, end)| text[start..end].to_string())
            .collect()
    }

    /// Chunk a parsed report into indexed chunks with source metadata
    pub fn chunk_report(&self, doc: &Document, parsed: &ParsedReport) -> Vec<Chunk> {
        let boundaries = char_boundaries(&parsed.content);
        let source = ChunkSource {
            filename: doc.filename.clone(),
            page_count: parsed.total_pages,
        };

        self.windows(&parsed.content)
            .into_iter()
            .enumerate()
            .map(|(i, (start, end))| {
                // byte offsets back to character positions for the record
                let char_start = boundaries.binary_search(&start).unwrap_or(0);
                let char_end = boundaries.binary_search(&end).unwrap_or(boundaries.len() - 1);
                Chunk::new(
                    doc.id,
                    parsed.content[start..end].to_string(),
                    source.clone(),
                    char_start,
                    char_end,
                    i as u32,
                )
            })
            .collect()
    }

    /// Compute window byte ranges over the text
    fn windows(&self, text: &str) -> Vec<(usize, usize)> {
        if text.is_empty() {
            return Vec::new();
        }

        let boundaries = char_boundaries(text);
        let char_count = boundaries.len() - 1;
        let step = self.chunk_size - self.overlap;

        let mut ranges = Vec::new();
        let mut start = 0usize;
        loop {
            let end = (start + self.chunk_size).min(char_count);
            ranges.push((boundaries[start], boundaries[end]));
            if end == char_count {
                break;
            }
            start += step;
        }
        ranges
    }
}

/// Byte offsets of every character boundary, including the end of the text
fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_chunks() {
        let chunker = TextChunker::new(500, 50);
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn short_input_yields_one_chunk() {
        let chunker = TextChunker::new(500, 50);
        let chunks = chunker.chunk("short text");
        assert_eq!(chunks, vec!["short text".to_string()]);
    }

    #[test]
    fn twelve_hundred_chars_with_500_50_yield_three_chunks() {
        let text: String = (0..1200).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunker = TextChunker::new(500, 50);
        let chunks = chunker.chunk(&text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 500);
        assert_eq!(chunks[1].chars().count(), 500);
        assert_eq!(chunks[2].chars().count(), 300);

        // Each chunk after the first begins with the last 50 characters of
        // its predecessor.
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().skip(pair[0].chars().count() - 50).collect();
            assert!(pair[1].starts_with(&tail));
        }
    }

    #[test]
    fn no_chunk_exceeds_the_maximum() {
        let text = "x".repeat(3210);
        let chunker = TextChunker::new(500, 50);
        for chunk in chunker.chunk(&text) {
            assert!(chunk.chars().count() <= 500);
        }
    }

    #[test]
    fn reassembly_with_overlap_removed_reproduces_input() {
        let text: String = "All vitals stable. Continue current medication plan. "
            .repeat(40);
        let chunker = TextChunker::new(500, 50);
        let chunks = chunker.chunk(&text);

        let mut rebuilt: String = chunks[0].clone();
        for chunk in &chunks[1..] {
            rebuilt.extend(chunk.chars().skip(50));
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn multibyte_text_never_splits_a_scalar() {
        let text = "β-blocker dosage: 5µg twice daily — reassess. ".repeat(30);
        let chunker = TextChunker::new(100, 20);
        let chunks = chunker.chunk(&text);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 100);
        }
    }

    #[test]
    fn overlap_at_or_above_chunk_size_is_clamped() {
        let chunker = TextChunker::new(10, 10);
        let chunks = chunker.chunk(&"y".repeat(35));
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.len() <= 10));
    }
}
