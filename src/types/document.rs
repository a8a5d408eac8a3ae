//! Report, document and chunk types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of medical report being uploaded. Drives the prompt template and the
/// suggested-question list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReportType {
    #[serde(rename = "General Checkup")]
    GeneralCheckup,
    #[serde(rename = "Lab Results")]
    LabResults,
    #[serde(rename = "Radiology Report")]
    RadiologyReport,
    #[serde(rename = "Discharge Summary")]
    DischargeSummary,
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl ReportType {
    /// All report types, in the order the page offers them
    pub const ALL: [ReportType; 5] = [
        Self::GeneralCheckup,
        Self::LabResults,
        Self::RadiologyReport,
        Self::DischargeSummary,
        Self::Other,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::GeneralCheckup => "General Checkup",
            Self::LabResults => "Lab Results",
            Self::RadiologyReport => "Radiology Report",
            Self::DischargeSummary => "Discharge Summary",
            Self::Other => "Other",
        }
    }

    /// Parse from a display label. Unrecognized labels fall back to `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "General Checkup" => Self::GeneralCheckup,
            "Lab Results" => Self::LabResults,
            "Radiology Report" => Self::RadiologyReport,
            "Discharge Summary" => Self::DischargeSummary,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A PDF report that has been ingested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID
    pub id: Uuid,
    /// Original filename as uploaded
    pub filename: String,
    /// Content hash of the extracted text
    pub content_hash: String,
    /// Total number of pages, if the PDF reported one
    pub total_pages: Option<u32>,
    /// Total number of chunks created
    pub total_chunks: u32,
    /// File size in bytes
    pub file_size: u64,
    /// Ingestion timestamp
    pub ingested_at: chrono::DateTime<chrono::Utc>,
}

impl Document {
    /// Create a new document record
    pub fn new(filename: String, content_hash: String, file_size: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename,
            content_hash,
            total_pages: None,
            total_chunks: 0,
            file_size,
            ingested_at: chrono::Utc::now(),
        }
    }
}

/// Source information for a chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkSource {
    /// Filename the chunk came from
    pub filename: String,
    /// Total pages in the source PDF
    pub page_count: Option<u32>,
}

/// A chunk of text from a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Parent document ID
    pub document_id: Uuid,
    /// Text content
    pub content: String,
    /// Embedding vector
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embedding: Vec<f32>,
    /// Source information
    pub source: ChunkSource,
    /// Character position in the extracted document text
    pub char_start: usize,
    pub char_end: usize,
    /// Chunk index within the document
    pub chunk_index: u32,
}

impl Chunk {
    /// Create a new chunk without an embedding
    pub fn new(
        document_id: Uuid,
        content: String,
        source: ChunkSource,
        char_start: usize,
        char_end: usize,
        chunk_index: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            content,
            embedding: Vec::new(),
            source,
            char_start,
            char_end,
            chunk_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_type_label_round_trip() {
        for report_type in ReportType::ALL {
            assert_eq!(ReportType::from_label(report_type.label()), report_type);
        }
    }

    #[test]
    fn unknown_label_falls_back_to_other() {
        assert_eq!(ReportType::from_label("Pathology"), ReportType::Other);
        assert_eq!(ReportType::from_label(""), ReportType::Other);
    }
}
