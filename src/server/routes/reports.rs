//! Report upload and ingestion endpoint

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::highlight;
use crate::ingestion::IngestPipeline;
use crate::retrieval::ChunkIndex;
use crate::server::state::AppState;
use crate::types::{
    response::{DocumentSummary, IngestError, IngestResponse},
    Chunk, ReportType,
};

use super::{session_id, with_session_cookie};

/// POST /reports - Upload and process PDF report files
pub async fn upload_reports(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response> {
    let start = Instant::now();
    let (id, is_new) = session_id(&headers);
    let config = state.config();

    let pipeline = IngestPipeline::new(config.chunking.chunk_size, config.chunking.chunk_overlap);

    let mut report_date: Option<NaiveDate> = None;
    let mut report_type = ReportType::Other;
    let mut notes = String::new();

    let mut documents: Vec<DocumentSummary> = Vec::new();
    let mut errors: Vec<IngestError> = Vec::new();
    let mut all_chunks: Vec<Chunk> = Vec::new();
    let mut full_text = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Internal(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "date" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| Error::Internal(format!("Failed to read date: {}", e)))?;
                report_date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok();
            }
            "report_type" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| Error::Internal(format!("Failed to read report type: {}", e)))?;
                report_type = ReportType::from_label(&value);
            }
            "notes" => {
                notes = field
                    .text()
                    .await
                    .map_err(|e| Error::Internal(format!("Failed to read notes: {}", e)))?;
            }
            _ => {
                let Some(filename) = field.file_name().map(|s| s.to_string()) else {
                    continue;
                };
                if filename.is_empty() {
                    continue;
                }

                let data = match field.bytes().await {
                    Ok(d) => d,
                    Err(e) => {
                        errors.push(IngestError {
                            filename,
                            error: format!("Failed to read file: {}", e),
                        });
                        continue;
                    }
                };

                tracing::info!("Processing report: {} ({} bytes)", filename, data.len());

                match pipeline.ingest(&filename, &data) {
                    Ok((doc, chunks, parsed)) => {
                        full_text.push_str(&parsed.content);
                        full_text.push('\n');
                        all_chunks.extend(chunks);
                        documents.push(DocumentSummary::from(&doc));
                    }
                    Err(e) => {
                        tracing::error!("Failed to process {}: {}", filename, e);
                        errors.push(IngestError {
                            filename,
                            error: e.to_string(),
                        });
                    }
                }
            }
        }
    }

    // Nothing uploaded: still record the form fields
    if documents.is_empty() && errors.is_empty() {
        let mut session = state.sessions().snapshot_or_create(id);
        session.report_date = report_date;
        session.report_type = report_type;
        session.notes = notes;
        state.sessions().upsert(session);
        let response = Redirect::to("/").into_response();
        return Ok(with_session_cookie(response, id, is_new));
    }

    // Embed every chunk and rebuild the index from scratch
    let index = if documents.is_empty() {
        None
    } else {
        let texts: Vec<String> = all_chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = state.embedder().embed_batch(&texts).await?;
        for (chunk, embedding) in all_chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        let index = ChunkIndex::build(
            all_chunks,
            state.embedder().dimensions(),
            &config.retrieval,
        )?;
        Some(Arc::new(index))
    };

    let preview_html = highlight::highlight(&truncate_chars(
        &full_text,
        config.server.preview_chars,
    ));

    let outcome = IngestResponse {
        success: !documents.is_empty(),
        total_chunks_created: documents.iter().map(|d| d.total_chunks).sum(),
        processing_time_ms: start.elapsed().as_millis() as u64,
        documents,
        errors,
    };

    tracing::info!(
        "Ingested {} report(s), {} chunks in {}ms ({} error(s))",
        outcome.documents.len(),
        outcome.total_chunks_created,
        outcome.processing_time_ms,
        outcome.errors.len()
    );

    let mut session = state.sessions().snapshot_or_create(id);
    session.report_date = report_date;
    session.report_type = report_type;
    session.notes = notes;
    session.documents = outcome.documents;
    session.ingest_errors = outcome.errors;
    session.full_text = full_text;
    session.preview_html = preview_html;
    session.index = index;
    state.sessions().upsert(session);

    let response = Redirect::to("/").into_response();
    Ok(with_session_cookie(response, id, is_new))
}

/// Truncate to at most `max_chars` characters on a character boundary
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
        assert_eq!(truncate_chars("ab", 4), "ab");
        assert_eq!(truncate_chars("αβγδε", 3), "αβγ");
    }
}
