//! Summary generation endpoint

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};

use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::server::state::AppState;

use super::{session_id, with_session_cookie};

/// POST /summary - Generate the structured clinical summary over the full
/// patient record
pub async fn generate_summary(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response> {
    let (id, is_new) = session_id(&headers);
    let session = state
        .sessions()
        .snapshot(&id)
        .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;

    if !session.has_reports() {
        return Err(Error::NoReports);
    }

    let prompt = PromptBuilder::build_summary_prompt(&session.full_text, session.report_type);
    let summary = state.llm().generate(&prompt).await?;

    tracing::info!("Generated summary ({} chars)", summary.len());

    state.sessions().update(&id, |s| s.summary = summary);

    let response = Redirect::to("/").into_response();
    Ok(with_session_cookie(response, id, is_new))
}
