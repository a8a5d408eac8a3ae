//! Question answering endpoints

use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::server::state::AppState;
use crate::session::Session;
use crate::types::QuestionRequest;

use super::page::{render_page, AskedQuestion};
use super::{session_id, with_session_cookie};

/// POST /question - Answer the free-text question and keep it in the session
pub async fn answer_question(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(request): Form<QuestionRequest>,
) -> Result<Response> {
    let (id, is_new) = session_id(&headers);
    let question = request.question.trim().to_string();

    if question.is_empty() {
        let response = Redirect::to("/").into_response();
        return Ok(with_session_cookie(response, id, is_new));
    }

    let session = state
        .sessions()
        .snapshot(&id)
        .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;

    let answer = answer_over_session(&state, &session, &question, request.top_k).await?;

    state.sessions().update(&id, |s| {
        s.question = question;
        s.answer = answer;
    });

    let response = Redirect::to("/").into_response();
    Ok(with_session_cookie(response, id, is_new))
}

/// POST /questions/ask - Answer a suggested question and render it
/// transiently, without storing it in the session
pub async fn ask_suggested(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(request): Form<QuestionRequest>,
) -> Result<Response> {
    let (id, is_new) = session_id(&headers);
    let question = request.question.trim().to_string();

    let session = state
        .sessions()
        .snapshot(&id)
        .ok_or_else(|| Error::SessionNotFound(id.to_string()))?;

    if question.is_empty() {
        let response = Html(render_page(&session, None)).into_response();
        return Ok(with_session_cookie(response, id, is_new));
    }

    let answer = answer_over_session(&state, &session, &question, request.top_k).await?;

    let asked = AskedQuestion { question, answer };
    let response = Html(render_page(&session, Some(&asked))).into_response();
    Ok(with_session_cookie(response, id, is_new))
}

/// Retrieve top-k context for the question and generate an answer
async fn answer_over_session(
    state: &AppState,
    session: &Session,
    question: &str,
    top_k: usize,
) -> Result<String> {
    let index = session.index.as_ref().ok_or(Error::NoReports)?;

    let query_embedding = state.embedder().embed(question).await?;
    let results = index.search(&query_embedding, top_k)?;
    let context = PromptBuilder::build_context(&results);

    tracing::info!(
        "Answering \"{}\" with {} context chunk(s)",
        question,
        results.len()
    );

    let prompt = PromptBuilder::build_qa_prompt(&context, question);
    state.llm().generate(&prompt).await
}
