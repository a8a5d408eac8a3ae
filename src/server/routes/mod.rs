//! Routes for the interactive page

pub mod page;
pub mod question;
pub mod reports;
pub mod summary;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::Response,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use crate::server::state::AppState;
use crate::session::SESSION_COOKIE;

/// Build the page routes
pub fn page_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(page::show_page))
        .route(
            "/reports",
            post(reports::upload_reports).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/summary", post(summary::generate_summary))
        .route("/question", post(question::answer_question))
        .route("/questions/ask", post(question::ask_suggested))
}

/// Resolve the session ID from the request cookies. Returns the ID and
/// whether it was freshly created.
pub(crate) fn session_id(headers: &HeaderMap) -> (Uuid, bool) {
    let existing = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                if name == SESSION_COOKIE {
                    Uuid::parse_str(value.trim()).ok()
                } else {
                    None
                }
            })
        });

    match existing {
        Some(id) => (id, false),
        None => (Uuid::new_v4(), true),
    }
}

/// Attach the session cookie to a response when the session is new
pub(crate) fn with_session_cookie(mut response: Response, id: Uuid, is_new: bool) -> Response {
    if is_new {
        if let Ok(value) = HeaderValue::from_str(&format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, id
        )) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn missing_cookie_creates_a_fresh_session() {
        let headers = HeaderMap::new();
        let (_, is_new) = session_id(&headers);
        assert!(is_new);
    }

    #[test]
    fn existing_cookie_is_reused() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}={}", SESSION_COOKIE, id)).unwrap(),
        );

        let (resolved, is_new) = session_id(&headers);
        assert_eq!(resolved, id);
        assert!(!is_new);
    }

    #[test]
    fn malformed_cookie_value_creates_a_fresh_session() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{}=not-a-uuid", SESSION_COOKIE)).unwrap(),
        );

        let (_, is_new) = session_id(&headers);
        assert!(is_new);
    }
}
