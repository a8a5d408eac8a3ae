//! Server-rendered interactive page

use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};

use crate::highlight::escape_html;
use crate::questions::suggested_questions;
use crate::server::state::AppState;
use crate::session::Session;
use crate::types::ReportType;

use super::{session_id, with_session_cookie};

/// A question answered on this request only; rendered but not stored
pub struct AskedQuestion {
    pub question: String,
    pub answer: String,
}

/// GET / - Render the page from the session
pub async fn show_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, is_new) = session_id(&headers);
    let session = state.sessions().snapshot_or_create(id);
    let response = Html(render_page(&session, None)).into_response();
    with_session_cookie(response, id, is_new)
}

/// Render the full page
pub fn render_page(session: &Session, asked: Option<&AskedQuestion>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>MediLekh - Clinical Assistant</title>
<style>
body { font-family: sans-serif; max-width: 860px; margin: 2em auto; padding: 0 1em; color: #222; }
h1 { font-size: 1.6em; }
h2 { font-size: 1.2em; margin-top: 1.6em; }
form.inline { display: inline; }
label { display: block; margin-top: 0.8em; font-weight: bold; }
input[type=text], input[type=date], textarea, select { width: 100%; padding: 4px; margin-top: 2px; }
button { margin-top: 0.8em; padding: 6px 14px; }
.preview { border: 1px solid #ccc; padding: 10px; white-space: pre-wrap; }
.answer { background: #f7f7f7; border-left: 3px solid #888; padding: 8px 12px; white-space: pre-wrap; }
.errors { color: #a00; }
.suggested button { display: block; width: 100%; text-align: left; margin-top: 4px; }
hr { margin: 1.6em 0; }
</style>
</head>
<body>
<h1>MediLekh: Medical Assistant</h1>
"#,
    );

    render_upload_form(&mut html, session);

    if session.has_reports() {
        render_preview(&mut html, session);
        render_summary_section(&mut html, session);

        if !session.summary.is_empty() {
            render_question_section(&mut html, session);
            render_suggested_section(&mut html, session, asked);
            render_session_summary(&mut html, session);
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_upload_form(html: &mut String, session: &Session) {
    let date_value = session
        .report_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    html.push_str(
        r#"<form action="/reports" method="post" enctype="multipart/form-data">
<label for="date">Session Date</label>
"#,
    );
    html.push_str(&format!(
        "<input type=\"date\" id=\"date\" name=\"date\" value=\"{}\">\n",
        escape_html(&date_value)
    ));

    html.push_str("<label for=\"report_type\">Report Type</label>\n<select id=\"report_type\" name=\"report_type\">\n");
    for report_type in ReportType::ALL {
        let selected = if report_type == session.report_type {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{label}\"{selected}>{label}</option>\n",
            label = report_type.label(),
            selected = selected
        ));
    }
    html.push_str("</select>\n");

    html.push_str("<label for=\"notes\">Session Notes</label>\n");
    html.push_str(&format!(
        "<textarea id=\"notes\" name=\"notes\" rows=\"3\">{}</textarea>\n",
        escape_html(&session.notes)
    ));

    html.push_str(
        r#"<label for="reports">Upload Medical PDFs</label>
<input type="file" id="reports" name="reports" accept=".pdf" multiple>
<button type="submit">Process Reports</button>
</form>
"#,
    );

    if !session.ingest_errors.is_empty() {
        html.push_str("<div class=\"errors\"><p>Some files could not be processed:</p><ul>\n");
        for error in &session.ingest_errors {
            html.push_str(&format!(
                "<li>{}: {}</li>\n",
                escape_html(&error.filename),
                escape_html(&error.error)
            ));
        }
        html.push_str("</ul></div>\n");
    }
}

fn render_preview(html: &mut String, session: &Session) {
    html.push_str("<h2>Report Preview</h2>\n<div class=\"preview\">");
    // preview_html is highlighter output; already escaped and marked up
    html.push_str(&session.preview_html);
    html.push_str("</div>\n");
}

fn render_summary_section(html: &mut String, session: &Session) {
    html.push_str(
        r#"<form action="/summary" method="post">
<button type="submit">Generate Medical Summary</button>
</form>
"#,
    );

    if !session.summary.is_empty() {
        html.push_str("<h2>Clinical Summary</h2>\n<div class=\"answer\">");
        html.push_str(&escape_html(&session.summary));
        html.push_str("</div>\n");
    }
}

fn render_question_section(html: &mut String, session: &Session) {
    html.push_str("<hr>\n<h2>Ask a Question</h2>\n");
    html.push_str(&format!(
        r#"<form action="/question" method="post">
<input type="text" name="question" value="{}" placeholder="Ask a clinical question">
<button type="submit">Get Answer</button>
</form>
"#,
        escape_html(&session.question)
    ));

    if !session.answer.is_empty() {
        html.push_str(&format!(
            "<p><b>Q:</b> {}</p>\n<div class=\"answer\"><b>A:</b> {}</div>\n",
            escape_html(&session.question),
            escape_html(&session.answer)
        ));
    }
}

fn render_suggested_section(html: &mut String, session: &Session, asked: Option<&AskedQuestion>) {
    html.push_str("<hr>\n<h2>Recommended Clinical Questions</h2>\n<div class=\"suggested\">\n");
    for question in suggested_questions(session.report_type) {
        html.push_str(&format!(
            r#"<form class="inline" action="/questions/ask" method="post">
<input type="hidden" name="question" value="{question}">
<button type="submit">{question}</button>
</form>
"#,
            question = escape_html(question)
        ));
    }
    html.push_str("</div>\n");

    if let Some(asked) = asked {
        html.push_str(&format!(
            "<p><b>Q:</b> {}</p>\n<div class=\"answer\"><b>A:</b> {}</div>\n<hr>\n",
            escape_html(&asked.question),
            escape_html(&asked.answer)
        ));
    }
}

fn render_session_summary(html: &mut String, session: &Session) {
    let date = session
        .report_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let notes = if session.notes.is_empty() {
        "N/A"
    } else {
        session.notes.as_str()
    };

    html.push_str("<h2>Session Summary</h2>\n<ul>\n");
    html.push_str(&format!("<li><b>Date</b>: {}</li>\n", escape_html(&date)));
    html.push_str(&format!("<li><b>Files</b>: {}</li>\n", session.documents.len()));
    html.push_str(&format!(
        "<li><b>Type</b>: {}</li>\n",
        session.report_type.label()
    ));
    html.push_str(&format!("<li><b>Notes</b>: {}</li>\n", escape_html(notes)));
    html.push_str("</ul>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentSummary;
    use uuid::Uuid;

    fn session_with_report() -> Session {
        let mut session = Session::new(Uuid::new_v4());
        session.documents.push(DocumentSummary {
            id: Uuid::new_v4(),
            filename: "visit.pdf".to_string(),
            total_pages: Some(2),
            total_chunks: 4,
            file_size: 1024,
            ingested_at: chrono::Utc::now(),
        });
        session.preview_html = "Patient stable".to_string();
        session
    }

    #[test]
    fn empty_session_renders_only_the_upload_form() {
        let session = Session::new(Uuid::new_v4());
        let html = render_page(&session, None);
        assert!(html.contains("Upload Medical PDFs"));
        assert!(!html.contains("Report Preview"));
        assert!(!html.contains("Session Summary"));
    }

    #[test]
    fn suggested_questions_appear_once_a_summary_exists() {
        let mut session = session_with_report();
        session.summary = "Diagnosis: stable.".to_string();

        let html = render_page(&session, None);
        assert!(html.contains("Recommended Clinical Questions"));
        assert!(html.contains("Summarize diagnosis"));
        assert!(html.contains("Session Summary"));
    }

    #[test]
    fn user_text_is_escaped() {
        let mut session = session_with_report();
        session.summary = "ok".to_string();
        session.notes = "<script>alert(1)</script>".to_string();

        let html = render_page(&session, None);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn transient_answer_is_rendered() {
        let mut session = session_with_report();
        session.summary = "ok".to_string();

        let asked = AskedQuestion {
            question: "Any signs of infection?".to_string(),
            answer: "No signs of infection are documented.".to_string(),
        };
        let html = render_page(&session, Some(&asked));
        assert!(html.contains("No signs of infection are documented."));
    }
}
