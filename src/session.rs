//! Per-session state
//!
//! Each browser session owns one `Session` value keyed by a cookie UUID. The
//! session is the only state shared across requests; it carries the ingested
//! reports, the chunk index, and the current summary/question/answer.

use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::retrieval::ChunkIndex;
use crate::types::{DocumentSummary, IngestError, ReportType};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "medilekh_session";

/// Per-session request-scoped state
#[derive(Clone, Default)]
pub struct Session {
    /// Session ID (cookie value)
    pub id: Uuid,
    /// Session date as entered on the page
    pub report_date: Option<NaiveDate>,
    /// Selected report type
    pub report_type: ReportType,
    /// Free-text session notes
    pub notes: String,
    /// Reports ingested in this session
    pub documents: Vec<DocumentSummary>,
    /// Per-file errors from the last upload
    pub ingest_errors: Vec<IngestError>,
    /// Concatenated extracted text, in upload order
    pub full_text: String,
    /// Highlighted preview markup
    pub preview_html: String,
    /// Chunk index over the current upload set; replaced wholesale on every
    /// upload
    pub index: Option<Arc<ChunkIndex>>,
    /// Current generated summary
    pub summary: String,
    /// Current free-text question
    pub question: String,
    /// Current free-text answer
    pub answer: String,
}

impl Session {
    /// Create an empty session with the given ID
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Whether any reports have been ingested
    pub fn has_reports(&self) -> bool {
        !self.documents.is_empty()
    }
}

/// Concurrent session registry
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, Session>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a session by ID
    pub fn snapshot(&self, id: &Uuid) -> Option<Session> {
        self.sessions.get(id).map(|s| s.clone())
    }

    /// Snapshot a session, creating it first if missing
    pub fn snapshot_or_create(&self, id: Uuid) -> Session {
        self.sessions
            .entry(id)
            .or_insert_with(|| Session::new(id))
            .clone()
    }

    /// Replace a session wholesale
    pub fn upsert(&self, session: Session) {
        self.sessions.insert(session.id, session);
    }

    /// Apply a mutation to a session if it exists. Returns false when the
    /// session is unknown.
    pub fn update<F>(&self, id: &Uuid, f: F) -> bool
    where
        F: FnOnce(&mut Session),
    {
        match self.sessions.get_mut(id) {
            Some(mut session) => {
                f(&mut session);
                true
            }
            None => false,
        }
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_or_create_is_idempotent() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();

        let first = store.snapshot_or_create(id);
        assert_eq!(first.id, id);
        assert!(!first.has_reports());

        store.update(&id, |s| s.notes = "fasting labs".to_string());
        let second = store.snapshot_or_create(id);
        assert_eq!(second.notes, "fasting labs");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_on_unknown_session_is_a_noop() {
        let store = SessionStore::new();
        assert!(!store.update(&Uuid::new_v4(), |s| s.summary = "x".to_string()));
        assert!(store.is_empty());
    }

    #[test]
    fn upsert_replaces_session_state() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        store.snapshot_or_create(id);

        let mut replacement = Session::new(id);
        replacement.summary = "Stable, discharge tomorrow.".to_string();
        store.upsert(replacement);

        assert_eq!(
            store.snapshot(&id).unwrap().summary,
            "Stable, discharge tomorrow."
        );
    }
}
