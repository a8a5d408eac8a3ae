//! Request types for the page actions

use serde::{Deserialize, Serialize};

/// A clinical question, free-text or picked from the suggested list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    /// The question to answer
    pub question: String,

    /// Number of chunks to retrieve as context (default: 3)
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    3
}

impl QuestionRequest {
    /// Create a new question with default retrieval settings
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            top_k: default_top_k(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_body_without_top_k_uses_the_default() {
        let request: QuestionRequest =
            serde_json::from_str(r#"{"question": "Any signs of infection?"}"#).unwrap();
        assert_eq!(request.top_k, 3);
        assert_eq!(request.question, "Any signs of infection?");
        assert_eq!(QuestionRequest::new("x").top_k, request.top_k);
    }
}
