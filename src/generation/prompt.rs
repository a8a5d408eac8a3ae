//! Prompt templates for summaries and Q&A

use crate::retrieval::ScoredChunk;
use crate::types::ReportType;

/// Prompt builder for clinical generation
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join retrieved chunks into the context block for a question
    pub fn build_context(results: &[ScoredChunk]) -> String {
        results
            .iter()
            .map(|r| r.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build the structured-summary prompt over the full patient record
    pub fn build_summary_prompt(text: &str, report_type: ReportType) -> String {
        format!(
            r#"You are a clinical summarization expert. The following is a collection of medical reports belonging to a single patient.
Generate a medically structured summary under headings like Diagnosis, Treatment, Vitals, and Follow-up.

Report Type: {report_type}
Patient Record:
{text}
"#,
            report_type = report_type.label(),
            text = text,
        )
    }

    /// Build the question-answering prompt over retrieved EMR context
    pub fn build_qa_prompt(context: &str, question: &str) -> String {
        format!(
            r#"Use the EMR context to answer clinically:

{context}

Question: {question}
"#,
            context = context,
            question = question,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prompt_embeds_report_type_and_record() {
        let prompt =
            PromptBuilder::build_summary_prompt("BP 120/80, all stable.", ReportType::LabResults);
        assert!(prompt.contains("Report Type: Lab Results"));
        assert!(prompt.contains("BP 120/80, all stable."));
    }

    #[test]
    fn qa_prompt_embeds_context_and_question() {
        let prompt = PromptBuilder::build_qa_prompt("Hemoglobin 9.1", "Any signs of anemia?");
        assert!(prompt.contains("Hemoglobin 9.1"));
        assert!(prompt.contains("Question: Any signs of anemia?"));
    }
}
