//! Suggested clinical questions per report type

use crate::types::ReportType;

/// General-purpose questions appended for every report type
pub const GENERAL_QUESTIONS: &[&str] = &[
    "Summarize diagnosis",
    "List treatments",
    "Vitals summary",
    "Is surgery mentioned?",
    "Chronic illness noted?",
    "Follow-up documented?",
];

/// Type-specific questions offered before the general list
pub fn type_questions(report_type: ReportType) -> &'static [&'static str] {
    match report_type {
        ReportType::GeneralCheckup => &[
            "What are the vitals?",
            "Any lifestyle advice?",
            "Was follow-up suggested?",
        ],
        ReportType::LabResults => &["What tests were abnormal?", "Any signs of infection?"],
        ReportType::RadiologyReport => &["What findings are shown?", "Is surgery recommended?"],
        ReportType::DischargeSummary => &[
            "Final diagnosis?",
            "Medications prescribed?",
            "Follow-up instructions?",
        ],
        ReportType::Other => &[
            "What condition is described?",
            "Any interventions or prescriptions?",
        ],
    }
}

/// Full ordered suggestion list for a report type: the type-specific subset
/// followed by the general-purpose subset.
pub fn suggested_questions(report_type: ReportType) -> Vec<&'static str> {
    let mut questions = type_questions(report_type).to_vec();
    questions.extend_from_slice(GENERAL_QUESTIONS);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_a_nonempty_specific_prefix() {
        for report_type in ReportType::ALL {
            let questions = suggested_questions(report_type);
            let prefix_len = type_questions(report_type).len();
            assert!(prefix_len > 0);
            assert_eq!(questions.len(), prefix_len + GENERAL_QUESTIONS.len());
        }
    }

    #[test]
    fn general_questions_are_a_suffix_for_every_type() {
        for report_type in ReportType::ALL {
            let questions = suggested_questions(report_type);
            let suffix = &questions[questions.len() - GENERAL_QUESTIONS.len()..];
            assert_eq!(suffix, GENERAL_QUESTIONS);
        }
    }

    #[test]
    fn lab_results_list_is_exact() {
        assert_eq!(
            suggested_questions(ReportType::LabResults),
            vec![
                "What tests were abnormal?",
                "Any signs of infection?",
                "Summarize diagnosis",
                "List treatments",
                "Vitals summary",
                "Is surgery mentioned?",
                "Chronic illness noted?",
                "Follow-up documented?",
            ]
        );
    }
}
