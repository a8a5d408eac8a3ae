//! Clinical keyword highlighting
//!
//! Scans report text for a fixed table of clinical terms and wraps every
//! case-insensitive whole-word match in a colored markup span. All match
//! spans are computed against the original text first, overlaps are resolved
//! leftmost-longest (ties by category table order), then a single
//! substitution pass emits the markup. Running the highlighter over its own
//! output is not guaranteed to be idempotent and is not supported.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Clinical term category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    Diagnosis,
    Treatment,
    Vitals,
    Medications,
    Procedures,
    Allergies,
    LabFindings,
    Administrative,
}

impl Category {
    /// All categories, in priority order for overlap resolution
    pub const ALL: [Category; 8] = [
        Self::Diagnosis,
        Self::Treatment,
        Self::Vitals,
        Self::Medications,
        Self::Procedures,
        Self::Allergies,
        Self::LabFindings,
        Self::Administrative,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Diagnosis => "Diagnosis",
            Self::Treatment => "Treatment",
            Self::Vitals => "Vitals",
            Self::Medications => "Medications",
            Self::Procedures => "Procedures",
            Self::Allergies => "Allergies",
            Self::LabFindings => "Lab Findings",
            Self::Administrative => "Administrative",
        }
    }

    /// Background color used in the preview markup
    pub fn color(&self) -> &'static str {
        match self {
            Self::Diagnosis => "#FFD6E0",
            Self::Treatment => "#D6F5D6",
            Self::Vitals => "#FFFACD",
            Self::Medications => "#E0FFFF",
            Self::Procedures => "#D8BFD8",
            Self::Allergies => "#FFC0CB",
            Self::LabFindings => "#F0E68C",
            Self::Administrative => "#E6E6FA",
        }
    }

    /// Terms highlighted for this category
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Diagnosis => &[
                "diabetes",
                "pneumonia",
                "stroke",
                "infection",
                "hypertension",
                "asthma",
            ],
            Self::Treatment => &[
                "tablet",
                "therapy",
                "medication",
                "injection",
                "antibiotic",
                "chemotherapy",
            ],
            Self::Vitals => &[
                "blood pressure",
                "temperature",
                "oxygen",
                "heart rate",
                "respiration",
            ],
            Self::Medications => &["metformin", "insulin", "paracetamol", "atorvastatin"],
            Self::Procedures => &["ECG", "MRI", "CT scan", "colonoscopy", "surgery"],
            Self::Allergies => &["penicillin", "NSAIDs", "shellfish", "latex"],
            Self::LabFindings => &["hemoglobin", "creatinine", "glucose", "WBC", "platelets"],
            Self::Administrative => &[
                "admission",
                "discharge",
                "follow-up",
                "ward",
                "insurance",
            ],
        }
    }
}

/// One whole-word keyword pattern per category, case-insensitive
static CATEGORY_PATTERNS: Lazy<Vec<(Category, Regex)>> = Lazy::new(|| {
    Category::ALL
        .iter()
        .map(|&category| {
            let alternation = category
                .keywords()
                .iter()
                .map(|term| regex::escape(term))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
                .case_insensitive(true)
                .build()
                .expect("keyword table produces a valid pattern");
            (category, pattern)
        })
        .collect()
});

/// A keyword occurrence in the original text
#[derive(Debug, Clone, Copy)]
struct TermMatch {
    start: usize,
    end: usize,
    category: Category,
    priority: usize,
}

/// Wrap every whole-word keyword occurrence in a colored span.
///
/// Non-keyword text is HTML-escaped so raw report text renders safely.
pub fn highlight(text: &str) -> String {
    let mut matches = Vec::new();
    for (priority, (category, pattern)) in CATEGORY_PATTERNS.iter().enumerate() {
        for m in pattern.find_iter(text) {
            matches.push(TermMatch {
                start: m.start(),
                end: m.end(),
                category: *category,
                priority,
            });
        }
    }

    // Leftmost first; on equal start the longest match wins, then the
    // earlier category in the table.
    matches.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(b.end.cmp(&a.end))
            .then(a.priority.cmp(&b.priority))
    });

    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut cursor = 0usize;
    for m in matches {
        if m.start < cursor {
            continue; // overlapped by an already-emitted span
        }
        out.push_str(&escape_html(&text[cursor..m.start]));
        out.push_str(&format!(
            "<span style='background-color:{}; padding:2px;'><b>{}</b></span>",
            m.category.color(),
            escape_html(&text[m.start..m.end]),
        ));
        cursor = m.end;
    }
    out.push_str(&escape_html(&text[cursor..]));
    out
}

/// Escape text for embedding in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(category: Category, text: &str) -> String {
        format!(
            "<span style='background-color:{}; padding:2px;'><b>{}</b></span>",
            category.color(),
            text
        )
    }

    #[test]
    fn wraps_diagnosis_and_medication_terms() {
        let out = highlight("Patient has diabetes and was given insulin");
        assert!(out.contains(&span(Category::Diagnosis, "diabetes")));
        assert!(out.contains(&span(Category::Medications, "insulin")));
    }

    #[test]
    fn matching_is_case_insensitive_and_preserves_original_casing() {
        let out = highlight("DIABETES was confirmed; Insulin started.");
        assert!(out.contains(&span(Category::Diagnosis, "DIABETES")));
        assert!(out.contains(&span(Category::Medications, "Insulin")));
    }

    #[test]
    fn multi_word_terms_match_as_phrases() {
        let out = highlight("Elevated blood pressure noted, CT scan ordered.");
        assert!(out.contains(&span(Category::Vitals, "blood pressure")));
        assert!(out.contains(&span(Category::Procedures, "CT scan")));
    }

    #[test]
    fn no_match_inside_larger_words() {
        let out = highlight("The wardrobe was moved.");
        assert!(!out.contains("<span"));
    }

    #[test]
    fn every_category_keyword_gets_its_own_color() {
        for category in Category::ALL {
            for term in category.keywords() {
                let text = format!("Note: {} recorded today.", term);
                let out = highlight(&text);
                assert!(
                    out.contains(category.color()),
                    "'{}' should carry the {} color",
                    term,
                    category.label()
                );
            }
        }
    }

    #[test]
    fn non_keyword_text_is_escaped() {
        let out = highlight("BP <120/80> & stable");
        assert!(out.contains("&lt;120/80&gt;"));
        assert!(out.contains("&amp;"));
    }

    #[test]
    fn overlapping_matches_resolve_to_one_span() {
        // "medication" (Treatment) must not be re-wrapped by any later scan;
        // exactly one span covers it.
        let out = highlight("Continue medication as prescribed.");
        assert_eq!(out.matches("<span").count(), 1);
        assert!(out.contains(&span(Category::Treatment, "medication")));
    }

    #[test]
    fn deterministic_for_identical_input() {
        let text = "Discharge after surgery; follow-up for glucose and WBC.";
        assert_eq!(highlight(text), highlight(text));
    }
}
