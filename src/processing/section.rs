//! Section records produced by segmentation and ranking

use serde::{Deserialize, Serialize};

/// Minimum normalized character length for a section body.
pub const MIN_SECTION_CHARS: usize = 50;
/// First sentences at least this long fall back to a prefix summary.
const SUMMARY_SENTENCE_MAX: usize = 200;
/// Prefix length used when the first sentence is too long.
const SUMMARY_PREFIX_CHARS: usize = 100;

/// One titled span of document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub document_name: String,
    pub page_number: u32,
    pub section_text: String,
    pub section_title: Option<String>,
    pub context_summary: String,
}

impl Section {
    pub fn new(
        document_name: String,
        page_number: u32,
        section_text: String,
        section_title: Option<String>,
    ) -> Self {
        let context_summary = context_summary(&section_text);
        Self {
            document_name,
            page_number,
            section_text,
            section_title,
            context_summary,
        }
    }
}

/// A ranked section as written to the result file. Field order is the
/// serialization order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSection {
    pub document_name: String,
    pub page_number: u32,
    pub section_text: String,
    pub relevance_score: f32,
    pub reasoning: String,
    pub section_title: String,
    pub context_summary: String,
}

/// First sentence when it stays under 200 characters, otherwise the
/// first 100 characters with an ellipsis. Lengths count characters.
pub fn context_summary(text: &str) -> String {
    let first_sentence = text.split('.').next().unwrap_or("");
    if first_sentence.chars().count() < SUMMARY_SENTENCE_MAX {
        format!("{}.", first_sentence.trim())
    } else {
        let prefix: String = text.chars().take(SUMMARY_PREFIX_CHARS).collect();
        format!("{}...", prefix.trim())
    }
}
