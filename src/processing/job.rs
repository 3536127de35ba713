//! Job-to-be-done modeling from the free-text task description

use crate::error::{PersonaRankerError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

const TASK_MARKERS: [&str; 6] = ["task", "action", "step", "need to", "want to", "should"];
const OUTCOME_MARKERS: [&str; 5] = ["success", "goal", "outcome", "result", "expect"];
const HIGH_URGENCY_MARKERS: [&str; 4] = ["urgent", "asap", "immediately", "quickly"];
const LOW_URGENCY_MARKERS: [&str; 3] = ["whenever", "sometime", "eventually"];
const CONTEXT_MARKERS: [&str; 5] = ["because", "since", "given that", "context", "background"];

/// High-frequency words excluded from job keywords.
const COMMON_WORDS: [&str; 55] = [
    "the", "and", "for", "with", "this", "that", "they", "have", "will", "from", "been", "some",
    "what", "were", "said", "each", "which", "their", "time", "than", "first", "water", "long",
    "very", "after", "work", "right", "move", "thing", "place", "year", "come", "back", "way",
    "much", "where", "most", "take", "good", "just", "see", "him", "two", "how", "its", "our",
    "out", "day", "get", "use", "man", "new", "now", "may", "say",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        };
        write!(f, "{}", label)
    }
}

/// Structured view of what the reader is trying to get done.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobModel {
    pub main_goal: String,
    pub specific_tasks: Vec<String>,
    pub success_criteria: Vec<String>,
    pub urgency: Urgency,
    pub context: String,
    pub keywords: Vec<String>,
    pub raw_content: String,
}

pub struct JobParser {
    action_verb_pattern: Regex,
    proper_noun_pattern: Regex,
    suffix_term_pattern: Regex,
}

impl JobParser {
    pub fn new() -> Self {
        Self {
            action_verb_pattern: Regex::new(
                r"\b(find|search|analyze|review|understand|learn|identify|create|build|develop|improve|optimize|solve|fix|handle|manage|organize|plan|design|implement|test|evaluate|compare|assess|study|research|document|report|present|communicate|coordinate|collaborate)\b",
            )
            .expect("Invalid action verb pattern"),
            proper_noun_pattern: Regex::new(r"\b[A-Z][a-z]{2,}\b")
                .expect("Invalid proper noun pattern"),
            suffix_term_pattern: Regex::new(r"\b[a-z]{3,}(?:ing|tion|ment|ness|ity|ance|ence)\b")
                .expect("Invalid suffix term pattern"),
        }
    }

    /// Reads the job description file. Failures are fatal and carry the
    /// offending path.
    pub async fn parse(&self, path: &Path) -> Result<JobModel> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| PersonaRankerError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(self.parse_text(&content))
    }

    /// Builds the job model. The per-line checks are independent, so one
    /// line can contribute a task, an outcome and an urgency change at
    /// once; urgency is last-writer-wins across lines, with the High
    /// check ahead of Low within a line.
    pub fn parse_text(&self, content: &str) -> JobModel {
        let mut model = JobModel {
            main_goal: main_goal(content),
            raw_content: content.to_string(),
            ..Default::default()
        };

        for raw_line in content.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            let lowered = line.to_lowercase();

            if contains_any(&lowered, &TASK_MARKERS) {
                model.specific_tasks.push(strip_bullet(line).to_string());
            }
            if contains_any(&lowered, &OUTCOME_MARKERS) {
                model.success_criteria.push(strip_bullet(line).to_string());
            }
            if contains_any(&lowered, &HIGH_URGENCY_MARKERS) {
                model.urgency = Urgency::High;
            }
            if contains_any(&lowered, &LOW_URGENCY_MARKERS) {
                model.urgency = Urgency::Low;
            }
            if contains_any(&lowered, &CONTEXT_MARKERS) {
                if !model.context.is_empty() {
                    model.context.push(' ');
                }
                model.context.push_str(line);
            }
        }

        model.keywords = self.extract_keywords(content);
        model
    }

    /// Action verbs, capitalized words (lowercased) and derivational-suffix
    /// terms, in that order, deduplicated first-seen, minus common words
    /// and tokens of one or two characters.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut candidates: Vec<String> = Vec::new();

        for m in self.action_verb_pattern.find_iter(&lowered) {
            candidates.push(m.as_str().to_string());
        }
        for m in self.proper_noun_pattern.find_iter(text) {
            candidates.push(m.as_str().to_lowercase());
        }
        for m in self.suffix_term_pattern.find_iter(&lowered) {
            candidates.push(m.as_str().to_string());
        }

        let mut keywords = Vec::new();
        for word in candidates {
            if word.chars().count() <= 2 || COMMON_WORDS.contains(&word.as_str()) {
                continue;
            }
            if !keywords.contains(&word) {
                keywords.push(word);
            }
        }
        keywords
    }
}

impl Default for JobParser {
    fn default() -> Self {
        Self::new()
    }
}

/// First `.`-separated fragment of the text, trimmed, with the period
/// restored.
fn main_goal(content: &str) -> String {
    let first = content.split('.').next().unwrap_or("").trim();
    format!("{}.", first)
}

fn contains_any(line: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| line.contains(marker))
}

fn strip_bullet(line: &str) -> &str {
    line.strip_prefix('-')
        .or_else(|| line.strip_prefix('•'))
        .map(str::trim)
        .unwrap_or(line)
}
