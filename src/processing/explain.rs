//! Templated reasoning strings for ranked sections

use crate::error::{PersonaRankerError, Result};
use aho_corasick::AhoCorasick;
use std::collections::HashSet;

const HIGH_RELEVANCE: f32 = 0.7;
const MODERATE_RELEVANCE: f32 = 0.5;
const STRONG_ALIGNMENT: f32 = 0.6;
const SOME_ALIGNMENT: f32 = 0.4;
const DETAILED_CHARS: usize = 500;
const BRIEF_CHARS: usize = 100;
/// Matched keywords listed per parenthetical.
const MAX_LISTED_KEYWORDS: usize = 3;

const PRACTICAL_SIGNALS: [&str; 3] = ["example", "case study", "implementation"];
const PROCESS_SIGNALS: [&str; 4] = ["process", "step", "procedure", "method"];
const ANALYTICAL_SIGNALS: [&str; 4] = ["analysis", "data", "research", "study"];

/// Builds reasoning strings from the untruncated section text and the
/// three scores. Constructed once per run so the keyword automatons are
/// shared across sections.
pub struct ExplanationBuilder {
    persona_keywords: Vec<String>,
    job_keywords: Vec<String>,
    persona_matcher: AhoCorasick,
    job_matcher: AhoCorasick,
    practical_matcher: AhoCorasick,
    process_matcher: AhoCorasick,
    analytical_matcher: AhoCorasick,
}

impl ExplanationBuilder {
    pub fn new(persona_keywords: &[String], job_keywords: &[String]) -> Result<Self> {
        Ok(Self {
            persona_keywords: persona_keywords.to_vec(),
            job_keywords: job_keywords.to_vec(),
            persona_matcher: build_matcher(persona_keywords)?,
            job_matcher: build_matcher(job_keywords)?,
            practical_matcher: build_matcher(&PRACTICAL_SIGNALS)?,
            process_matcher: build_matcher(&PROCESS_SIGNALS)?,
            analytical_matcher: build_matcher(&ANALYTICAL_SIGNALS)?,
        })
    }

    /// Assembles the reasoning phrases in template order, joined with
    /// `". "` and a trailing period. The tier-1 phrases carry their own
    /// period, reproducing the double period of the reference output.
    pub fn build(
        &self,
        section_text: &str,
        combined: f32,
        persona_similarity: f32,
        job_similarity: f32,
    ) -> String {
        let mut parts: Vec<String> = Vec::new();

        if combined > HIGH_RELEVANCE {
            parts.push("High relevance match.".to_string());
        } else if combined > MODERATE_RELEVANCE {
            parts.push("Moderate relevance match.".to_string());
        } else {
            parts.push("Lower relevance match.".to_string());
        }

        if persona_similarity > STRONG_ALIGNMENT {
            parts.push("Strong persona alignment".to_string());
            let matched = matched_keywords(&self.persona_matcher, &self.persona_keywords, section_text);
            if !matched.is_empty() {
                // the parenthetical is its own phrase, not part of the
                // alignment phrase
                parts.push(format!("(matches persona keywords: {})", matched.join(", ")));
            }
        } else if persona_similarity > SOME_ALIGNMENT {
            parts.push("Some persona alignment".to_string());
        }

        if job_similarity > STRONG_ALIGNMENT {
            parts.push("Strong job relevance".to_string());
            let matched = matched_keywords(&self.job_matcher, &self.job_keywords, section_text);
            if !matched.is_empty() {
                parts.push(format!("(addresses job needs: {})", matched.join(", ")));
            }
        } else if job_similarity > SOME_ALIGNMENT {
            parts.push("Some job relevance".to_string());
        }

        let length = section_text.chars().count();
        if length > DETAILED_CHARS {
            parts.push("Detailed content".to_string());
        } else if length < BRIEF_CHARS {
            parts.push("Brief content".to_string());
        }

        if self.practical_matcher.is_match(section_text) {
            parts.push("Contains practical examples".to_string());
        }
        if self.process_matcher.is_match(section_text) {
            parts.push("Contains process information".to_string());
        }
        if self.analytical_matcher.is_match(section_text) {
            parts.push("Contains analytical content".to_string());
        }

        format!("{}.", parts.join(". "))
    }
}

fn build_matcher<P: AsRef<str>>(patterns: &[P]) -> Result<AhoCorasick> {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(patterns.iter().map(|p| p.as_ref()))
        .map_err(|e| PersonaRankerError::Processing(format!("Failed to build matcher: {}", e)))
}

/// First keywords (in stored order) that occur in the text, up to the
/// listing cap.
fn matched_keywords(matcher: &AhoCorasick, keywords: &[String], text: &str) -> Vec<String> {
    let hits: HashSet<usize> = matcher
        .find_iter(text)
        .map(|m| m.pattern().as_usize())
        .collect();
    keywords
        .iter()
        .enumerate()
        .filter(|(index, _)| hits.contains(index))
        .map(|(_, keyword)| keyword.clone())
        .take(MAX_LISTED_KEYWORDS)
        .collect()
}
