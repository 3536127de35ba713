//! Cosine similarity, the weighted relevance blend and embedding-text
//! construction for persona, job and section

use crate::config::ScoringConfig;
use crate::processing::job::JobModel;
use crate::processing::persona::PersonaProfile;
use crate::processing::section::Section;

/// Weights for the persona/job similarity blend. Not required to sum to
/// one, although the defaults do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub persona: f32,
    pub job: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            persona: 0.4,
            job: 0.6,
        }
    }
}

impl From<ScoringConfig> for ScoringWeights {
    fn from(config: ScoringConfig) -> Self {
        Self {
            persona: config.persona_weight,
            job: config.job_weight,
        }
    }
}

/// Standard cosine similarity in [-1, 1]. Mismatched lengths, empty
/// vectors and zero magnitudes all score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

/// Weighted blend of the two similarities. The result is not clamped;
/// negative cosines pass through.
pub fn combined_score(
    section: &[f32],
    persona: &[f32],
    job: &[f32],
    weights: ScoringWeights,
) -> f32 {
    weights.persona * cosine_similarity(section, persona)
        + weights.job * cosine_similarity(section, job)
}

/// Text embedded for the persona: raw content, attribute lines and the
/// labeled list clauses, space-joined, each only when non-empty.
pub fn persona_embedding_text(profile: &PersonaProfile) -> String {
    let mut parts = Vec::new();
    if !profile.raw_content.is_empty() {
        parts.push(profile.raw_content.clone());
    }
    for (key, value) in &profile.attributes {
        parts.push(format!("{}: {}", key, value));
    }
    if !profile.needs.is_empty() {
        parts.push(format!("Needs: {}", profile.needs.join(" ")));
    }
    if !profile.interests.is_empty() {
        parts.push(format!("Interests: {}", profile.interests.join(" ")));
    }
    if !profile.tone.is_empty() {
        parts.push(format!("Tone: {}", profile.tone));
    }
    if !profile.keywords.is_empty() {
        parts.push(format!("Keywords: {}", profile.keywords.join(" ")));
    }
    parts.join(" ")
}

/// Text embedded for the job, built the same way from its clauses.
pub fn job_embedding_text(job: &JobModel) -> String {
    let mut parts = Vec::new();
    if !job.raw_content.is_empty() {
        parts.push(job.raw_content.clone());
    }
    if !job.main_goal.is_empty() {
        parts.push(format!("Goal: {}", job.main_goal));
    }
    if !job.specific_tasks.is_empty() {
        parts.push(format!("Tasks: {}", job.specific_tasks.join(" ")));
    }
    if !job.success_criteria.is_empty() {
        parts.push(format!("Success: {}", job.success_criteria.join(" ")));
    }
    if !job.context.is_empty() {
        parts.push(format!("Context: {}", job.context));
    }
    if !job.keywords.is_empty() {
        parts.push(format!("Keywords: {}", job.keywords.join(" ")));
    }
    parts.join(" ")
}

/// Text embedded for a section: title, body, summary.
pub fn section_embedding_text(section: &Section) -> String {
    let mut parts = Vec::new();
    if let Some(title) = &section.section_title {
        parts.push(title.clone());
    }
    parts.push(section.section_text.clone());
    if !section.context_summary.is_empty() {
        parts.push(section.context_summary.clone());
    }
    parts.join(" ")
}
