//! Batch embedding, scoring and stable ranking of extracted sections

use crate::error::{PersonaRankerError, Result};
use crate::processing::embedder::EmbeddingProvider;
use crate::processing::explain::ExplanationBuilder;
use crate::processing::job::JobModel;
use crate::processing::persona::PersonaProfile;
use crate::processing::scoring::{
    combined_score, cosine_similarity, job_embedding_text, persona_embedding_text,
    section_embedding_text, ScoringWeights,
};
use crate::processing::section::{ScoredSection, Section};
use log::{debug, info};
use std::cmp::Ordering;

/// Character cap for section text in output records.
const MAX_OUTPUT_CHARS: usize = 1000;

pub struct SectionRanker {
    provider: Box<dyn EmbeddingProvider>,
    weights: ScoringWeights,
}

impl SectionRanker {
    pub fn new(provider: Box<dyn EmbeddingProvider>, weights: ScoringWeights) -> Self {
        Self { provider, weights }
    }

    /// Scores and sorts every section against the persona and job. All
    /// section texts go through one index-aligned batch call; the sort is
    /// stable, so equal scores keep extraction order.
    pub fn rank(
        &self,
        sections: &[Section],
        persona: &PersonaProfile,
        job: &JobModel,
    ) -> Result<Vec<ScoredSection>> {
        if sections.is_empty() {
            return Ok(Vec::new());
        }

        info!(
            "Ranking {} sections with model '{}'",
            sections.len(),
            self.provider.model_id()
        );

        let persona_vector = self.provider.embed(&persona_embedding_text(persona))?;
        let job_vector = self.provider.embed(&job_embedding_text(job))?;

        let section_texts: Vec<String> = sections.iter().map(section_embedding_text).collect();
        let section_vectors = self.provider.embed_batch(&section_texts)?;
        if section_vectors.len() != sections.len() {
            return Err(PersonaRankerError::Embedding(format!(
                "Expected {} section vectors, got {}",
                sections.len(),
                section_vectors.len()
            )));
        }

        let explainer = ExplanationBuilder::new(&persona.keywords, &job.keywords)?;

        let mut scored: Vec<ScoredSection> = sections
            .iter()
            .zip(section_vectors.iter())
            .map(|(section, vector)| {
                let persona_similarity = cosine_similarity(vector, &persona_vector);
                let job_similarity = cosine_similarity(vector, &job_vector);
                let relevance_score =
                    combined_score(vector, &persona_vector, &job_vector, self.weights);

                // Reasoning works from the full text; only the output copy
                // is truncated.
                let reasoning = explainer.build(
                    &section.section_text,
                    relevance_score,
                    persona_similarity,
                    job_similarity,
                );
                debug!(
                    "{} p{} '{}': score {:.3} (persona {:.3}, job {:.3})",
                    section.document_name,
                    section.page_number,
                    section.section_title.as_deref().unwrap_or(""),
                    relevance_score,
                    persona_similarity,
                    job_similarity
                );

                ScoredSection {
                    document_name: section.document_name.clone(),
                    page_number: section.page_number,
                    section_text: truncate_for_output(&section.section_text),
                    relevance_score,
                    reasoning,
                    section_title: section.section_title.clone().unwrap_or_default(),
                    context_summary: section.context_summary.clone(),
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(Ordering::Equal)
        });

        Ok(scored)
    }
}

/// Caps the text at 1000 characters with an ellipsis suffix.
fn truncate_for_output(text: &str) -> String {
    if text.chars().count() > MAX_OUTPUT_CHARS {
        let prefix: String = text.chars().take(MAX_OUTPUT_CHARS).collect();
        format!("{}...", prefix)
    } else {
        text.to_string()
    }
}
