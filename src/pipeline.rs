//! One-pass batch pipeline: validate, parse, segment, rank, write

use crate::config::Config;
use crate::error::{PersonaRankerError, Result};
use crate::input::manager::{document_name, InputManager};
use crate::output::writer;
use crate::processing::embedder::build_provider;
use crate::processing::job::JobParser;
use crate::processing::persona::PersonaParser;
use crate::processing::ranker::SectionRanker;
use crate::processing::section::{ScoredSection, Section};
use crate::processing::segmenter::TextSegmenter;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared cancellation flag, flipped by the binary's Ctrl-C watcher and
/// checked at each document boundary and before the embedding batch.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(PersonaRankerError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub results: Vec<ScoredSection>,
    pub documents_processed: usize,
    pub documents_skipped: usize,
    pub output_path: PathBuf,
    pub elapsed: Duration,
}

/// Runs one full ranking batch. Per-document extraction failures are
/// logged and skipped; every other failure aborts the run.
pub async fn run(config: &Config, cancel: &CancelFlag) -> Result<RunSummary> {
    let start = Instant::now();

    let manager = InputManager::new();
    let layout = manager.validate(&config.paths.input_dir)?;
    info!(
        "Validated input layout: {} documents in {}",
        layout.documents.len(),
        config.paths.input_dir.display()
    );

    // Model loading is fatal and happens before any document work.
    let provider = build_provider(&config.embedding)?;

    let persona = PersonaParser::new().parse(&layout.persona_file).await?;
    info!(
        "Persona profile loaded: {} attributes, {} keywords",
        persona.attributes.len(),
        persona.keywords.len()
    );
    let job = JobParser::new().parse(&layout.job_file).await?;
    info!(
        "Job model loaded: urgency {}, {} tasks, {} keywords",
        job.urgency,
        job.specific_tasks.len(),
        job.keywords.len()
    );

    let segmenter = TextSegmenter::new();
    let mut sections: Vec<Section> = Vec::new();
    let mut documents_processed = 0;
    let mut documents_skipped = 0;

    for path in &layout.documents {
        cancel.check()?;
        let name = document_name(path);

        match manager.extract_pages(path).await {
            Ok(pages) => {
                let before = sections.len();
                for (index, page) in pages.iter().enumerate() {
                    sections.extend(segmenter.segment(page, &name, index as u32 + 1));
                }
                info!(
                    "{}: {} pages, {} sections",
                    name,
                    pages.len(),
                    sections.len() - before
                );
                documents_processed += 1;
            }
            Err(e) => {
                warn!("Skipping document: {}", e);
                documents_skipped += 1;
            }
        }
    }

    if sections.is_empty() {
        error!("No sections could be extracted from any document");
        return Err(PersonaRankerError::NoContent);
    }

    cancel.check()?;
    let ranker = SectionRanker::new(provider, config.scoring.into());
    let results = ranker.rank(&sections, &persona, &job)?;

    let output_path = writer::write_results(
        &config.paths.output_dir,
        &results,
        config.output.pretty_json,
    )
    .await?;

    let elapsed = start.elapsed();
    info!(
        "Ranked {} sections from {} documents in {:.2}s -> {}",
        results.len(),
        documents_processed,
        elapsed.as_secs_f32(),
        output_path.display()
    );

    Ok(RunSummary {
        results,
        documents_processed,
        documents_skipped,
        output_path,
        elapsed,
    })
}
