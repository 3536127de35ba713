//! End-to-end pipeline tests over scratch input trees

use persona_ranker::config::{Config, EmbeddingBackend};
use persona_ranker::pipeline::{self, CancelFlag};
use persona_ranker::processing::section::ScoredSection;
use persona_ranker::PersonaRankerError;
use std::path::Path;

const SAMPLE_DOCUMENT: &str = "OVERVIEW\n\
    This system helps new analysts onboard quickly and confidently.\n\
    IMPLEMENTATION\n\
    Use the API client to fetch records and cache results locally, a worked example for step one.\n";

const SAMPLE_PERSONA: &str = r#"{"role": "analyst", "needs": ["onboarding"]}"#;

const SAMPLE_JOB: &str = "Learn to integrate the API client. Success: working cache in one day.";

fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.paths.input_dir = root.join("input");
    config.paths.output_dir = root.join("output");
    config.embedding.backend = EmbeddingBackend::Hashed;
    config.embedding.hashed_dimensions = 128;
    config
}

fn seed_inputs(root: &Path, persona: Option<&str>, job: Option<&str>, documents: &[(&str, &str)]) {
    let input = root.join("input");
    let docs = input.join("documents");
    std::fs::create_dir_all(&docs).unwrap();
    for (name, content) in documents {
        std::fs::write(docs.join(name), content).unwrap();
    }
    if let Some(persona) = persona {
        std::fs::write(input.join("persona.json"), persona).unwrap();
    }
    if let Some(job) = job {
        std::fs::write(input.join("job_to_be_done.txt"), job).unwrap();
    }
}

#[tokio::test]
async fn test_end_to_end_ranks_two_sections() {
    let dir = tempfile::tempdir().unwrap();
    seed_inputs(
        dir.path(),
        Some(SAMPLE_PERSONA),
        Some(SAMPLE_JOB),
        &[("guide.txt", SAMPLE_DOCUMENT)],
    );

    let summary = pipeline::run(&test_config(dir.path()), &CancelFlag::new())
        .await
        .unwrap();

    assert_eq!(summary.results.len(), 2);
    assert_eq!(summary.documents_processed, 1);
    assert_eq!(summary.documents_skipped, 0);

    let titles: Vec<&str> = summary
        .results
        .iter()
        .map(|r| r.section_title.as_str())
        .collect();
    assert!(titles.contains(&"OVERVIEW"));
    assert!(titles.contains(&"IMPLEMENTATION"));

    let implementation = summary
        .results
        .iter()
        .find(|r| r.section_title == "IMPLEMENTATION")
        .unwrap();
    assert!(implementation.reasoning.contains("Contains practical examples"));
    assert!(implementation.reasoning.contains("Contains process information"));

    // scores descend across the output
    for pair in summary.results.windows(2) {
        assert!(pair[0].relevance_score >= pair[1].relevance_score);
    }
}

#[tokio::test]
async fn test_result_file_matches_returned_results() {
    let dir = tempfile::tempdir().unwrap();
    seed_inputs(
        dir.path(),
        Some(SAMPLE_PERSONA),
        Some(SAMPLE_JOB),
        &[("guide.txt", SAMPLE_DOCUMENT)],
    );

    let summary = pipeline::run(&test_config(dir.path()), &CancelFlag::new())
        .await
        .unwrap();

    let written: Vec<ScoredSection> =
        serde_json::from_str(&std::fs::read_to_string(&summary.output_path).unwrap()).unwrap();
    assert_eq!(written, summary.results);
    assert!(summary.output_path.ends_with("result.json"));
}

#[tokio::test]
async fn test_missing_persona_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    seed_inputs(
        dir.path(),
        None,
        Some(SAMPLE_JOB),
        &[("guide.txt", SAMPLE_DOCUMENT)],
    );

    let config = test_config(dir.path());
    let result = pipeline::run(&config, &CancelFlag::new()).await;
    assert!(matches!(result, Err(PersonaRankerError::InputValidation(_))));
    assert!(!config.paths.output_dir.join("result.json").exists());
}

#[tokio::test]
async fn test_missing_job_file_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    seed_inputs(
        dir.path(),
        Some(SAMPLE_PERSONA),
        None,
        &[("guide.txt", SAMPLE_DOCUMENT)],
    );

    let result = pipeline::run(&test_config(dir.path()), &CancelFlag::new()).await;
    assert!(matches!(result, Err(PersonaRankerError::InputValidation(_))));
}

#[tokio::test]
async fn test_empty_documents_dir_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    seed_inputs(dir.path(), Some(SAMPLE_PERSONA), Some(SAMPLE_JOB), &[]);

    let result = pipeline::run(&test_config(dir.path()), &CancelFlag::new()).await;
    assert!(matches!(result, Err(PersonaRankerError::InputValidation(_))));
}

#[tokio::test]
async fn test_broken_document_skipped_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    seed_inputs(
        dir.path(),
        Some(SAMPLE_PERSONA),
        Some(SAMPLE_JOB),
        &[
            ("broken.pdf", "this is not a pdf at all"),
            ("guide.txt", SAMPLE_DOCUMENT),
        ],
    );

    let summary = pipeline::run(&test_config(dir.path()), &CancelFlag::new())
        .await
        .unwrap();
    assert_eq!(summary.documents_processed, 1);
    assert_eq!(summary.documents_skipped, 1);
    assert_eq!(summary.results.len(), 2);
}

#[tokio::test]
async fn test_all_documents_too_short_is_no_content() {
    let dir = tempfile::tempdir().unwrap();
    seed_inputs(
        dir.path(),
        Some(SAMPLE_PERSONA),
        Some(SAMPLE_JOB),
        &[("tiny.txt", "too short")],
    );

    let config = test_config(dir.path());
    let result = pipeline::run(&config, &CancelFlag::new()).await;
    assert!(matches!(result, Err(PersonaRankerError::NoContent)));
    assert!(!config.paths.output_dir.join("result.json").exists());
}

#[tokio::test]
async fn test_malformed_persona_json_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    seed_inputs(
        dir.path(),
        Some("{ not valid json"),
        Some(SAMPLE_JOB),
        &[("guide.txt", SAMPLE_DOCUMENT)],
    );

    let result = pipeline::run(&test_config(dir.path()), &CancelFlag::new()).await;
    match result {
        Err(PersonaRankerError::Parse { path, .. }) => {
            assert!(path.ends_with("persona.json"));
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_hashed_backend_is_deterministic_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    seed_inputs(
        dir.path(),
        Some(SAMPLE_PERSONA),
        Some(SAMPLE_JOB),
        &[("guide.txt", SAMPLE_DOCUMENT)],
    );
    let config = test_config(dir.path());

    let first = pipeline::run(&config, &CancelFlag::new()).await.unwrap();
    let second = pipeline::run(&config, &CancelFlag::new()).await.unwrap();
    assert_eq!(first.results, second.results);
}

#[tokio::test]
async fn test_cancelled_flag_stops_the_run() {
    let dir = tempfile::tempdir().unwrap();
    seed_inputs(
        dir.path(),
        Some(SAMPLE_PERSONA),
        Some(SAMPLE_JOB),
        &[("guide.txt", SAMPLE_DOCUMENT)],
    );

    let cancel = CancelFlag::new();
    cancel.cancel();
    let result = pipeline::run(&test_config(dir.path()), &cancel).await;
    assert!(matches!(result, Err(PersonaRankerError::Cancelled)));
}

#[tokio::test]
async fn test_markdown_document_flows_through() {
    let dir = tempfile::tempdir().unwrap();
    let markdown = "# OVERVIEW\n\nThis markdown page carries enough body text to clear the minimum section length.\n";
    seed_inputs(
        dir.path(),
        Some(SAMPLE_PERSONA),
        Some(SAMPLE_JOB),
        &[("notes.md", markdown)],
    );

    let summary = pipeline::run(&test_config(dir.path()), &CancelFlag::new())
        .await
        .unwrap();
    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.results[0].document_name, "notes.md");
}
