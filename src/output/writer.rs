//! Serialized result output

use crate::error::Result;
use crate::processing::section::ScoredSection;
use log::debug;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Fixed result file name under the output directory.
pub const RESULT_FILE_NAME: &str = "result.json";

/// Writes the ranked sections as a JSON array to `result.json` under the
/// output directory, creating the directory and overwriting any previous
/// result.
pub async fn write_results(
    output_dir: &Path,
    results: &[ScoredSection],
    pretty: bool,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).await?;

    let json = if pretty {
        serde_json::to_string_pretty(results)?
    } else {
        serde_json::to_string(results)?
    };

    let path = output_dir.join(RESULT_FILE_NAME);
    fs::write(&path, json).await?;
    debug!("Wrote {} records to {}", results.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: f32) -> ScoredSection {
        ScoredSection {
            document_name: "doc.txt".to_string(),
            page_number: 1,
            section_text: "Body text".to_string(),
            relevance_score: score,
            reasoning: "Lower relevance match.. Brief content.".to_string(),
            section_title: "TITLE".to_string(),
            context_summary: "Body text.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_writes_array_and_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("nested").join("output");

        let path = write_results(&output_dir, &[record(0.5), record(0.2)], true)
            .await
            .unwrap();
        assert_eq!(path, output_dir.join(RESULT_FILE_NAME));

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<ScoredSection> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].section_title, "TITLE");
    }

    #[tokio::test]
    async fn test_field_order_matches_record_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_results(dir.path(), &[record(0.5)], false).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let document = content.find("\"document_name\"").unwrap();
        let score = content.find("\"relevance_score\"").unwrap();
        let title = content.find("\"section_title\"").unwrap();
        assert!(document < score && score < title);
    }

    #[tokio::test]
    async fn test_overwrites_previous_result() {
        let dir = tempfile::tempdir().unwrap();
        write_results(dir.path(), &[record(0.1), record(0.2)], false)
            .await
            .unwrap();
        let path = write_results(dir.path(), &[record(0.9)], false).await.unwrap();

        let parsed: Vec<ScoredSection> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_results_write_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_results(dir.path(), &[], false).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
