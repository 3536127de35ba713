//! Input layout validation and routed page extraction

use crate::error::{PersonaRankerError, Result};
use crate::input::extractor::{MarkdownExtractor, PageExtractor, PdfExtractor, PlainTextExtractor};
use crate::input::file_detector::FileType;
use log::{debug, error, warn};
use std::path::{Path, PathBuf};

/// Subdirectory of the input directory holding the document set.
pub const DOCUMENTS_SUBDIR: &str = "documents";
/// Persona file names, in preference order.
pub const PERSONA_CANDIDATES: [&str; 2] = ["persona.json", "persona.txt"];
/// Job description file name.
pub const JOB_FILE_NAME: &str = "job_to_be_done.txt";
/// Document counts above this log a warning before processing.
const MANY_DOCUMENTS: usize = 10;

/// Resolved input files for one run.
#[derive(Debug, Clone)]
pub struct InputLayout {
    pub documents: Vec<PathBuf>,
    pub persona_file: PathBuf,
    pub job_file: PathBuf,
}

pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Checks the fixed input conventions and resolves the files for a run.
    /// Every failure is logged before it is returned.
    pub fn validate(&self, input_dir: &Path) -> Result<InputLayout> {
        if !input_dir.is_dir() {
            return Err(self.fail(format!(
                "Input directory does not exist: {}",
                input_dir.display()
            )));
        }

        let documents_dir = input_dir.join(DOCUMENTS_SUBDIR);
        if !documents_dir.is_dir() {
            return Err(self.fail(format!(
                "Documents directory does not exist: {}",
                documents_dir.display()
            )));
        }

        let documents = self.discover_documents(&documents_dir)?;
        if documents.is_empty() {
            return Err(self.fail(format!(
                "No supported documents found in {}",
                documents_dir.display()
            )));
        }
        if documents.len() > MANY_DOCUMENTS {
            warn!(
                "Found {} documents, processing may take longer",
                documents.len()
            );
        }

        let persona_file = PERSONA_CANDIDATES
            .iter()
            .map(|name| input_dir.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                self.fail(format!(
                    "No persona file found in {} (expected persona.json or persona.txt)",
                    input_dir.display()
                ))
            })?;

        let job_file = input_dir.join(JOB_FILE_NAME);
        if !job_file.is_file() {
            return Err(self.fail(format!(
                "Job description file does not exist: {}",
                job_file.display()
            )));
        }

        Ok(InputLayout {
            documents,
            persona_file,
            job_file,
        })
    }

    /// Extracts a document as one string per page, routed by file type.
    /// Failures carry the document name so callers can skip and continue.
    pub async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let document = document_name(path);
        let file_type = FileType::from_path(path);

        let result = match file_type {
            FileType::Pdf => {
                debug!("Extracting PDF document: {}", path.display());
                PdfExtractor.extract(path).await
            }
            FileType::Text => {
                debug!("Reading plain text document: {}", path.display());
                PlainTextExtractor.extract(path).await
            }
            FileType::Markdown => {
                debug!("Rendering markdown document: {}", path.display());
                MarkdownExtractor.extract(path).await
            }
            FileType::Unknown => Err(PersonaRankerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            ))),
        };

        result.map_err(|e| PersonaRankerError::DocumentExtraction {
            document,
            message: e.to_string(),
        })
    }

    /// Supported files under the documents directory, lexicographically
    /// sorted so runs are reproducible.
    fn discover_documents(&self, documents_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut documents = Vec::new();
        for entry in std::fs::read_dir(documents_dir)? {
            let path = entry?.path();
            if path.is_file() && FileType::from_path(&path).is_supported() {
                documents.push(path);
            }
        }
        documents.sort();
        Ok(documents)
    }

    fn fail(&self, message: String) -> PersonaRankerError {
        error!("{}", message);
        PersonaRankerError::InputValidation(message)
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

/// File name of a document path, used in logs and output records.
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
