//! Page-by-page text extraction from the supported file formats

use crate::error::{PersonaRankerError, Result};
use pulldown_cmark::{html, Parser};
use std::path::Path;
use tokio::fs;

/// Form feed, the page separator pdf-extract emits between pages.
const PAGE_SEPARATOR: char = '\u{0c}';

/// Extracts the text of a document as one string per page.
pub trait PageExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

pub struct PdfExtractor;

impl PageExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| PersonaRankerError::Processing(format!("PDF extraction failed: {}", e)))?;
        Ok(split_pages(&text))
    }
}

pub struct PlainTextExtractor;

impl PageExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path).await?;
        Ok(split_pages(&content))
    }
}

pub struct MarkdownExtractor;

impl PageExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<Vec<String>> {
        let markdown_content = fs::read_to_string(path).await?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        let text = strip_html(&html_output);
        if text.trim().is_empty() {
            Ok(Vec::new())
        } else {
            Ok(vec![text])
        }
    }
}

/// Splits extracted text into pages on form feeds, dropping trailing
/// empty pages left behind by a final separator.
fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split(PAGE_SEPARATOR).map(|p| p.to_string()).collect();
    while pages.last().map_or(false, |p| p.trim().is_empty()) {
        pages.pop();
    }
    pages
}

fn strip_html(html: &str) -> String {
    let text = html
        .replace("<br>", "\n")
        .replace("</p>", "\n\n")
        .replace("</li>", "\n")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let re = regex::Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex");
    let clean_text = re.replace_all(&text, "");

    let lines: Vec<String> = clean_text
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n")
}
