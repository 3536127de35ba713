//! Heuristic page segmentation with an ordered heading rule table

use crate::processing::section::{Section, MIN_SECTION_CHARS};
use log::debug;
use regex::Regex;

/// Lines longer than this are never headings.
const MAX_HEADING_CHARS: usize = 100;
/// Upper length bound for the short all-caps heading rule.
const SHORT_CAPS_MAX_CHARS: usize = 50;

struct HeadingRule {
    name: &'static str,
    pattern: Regex,
}

pub struct TextSegmenter {
    heading_rules: Vec<HeadingRule>,
    strip_pattern: Regex,
}

impl TextSegmenter {
    pub fn new() -> Self {
        let rules = [
            ("all-caps", r"^[A-Z][A-Z\s]{2,}$"),
            ("numbered", r"^\d+\.\s*[A-Z]"),
            ("title-colon", r"^[A-Z][a-z]*\s*:"),
            ("chapter", r"^Chapter\s+\d+"),
            ("section", r"^Section\s+\d+"),
        ];
        let heading_rules = rules
            .into_iter()
            .map(|(name, pattern)| HeadingRule {
                name,
                pattern: Regex::new(pattern).expect("Invalid heading pattern"),
            })
            .collect();

        Self {
            heading_rules,
            strip_pattern: Regex::new(r#"[^\w\s.,;:!?\-()\[\]{}"]"#)
                .expect("Invalid strip pattern"),
        }
    }

    /// Splits one page of text into titled sections. Body text ahead of the
    /// first heading keeps no title; pages without any heading fall back to
    /// a single `Page {n}` section when enough text survives normalization.
    pub fn segment(&self, page_text: &str, document_name: &str, page_number: u32) -> Vec<Section> {
        let lines = self.normalize_lines(page_text);

        let mut sections = Vec::new();
        let mut current_title: Option<String> = None;
        let mut buffer: Vec<String> = Vec::new();

        for line in &lines {
            if self.is_heading(line) {
                self.flush(
                    &mut buffer,
                    &current_title,
                    document_name,
                    page_number,
                    &mut sections,
                );
                current_title = Some(line.clone());
            } else {
                buffer.push(line.clone());
            }
        }
        self.flush(
            &mut buffer,
            &current_title,
            document_name,
            page_number,
            &mut sections,
        );

        if sections.is_empty() {
            let page_body = lines.join(" ");
            if page_body.chars().count() > MIN_SECTION_CHARS {
                sections.push(Section::new(
                    document_name.to_string(),
                    page_number,
                    page_body,
                    Some(format!("Page {}", page_number)),
                ));
            }
        }

        sections
    }

    /// Replaces characters outside the permitted set with spaces, then
    /// collapses whitespace within each line. Line boundaries survive so
    /// heading detection stays line-based; blank lines are dropped.
    fn normalize_lines(&self, text: &str) -> Vec<String> {
        let stripped = self.strip_pattern.replace_all(text, " ");
        stripped
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect()
    }

    fn is_heading(&self, line: &str) -> bool {
        if line.chars().count() > MAX_HEADING_CHARS {
            return false;
        }
        if let Some(rule) = self.heading_rules.iter().find(|r| r.pattern.is_match(line)) {
            debug!("Heading rule '{}' matched: {}", rule.name, line);
            return true;
        }
        if line.chars().count() < SHORT_CAPS_MAX_CHARS
            && is_fully_uppercase(line)
            && line.split_whitespace().count() > 1
        {
            debug!("Heading rule 'short-caps' matched: {}", line);
            return true;
        }
        false
    }

    fn flush(
        &self,
        buffer: &mut Vec<String>,
        title: &Option<String>,
        document_name: &str,
        page_number: u32,
        sections: &mut Vec<Section>,
    ) {
        if buffer.is_empty() {
            return;
        }
        let text = buffer.join(" ").trim().to_string();
        buffer.clear();
        if text.chars().count() > MIN_SECTION_CHARS {
            sections.push(Section::new(
                document_name.to_string(),
                page_number,
                text,
                title.clone(),
            ));
        }
    }
}

impl Default for TextSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// True when the line has at least one uppercase letter and no lowercase.
fn is_fully_uppercase(line: &str) -> bool {
    let mut has_uppercase = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_uppercase = true;
        }
    }
    has_uppercase
}
