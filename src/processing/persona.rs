//! Persona profile extraction from structured JSON or free text

use crate::error::{PersonaRankerError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

/// Words never kept as auto-extracted keywords.
const STOP_WORDS: [&str; 36] = [
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "this", "that",
    "these", "those", "is", "are", "was", "were", "been", "have", "has", "had", "will", "would",
    "could", "should", "can", "may", "might", "must", "shall", "from", "into", "onto",
];

/// Structured view of who the reader is and what they care about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonaProfile {
    /// Identity fields keyed by lowercased field name.
    pub attributes: BTreeMap<String, String>,
    pub needs: Vec<String>,
    pub interests: Vec<String>,
    pub tone: String,
    pub keywords: Vec<String>,
    pub raw_content: String,
}

pub struct PersonaParser {
    attribute_pattern: Regex,
    needs_header: Regex,
    interests_header: Regex,
    tone_header: Regex,
    keyword_pattern: Regex,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TextMode {
    None,
    Needs,
    Interests,
    Tone,
}

impl PersonaParser {
    pub fn new() -> Self {
        Self {
            attribute_pattern: Regex::new(r"(?i)^(name|age|role|occupation|title):\s*(.+)")
                .expect("Invalid attribute pattern"),
            needs_header: Regex::new(r"(?i)^(needs|requirements|goals):")
                .expect("Invalid needs pattern"),
            interests_header: Regex::new(r"(?i)^(interests|hobbies|preferences):")
                .expect("Invalid interests pattern"),
            tone_header: Regex::new(r"(?i)^(tone|communication|personality):")
                .expect("Invalid tone pattern"),
            keyword_pattern: Regex::new(r"\b[a-zA-Z]{3,}\b").expect("Invalid keyword pattern"),
        }
    }

    /// Reads a persona file and dispatches on its extension: `.json` is
    /// parsed as structured input, everything else as free text. Failures
    /// are fatal and carry the offending path.
    pub async fn parse(&self, path: &Path) -> Result<PersonaProfile> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| parse_error(path, e.to_string()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            self.parse_structured(&content)
                .map_err(|e| parse_error(path, e.to_string()))
        } else {
            Ok(self.parse_free_text(&content))
        }
    }

    /// Maps a JSON object onto the profile. Field names are matched
    /// case-insensitively; keys iterate in sorted order, so collisions
    /// resolve deterministically with the later key winning.
    pub fn parse_structured(&self, content: &str) -> Result<PersonaProfile> {
        let data: Value = serde_json::from_str(content)?;
        let object = data.as_object().ok_or_else(|| {
            PersonaRankerError::Processing("persona root must be a JSON object".to_string())
        })?;

        let mut profile = PersonaProfile {
            raw_content: serde_json::to_string_pretty(&data)?,
            ..Default::default()
        };

        for (key, value) in object {
            let field = key.to_lowercase();
            match field.as_str() {
                "name" | "age" | "role" | "occupation" | "title" => {
                    profile.attributes.insert(field, value_to_string(value));
                }
                "needs" | "requirements" | "goals" => append_values(&mut profile.needs, value),
                "interests" | "hobbies" | "preferences" => {
                    append_values(&mut profile.interests, value)
                }
                "tone" | "communication_style" | "personality" => {
                    profile.tone = value_to_string(value)
                }
                "keywords" | "tags" | "topics" => {
                    let mut explicit = Vec::new();
                    append_values(&mut explicit, value);
                    for keyword in explicit {
                        push_unique(&mut profile.keywords, keyword);
                    }
                }
                _ => {}
            }
        }

        for keyword in self.extract_keywords(&serde_json::to_string(&data)?) {
            push_unique(&mut profile.keywords, keyword);
        }

        Ok(profile)
    }

    /// Line-oriented free-text parsing: attribute lines, mode-switching
    /// headers, bullet items under the active mode, and tone accumulation.
    /// Header lines switch the mode without storing their own content.
    pub fn parse_free_text(&self, content: &str) -> PersonaProfile {
        let mut profile = PersonaProfile {
            raw_content: content.to_string(),
            ..Default::default()
        };
        let mut mode = TextMode::None;

        for raw_line in content.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = self.attribute_pattern.captures(line) {
                let field = caps[1].to_lowercase();
                let value = caps[2].trim().to_string();
                profile.attributes.insert(field, value);
                continue;
            }
            if self.needs_header.is_match(line) {
                mode = TextMode::Needs;
                continue;
            }
            if self.interests_header.is_match(line) {
                mode = TextMode::Interests;
                continue;
            }
            if self.tone_header.is_match(line) {
                mode = TextMode::Tone;
                continue;
            }

            if let Some(item) = strip_bullet(line) {
                match mode {
                    TextMode::Needs => profile.needs.push(item.to_string()),
                    TextMode::Interests => profile.interests.push(item.to_string()),
                    _ => {}
                }
                continue;
            }

            if mode == TextMode::Tone && !line.ends_with(':') {
                if !profile.tone.is_empty() {
                    profile.tone.push(' ');
                }
                profile.tone.push_str(line);
            }
        }

        profile.keywords = self.extract_keywords(content);
        profile
    }

    /// Alphabetic runs of three or more letters, lowercased, minus stop
    /// words and short tokens, deduplicated in first-seen order.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut keywords = Vec::new();
        for word in self.keyword_pattern.find_iter(&lowered) {
            let word = word.as_str();
            if word.chars().count() <= 3 || STOP_WORDS.contains(&word) {
                continue;
            }
            push_unique(&mut keywords, word.to_string());
        }
        keywords
    }
}

impl Default for PersonaParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_error(path: &Path, message: String) -> PersonaRankerError {
    PersonaRankerError::Parse {
        path: path.to_path_buf(),
        message,
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Array values flatten element by element; scalars push one entry.
fn append_values(target: &mut Vec<String>, value: &Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                target.push(value_to_string(item));
            }
        }
        other => target.push(value_to_string(other)),
    }
}

fn push_unique(target: &mut Vec<String>, item: String) {
    if !target.contains(&item) {
        target.push(item);
    }
}

fn strip_bullet(line: &str) -> Option<&str> {
    line.strip_prefix('-')
        .or_else(|| line.strip_prefix('•'))
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> PersonaParser {
        PersonaParser::new()
    }

    #[test]
    fn test_structured_maps_name_and_needs() {
        let profile = parser()
            .parse_structured(r#"{"name": "Alice", "needs": ["quick answers"]}"#)
            .unwrap();
        assert_eq!(profile.attributes.get("name"), Some(&"Alice".to_string()));
        assert_eq!(profile.needs, vec!["quick answers".to_string()]);
    }

    #[test]
    fn test_structured_stringifies_scalars() {
        let profile = parser()
            .parse_structured(r#"{"Age": 34, "needs": "less meetings"}"#)
            .unwrap();
        assert_eq!(profile.attributes.get("age"), Some(&"34".to_string()));
        assert_eq!(profile.needs, vec!["less meetings".to_string()]);
    }

    #[test]
    fn test_structured_collects_keywords_first_seen() {
        let profile = parser()
            .parse_structured(r#"{"keywords": ["Kubernetes", "observability"], "role": "platform engineer"}"#)
            .unwrap();
        // explicit keywords first, auto-extracted ones appended without duplicates
        assert_eq!(profile.keywords[0], "Kubernetes");
        assert_eq!(profile.keywords[1], "observability");
        assert!(profile.keywords.contains(&"platform".to_string()));
        assert_eq!(
            profile
                .keywords
                .iter()
                .filter(|k| k.as_str() == "observability")
                .count(),
            1
        );
    }

    #[test]
    fn test_structured_rejects_non_object_root() {
        assert!(parser().parse_structured("[1, 2, 3]").is_err());
        assert!(parser().parse_structured("not json at all").is_err());
    }

    #[test]
    fn test_structured_tone_and_raw_content() {
        let profile = parser()
            .parse_structured(r#"{"personality": "direct", "name": "Sam"}"#)
            .unwrap();
        assert_eq!(profile.tone, "direct");
        assert!(profile.raw_content.contains("\"name\": \"Sam\""));
    }

    #[test]
    fn test_free_text_attributes_and_modes() {
        let content = "Name: Priya\n\
                       Role: Data Analyst\n\
                       Needs:\n\
                       - concise summaries\n\
                       - worked examples\n\
                       Interests:\n\
                       - visualization\n\
                       Tone:\n\
                       Friendly but precise";
        let profile = parser().parse_free_text(content);
        assert_eq!(profile.attributes.get("name"), Some(&"Priya".to_string()));
        assert_eq!(profile.attributes.get("role"), Some(&"Data Analyst".to_string()));
        assert_eq!(
            profile.needs,
            vec!["concise summaries".to_string(), "worked examples".to_string()]
        );
        assert_eq!(profile.interests, vec!["visualization".to_string()]);
        assert_eq!(profile.tone, "Friendly but precise");
        assert_eq!(profile.raw_content, content);
    }

    #[test]
    fn test_free_text_header_content_not_stored() {
        let profile = parser().parse_free_text("Needs: inline text after header\n- actual need");
        assert_eq!(profile.needs, vec!["actual need".to_string()]);
    }

    #[test]
    fn test_free_text_tone_accumulates_lines() {
        let profile = parser().parse_free_text("Tone:\nCalm and methodical\nNever rushed");
        assert_eq!(profile.tone, "Calm and methodical Never rushed");
    }

    #[test]
    fn test_free_text_bullets_outside_mode_dropped() {
        let profile = parser().parse_free_text("- floating bullet\nNeeds:\n- kept");
        assert_eq!(profile.needs, vec!["kept".to_string()]);
        assert!(profile.interests.is_empty());
    }

    #[test]
    fn test_extract_keywords_filters_and_dedups() {
        let keywords = parser()
            .extract_keywords("The migration map: migration, rollback and the cat with dashboards");
        assert_eq!(keywords[0], "migration");
        assert!(keywords.contains(&"rollback".to_string()));
        assert!(keywords.contains(&"dashboards".to_string()));
        // "the"/"and"/"with" are stop words, "cat" and "map" are too short
        assert!(!keywords.contains(&"the".to_string()));
        assert!(!keywords.contains(&"cat".to_string()));
        assert!(!keywords.contains(&"map".to_string()));
        assert_eq!(
            keywords.iter().filter(|k| k.as_str() == "migration").count(),
            1
        );
    }

    #[tokio::test]
    async fn test_parse_dispatches_and_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("persona.json");
        std::fs::write(&json_path, r#"{"role": "auditor"}"#).unwrap();
        let profile = parser().parse(&json_path).await.unwrap();
        assert_eq!(profile.attributes.get("role"), Some(&"auditor".to_string()));

        let bad_path = dir.path().join("broken.json");
        std::fs::write(&bad_path, "{ not json").unwrap();
        match parser().parse(&bad_path).await {
            Err(PersonaRankerError::Parse { path, .. }) => assert_eq!(path, bad_path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
