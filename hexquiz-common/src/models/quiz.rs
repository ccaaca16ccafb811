//! Saved quiz setups and quiz questions

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Offset-less timestamp layout found in older quiz files
const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Persisted quiz configuration, keyed by its sanitized name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSetup {
    pub name: String,
    /// At least two unique taxon names, in the order the user chose them
    #[serde(alias = "families")]
    pub taxa: Vec<String>,
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "family_count")]
    pub taxon_count: usize,
}

impl QuizSetup {
    pub fn new(name: impl Into<String>, taxa: Vec<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            taxon_count: taxa.len(),
            taxa,
            created_at,
        }
    }

    /// Storage key derived from the quiz name
    pub fn storage_key(&self) -> String {
        sanitize_name(&self.name)
    }
}

/// Parse an RFC 3339 timestamp, or a naive `YYYY-MM-DD HH:MM:SS[.ffffff]`
/// one taken as UTC
pub fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => Ok(timestamp.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(raw.trim(), NAIVE_TIMESTAMP_FORMAT).map(|naive| naive.and_utc()),
    }
}

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_created_at(&raw).map_err(|e| serde::de::Error::custom(format!("invalid created_at '{}': {}", raw, e)))
}

/// Reduce a quiz name to a filesystem-safe key
///
/// Keeps alphanumerics, spaces, hyphens and underscores, then trims trailing
/// whitespace. Distinct names may collapse to the same key.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// One multiple-choice prompt: a single image and its correct label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// The chosen taxon name exactly as supplied by the caller
    pub correct_answer: String,
    pub image_url: String,
    pub scientific_name: String,
    pub observation_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Ants & Bees!"), "Ants  Bees");
        assert_eq!(sanitize_name("my_quiz-2 "), "my_quiz-2");
        assert_eq!(sanitize_name("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_name("!!!"), "");
    }

    #[test]
    fn test_sanitize_keeps_unicode_letters() {
        assert_eq!(sanitize_name("Käfer Übersicht"), "Käfer Übersicht");
    }

    #[test]
    fn test_quiz_setup_reads_legacy_families_field() {
        let json = r#"{
            "name": "Old",
            "families": ["Formicidae", "Apidae"],
            "created_at": "2024-05-01T10:00:00Z"
        }"#;
        let setup: QuizSetup = serde_json::from_str(json).unwrap();
        assert_eq!(setup.taxa, vec!["Formicidae", "Apidae"]);
        assert_eq!(setup.storage_key(), "Old");
    }

    #[test]
    fn test_quiz_setup_reads_naive_timestamp_and_family_count() {
        let json = r#"{
            "name": "Old",
            "families": ["Formicidae", "Apidae"],
            "created_at": "2024-05-01 10:00:00.123456",
            "family_count": 2
        }"#;
        let setup: QuizSetup = serde_json::from_str(json).unwrap();
        assert_eq!(setup.taxon_count, 2);
        assert_eq!(
            setup.created_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap() + Duration::microseconds(123456)
        );
    }

    #[test]
    fn test_parse_created_at_variants() {
        let whole = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_created_at("2024-05-01 10:00:00").unwrap(), whole);
        assert_eq!(parse_created_at("2024-05-01T12:00:00+02:00").unwrap(), whole);
        assert!(parse_created_at("yesterday").is_err());
    }

    #[test]
    fn test_created_at_written_as_rfc3339() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let setup = QuizSetup::new("New", vec!["Formicidae".into(), "Apidae".into()], created);
        let value = serde_json::to_value(&setup).unwrap();
        assert_eq!(value["created_at"], "2024-05-01T10:00:00Z");

        let back: QuizSetup = serde_json::from_value(value).unwrap();
        assert_eq!(back, setup);
    }
}
