//! Flat-file quiz setup storage
//!
//! One pretty-printed JSON file per quiz, named after the sanitized quiz
//! name. Saving under an existing key overwrites it. There is no locking:
//! concurrent writers to the same key race and the last write wins.

use chrono::Utc;
use hexquiz_common::models::{sanitize_name, QuizSetup};
use hexquiz_common::{Error, Result};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Fewest distinct taxa a saved quiz may contain
pub const MIN_QUIZ_TAXA: usize = 2;

/// A successfully stored quiz and the key it was stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedQuiz {
    pub key: String,
    pub setup: QuizSetup,
}

pub struct QuizStore {
    dir: PathBuf,
}

impl QuizStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Validate and persist a quiz setup
    ///
    /// Nothing is written when validation fails.
    pub async fn save(&self, name: &str, taxa: &[String]) -> Result<SavedQuiz> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Quiz name is required".to_string()));
        }

        let setup = QuizSetup::new(name, normalize_taxa(taxa), Utc::now());
        let key = setup.storage_key();
        if key.is_empty() {
            return Err(Error::Validation(format!(
                "Quiz name \"{}\" has no letters or digits",
                name
            )));
        }

        if setup.taxa.len() < MIN_QUIZ_TAXA {
            return Err(Error::Validation(format!(
                "At least {} distinct taxa are required",
                MIN_QUIZ_TAXA
            )));
        }

        let json = serde_json::to_string_pretty(&setup)
            .map_err(|e| Error::Storage(format!("Failed to encode quiz \"{}\": {}", name, e)))?;

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            Error::Storage(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        let path = self.path_for(&key);
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| Error::Storage(format!("Failed to write {}: {}", path.display(), e)))?;

        info!(quiz = %name, key = %key, taxa = setup.taxon_count, "Saved quiz setup");
        Ok(SavedQuiz { key, setup })
    }

    /// All readable quiz setups, newest first
    ///
    /// Corrupt or unreadable files are skipped. A missing directory simply
    /// means nothing has been saved yet.
    pub async fn list(&self) -> Result<Vec<QuizSetup>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(Error::Storage(format!(
                    "Failed to read {}: {}",
                    self.dir.display(),
                    e
                )))
            }
        };

        let mut quizzes = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::Storage(format!("Failed to read {}: {}", self.dir.display(), e)))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            match read_setup(&path).await {
                Ok(setup) => quizzes.push(setup),
                Err(e) => warn!("Skipping quiz record {}: {}", path.display(), e),
            }
        }

        quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(count = quizzes.len(), "Listed quiz setups");
        Ok(quizzes)
    }

    /// Delete the quiz stored under the sanitized form of `name`
    ///
    /// Returns the key that was removed.
    pub async fn delete(&self, name: &str) -> Result<String> {
        let key = sanitize_name(name);
        if key.is_empty() {
            return Err(Error::NotFound("Quiz not found".to_string()));
        }

        let path = self.path_for(&key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(quiz = %name, key = %key, "Deleted quiz setup");
                Ok(key)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(Error::NotFound("Quiz not found".to_string()))
            }
            Err(e) => Err(Error::Storage(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

async fn read_setup(path: &Path) -> Result<QuizSetup> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::Storage(e.to_string()))?;
    let mut setup: QuizSetup =
        serde_json::from_str(&content).map_err(|e| Error::Storage(format!("corrupt record: {}", e)))?;
    setup.taxon_count = setup.taxa.len();
    Ok(setup)
}

/// Trim names, drop blanks and duplicates, keep first-seen order
pub fn normalize_taxa(taxa: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    taxa.iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn taxa(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn store() -> (QuizStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        (QuizStore::new(dir.path().join("saved_quizzes")), dir)
    }

    #[test]
    fn test_normalize_taxa() {
        assert_eq!(
            normalize_taxa(&taxa(&[" Apidae", "Formicidae", "", "Apidae", "  "])),
            vec!["Apidae", "Formicidae"]
        );
    }

    #[tokio::test]
    async fn test_save_sanitizes_key_and_lists() {
        let (store, _dir) = store();

        let saved = store.save("Ants & Bees!", &taxa(&["Formicidae", "Apidae"])).await.unwrap();
        assert!(!saved.key.contains('&'));
        assert!(!saved.key.contains('!'));
        assert!(store.dir().join(format!("{}.json", saved.key)).exists());

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Ants & Bees!");
        assert_eq!(listed[0].taxa, vec!["Formicidae", "Apidae"]);
        assert_eq!(listed[0].taxon_count, 2);
    }

    #[tokio::test]
    async fn test_same_name_overwrites() {
        let (store, _dir) = store();

        store.save("Ants & Bees!", &taxa(&["Formicidae", "Apidae"])).await.unwrap();
        store
            .save("Ants & Bees!", &taxa(&["Formicidae", "Apidae", "Vespidae"]))
            .await
            .unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].taxa.len(), 3);
    }

    #[tokio::test]
    async fn test_single_taxon_rejected_without_writing() {
        let (store, _dir) = store();

        let err = store.save("Lonely", &taxa(&["Formicidae"])).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = store.save("Dupes", &taxa(&["Apidae", "Apidae "])).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        assert!(!store.dir().exists());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_or_symbol_only_name_rejected() {
        let (store, _dir) = store();
        let pair = taxa(&["Formicidae", "Apidae"]);

        assert!(matches!(store.save("   ", &pair).await, Err(Error::Validation(_))));
        assert!(matches!(store.save("&&!!", &pair).await, Err(Error::Validation(_))));
        assert!(!store.dir().exists());
    }

    #[tokio::test]
    async fn test_list_sorted_newest_first_and_skips_corrupt() {
        let (store, _dir) = store();
        tokio::fs::create_dir_all(store.dir()).await.unwrap();

        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        for (i, name) in ["Oldest", "Newest", "Middle"].iter().enumerate() {
            let offset = match *name {
                "Oldest" => 0,
                "Middle" => 1,
                _ => 2,
            };
            let setup = QuizSetup::new(*name, taxa(&["Formicidae", "Apidae"]), base + Duration::days(offset));
            let path = store.dir().join(format!("{}-{}.json", i, name));
            tokio::fs::write(path, serde_json::to_string(&setup).unwrap()).await.unwrap();
        }
        tokio::fs::write(store.dir().join("broken.json"), "{ not json").await.unwrap();
        tokio::fs::write(store.dir().join("notes.txt"), "ignored").await.unwrap();

        let listed = store.list().await.unwrap();
        let names: Vec<_> = listed.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["Newest", "Middle", "Oldest"]);
    }

    #[tokio::test]
    async fn test_list_reads_legacy_record_format() {
        let (store, _dir) = store();
        tokio::fs::create_dir_all(store.dir()).await.unwrap();
        tokio::fs::write(
            store.dir().join("Old.json"),
            r#"{"name":"Old","families":["Formicidae","Apidae"],"created_at":"2024-05-01 10:00:00.123456","family_count":2}"#,
        )
        .await
        .unwrap();
        store.save("Newer", &taxa(&["Vespidae", "Apidae"])).await.unwrap();

        let listed = store.list().await.unwrap();
        let names: Vec<_> = listed.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["Newer", "Old"]);
        assert_eq!(listed[1].taxa, vec!["Formicidae", "Apidae"]);
        assert_eq!(listed[1].taxon_count, 2);
        assert_eq!(
            listed[1].created_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap() + Duration::microseconds(123456)
        );

        store.delete("Old").await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_empty() {
        let (store, _dir) = store();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_sanitized_name() {
        let (store, _dir) = store();
        store.save("Ants & Bees!", &taxa(&["Formicidae", "Apidae"])).await.unwrap();

        let key = store.delete("Ants & Bees!").await.unwrap();
        assert_eq!(key, "Ants  Bees");
        assert!(store.list().await.unwrap().is_empty());

        let err = store.delete("Ants & Bees!").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
