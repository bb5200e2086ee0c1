//! Persisted analysis reports.
//!
//! Reports are written as pretty-printed JSON files named
//! `analysis_<YYYYmmdd_HHMMSS>.json` inside a results directory.

use crate::error::{Result, SeoError};
use crate::pipeline::AnalysisReport;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PREFIX: &str = "analysis_";
const EXTENSION: &str = ".json";

/// A stored report file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub name: String,
    /// Timestamp embedded in the file name.
    pub timestamp: String,
    pub size_bytes: u64,
}

/// Directory-backed report storage.
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a report and return its path.
    ///
    /// When a file for the same second already exists, the report id is appended to the name.
    pub fn save(&self, report: &AnalysisReport) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let mut path = self.dir.join(format!("{PREFIX}{}{EXTENSION}", report.timestamp));
        if path.exists() {
            let short_id: String = report.id.simple().to_string().chars().take(8).collect();
            path = self
                .dir
                .join(format!("{PREFIX}{}_{short_id}{EXTENSION}", report.timestamp));
        }

        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;
        info!("Saved report to {}", path.display());
        Ok(path)
    }

    /// Stored reports, newest first. A missing directory yields an empty list.
    pub fn list(&self) -> Result<Vec<ResultEntry>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if !is_report_name(&name) || !entry.file_type()?.is_file() {
                continue;
            }
            let timestamp = name[PREFIX.len()..name.len() - EXTENSION.len()].to_string();
            entries.push(ResultEntry {
                name,
                timestamp,
                size_bytes: entry.metadata()?.len(),
            });
        }

        entries.sort_by(|a, b| b.name.cmp(&a.name));
        debug!("Found {} stored reports", entries.len());
        Ok(entries)
    }

    /// Load a stored report by file name.
    pub fn load(&self, name: &str) -> Result<serde_json::Value> {
        if !is_report_name(name) {
            return Err(SeoError::InvalidInput(format!("Invalid result name: {}", name)));
        }

        let path = self.dir.join(name);
        if !path.is_file() {
            return Err(SeoError::ResultNotFound(name.to_string()));
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// `analysis_*.json` with no path components.
fn is_report_name(name: &str) -> bool {
    name.len() > PREFIX.len() + EXTENSION.len()
        && name.starts_with(PREFIX)
        && name.ends_with(EXTENSION)
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SectionResult;

    fn report(timestamp: &str) -> AnalysisReport {
        AnalysisReport {
            id: uuid::Uuid::new_v4(),
            video_data: None,
            seo_suggestions: SectionResult::Failed {
                error: "skipped".to_string(),
            },
            keyword_analysis: SectionResult::Failed {
                error: "skipped".to_string(),
            },
            sentiment_analysis: SectionResult::Failed {
                error: "skipped".to_string(),
            },
            timestamp: timestamp.to_string(),
            generated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_save_list_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("results"));

        let first = store.save(&report("20240101_120000")).unwrap();
        store.save(&report("20240102_120000")).unwrap();
        assert!(first.ends_with("analysis_20240101_120000.json"));

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].timestamp, "20240102_120000");
        assert!(entries[0].size_bytes > 0);

        let loaded = store.load("analysis_20240101_120000.json").unwrap();
        assert_eq!(loaded["timestamp"], "20240101_120000");
        assert_eq!(loaded["seo_suggestions"]["error"], "skipped");
        assert!(loaded["video_data"].is_null());
    }

    #[test]
    fn test_same_second_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path());

        let a = store.save(&report("20240101_120000")).unwrap();
        let b = store.save(&report("20240101_120000")).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_list_ignores_other_files_and_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ResultStore::new(dir.path().join("absent")).list().unwrap().is_empty());

        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::write(dir.path().join("analysis_.json"), "{}").unwrap();
        assert!(ResultStore::new(dir.path()).list().unwrap().is_empty());
    }

    #[test]
    fn test_load_rejects_bad_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path());

        assert!(matches!(
            store.load("../secrets.json"),
            Err(SeoError::InvalidInput(_))
        ));
        assert!(matches!(
            store.load("analysis_../../x.json"),
            Err(SeoError::InvalidInput(_))
        ));
        assert!(matches!(
            store.load("analysis_20240101_120000.json"),
            Err(SeoError::ResultNotFound(_))
        ));
    }
}
