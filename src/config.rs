// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Report configuration: course listings, database location, lookup policy

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};

/// What to do when a listed course does not exist in the course store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingCoursePolicy {
    /// Abort the run
    #[default]
    Fail,
    /// Log a warning and leave the course out
    Skip,
}

/// certreport configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Course ids grouped by listing (e.g. a catalogue section)
    pub course_listings: BTreeMap<String, Vec<String>>,

    /// SQLite database path
    pub database: Option<PathBuf>,

    pub missing_courses: MissingCoursePolicy,
}

impl ReportConfig {
    /// Load configuration from an explicit path. `.yaml`/`.yml` files are read as YAML,
    /// anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);

        let config: Self = if is_yaml {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        Ok(config)
    }

    /// Load from `path` if given, otherwise from the default location if it exists,
    /// otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::config_path() {
            Ok(default_path) if default_path.exists() => Self::load(&default_path),
            _ => Ok(Self::default()),
        }
    }

    /// Get the default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ReportError::Config("Could not find config directory".to_string()))?;
        Ok(config_dir.join("certreport").join("config.json"))
    }

    /// Resolve the database path: explicit override, then config, then the data directory
    pub fn database_path(&self, override_path: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = override_path {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| ReportError::Config("Could not find data directory".to_string()))?;
        Ok(data_dir.join("certreport").join("lms.db"))
    }

    /// Every listed course id, listings in key order, ids in listed order
    pub fn listed_courses(&self) -> impl Iterator<Item = &str> {
        self.course_listings
            .values()
            .flat_map(|ids| ids.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "course_listings": {
                    "spring": ["MITx/6.002x/2013_Spring"],
                    "fall": ["MITx/6.002x/2012_Fall", "HarvardX/CS50x/2012"]
                },
                "missing_courses": "skip"
            }"#,
        )
        .unwrap();

        let config = ReportConfig::load(&path).unwrap();
        assert_eq!(config.missing_courses, MissingCoursePolicy::Skip);
        assert!(config.database.is_none());
        let listed: Vec<&str> = config.listed_courses().collect();
        assert_eq!(
            listed,
            vec![
                "MITx/6.002x/2012_Fall",
                "HarvardX/CS50x/2012",
                "MITx/6.002x/2013_Spring"
            ]
        );
    }

    #[test]
    fn test_load_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "course_listings:\n  all:\n    - edX/Demo/2014\ndatabase: /tmp/lms.db\n",
        )
        .unwrap();

        let config = ReportConfig::load(&path).unwrap();
        assert_eq!(config.missing_courses, MissingCoursePolicy::Fail);
        assert_eq!(config.database, Some(PathBuf::from("/tmp/lms.db")));
        assert_eq!(config.listed_courses().count(), 1);
    }

    #[test]
    fn test_database_path_precedence() {
        let config = ReportConfig {
            database: Some(PathBuf::from("from-config.db")),
            ..Default::default()
        };
        assert_eq!(
            config.database_path(Some(Path::new("override.db"))).unwrap(),
            PathBuf::from("override.db")
        );
        assert_eq!(
            config.database_path(None).unwrap(),
            PathBuf::from("from-config.db")
        );
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ReportConfig::load(&path),
            Err(ReportError::JsonError(_))
        ));
    }
}
