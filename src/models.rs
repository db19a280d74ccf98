// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Data models for courses, enrollments and certificates

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ReportError, Result};

// =============================================================================
// Course Keys
// =============================================================================

static COURSE_V1_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^course-v1:([A-Za-z0-9_.\-]+)\+([A-Za-z0-9_.\-]+)\+([A-Za-z0-9_.\-]+)$")
        .expect("course-v1 key pattern")
});

static SLASH_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9_.\-]+)/([A-Za-z0-9_.\-]+)/([A-Za-z0-9_.\-]+)$")
        .expect("slash-separated key pattern")
});

/// Structured course identifier (org/number/run)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseKey {
    pub org: String,
    pub course: String,
    pub run: String,
    /// Parsed from the deprecated `org/number/run` form
    pub deprecated: bool,
}

impl CourseKey {
    pub fn new(org: &str, course: &str, run: &str) -> Self {
        Self {
            org: org.to_string(),
            course: course.to_string(),
            run: run.to_string(),
            deprecated: false,
        }
    }

    /// Parse a `course-v1:ORG+NUMBER+RUN` key
    pub fn from_string(s: &str) -> Result<Self> {
        let caps = COURSE_V1_KEY
            .captures(s.trim())
            .ok_or_else(|| ReportError::InvalidCourseKey(s.to_string()))?;
        Ok(Self::new(&caps[1], &caps[2], &caps[3]))
    }

    /// Parse a deprecated `ORG/NUMBER/RUN` key
    pub fn from_deprecated_string(s: &str) -> Result<Self> {
        let caps = SLASH_KEY
            .captures(s.trim())
            .ok_or_else(|| ReportError::InvalidCourseKey(s.to_string()))?;
        Ok(Self {
            deprecated: true,
            ..Self::new(&caps[1], &caps[2], &caps[3])
        })
    }
}

impl FromStr for CourseKey {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s).or_else(|_| Self::from_deprecated_string(s))
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.deprecated {
            write!(f, "{}/{}/{}", self.org, self.course, self.run)
        } else {
            write!(f, "course-v1:{}+{}+{}", self.org, self.course, self.run)
        }
    }
}

// =============================================================================
// Courses and Users
// =============================================================================

/// A scheduled course offering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub display_name: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Course {
    /// Whether the course has ended as of `now`. Courses without an end date never end.
    pub fn has_ended_at(&self, now: DateTime<Utc>) -> bool {
        self.end.map(|end| end < now).unwrap_or(false)
    }

    pub fn has_ended(&self) -> bool {
        self.has_ended_at(Utc::now())
    }
}

/// A learner account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: String,
    pub created_at: i64,
}

// =============================================================================
// Certificates
// =============================================================================

/// Track under which a certificate was earned
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CertificateMode {
    Honor,
    Verified,
    Audit,
    Other(String),
}

impl CertificateMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Honor => "honor",
            Self::Verified => "verified",
            Self::Audit => "audit",
            Self::Other(mode) => mode,
        }
    }
}

impl From<String> for CertificateMode {
    fn from(s: String) -> Self {
        match s.as_str() {
            "honor" => Self::Honor,
            "verified" => Self::Verified,
            "audit" => Self::Audit,
            _ => Self::Other(s),
        }
    }
}

impl From<CertificateMode> for String {
    fn from(mode: CertificateMode) -> Self {
        mode.as_str().to_string()
    }
}

impl FromStr for CertificateMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s.to_lowercase()))
    }
}

impl fmt::Display for CertificateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a certificate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CertificateStatus {
    /// Requested but not yet generated
    Generating,
    /// Regeneration requested but not yet generated
    Regenerating,
    /// Deletion requested
    Deleting,
    Deleted,
    /// Available for download
    Downloadable,
    /// Graded but not passing
    NotPassing,
    Other(String),
}

impl CertificateStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Generating => "generating",
            Self::Regenerating => "regenerating",
            Self::Deleting => "deleting",
            Self::Deleted => "deleted",
            Self::Downloadable => "downloadable",
            Self::NotPassing => "notpassing",
            Self::Other(status) => status,
        }
    }
}

impl From<String> for CertificateStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "generating" => Self::Generating,
            "regenerating" => Self::Regenerating,
            "deleting" => Self::Deleting,
            "deleted" => Self::Deleted,
            "downloadable" => Self::Downloadable,
            "notpassing" => Self::NotPassing,
            _ => Self::Other(s),
        }
    }
}

impl From<CertificateStatus> for String {
    fn from(status: CertificateStatus) -> Self {
        status.as_str().to_string()
    }
}

impl FromStr for CertificateStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s.to_lowercase()))
    }
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's completion credential for a course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub user_id: i64,
    pub course_id: String,
    pub mode: CertificateMode,
    pub status: CertificateStatus,
}

// =============================================================================
// Report Rows
// =============================================================================

/// Per-course certificate and enrollment counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseReportRow {
    pub course_id: String,
    pub enrolled_current: u64,
    pub enrolled_total: u64,
    pub verified_enrolled: u64,
    pub honor_enrolled: u64,
    pub audit_enrolled: u64,
    /// All certificates grouped by status
    pub status_tally: BTreeMap<String, u64>,
    /// Downloadable certificates grouped by mode
    pub mode_tally: BTreeMap<String, u64>,
}

impl CourseReportRow {
    pub fn new(course_id: &str) -> Self {
        Self {
            course_id: course_id.to_string(),
            ..Default::default()
        }
    }

    /// Flatten into one metric map: fixed counts, then status tally, then mode tally.
    /// A key seen twice keeps the later value.
    pub fn metrics(&self) -> BTreeMap<String, u64> {
        let mut merged = BTreeMap::new();
        for (key, count) in [
            ("enrolled_current", self.enrolled_current),
            ("enrolled_total", self.enrolled_total),
            ("verified_enrolled", self.verified_enrolled),
            ("honor_enrolled", self.honor_enrolled),
            ("audit_enrolled", self.audit_enrolled),
        ] {
            merged.insert(key.to_string(), count);
        }

        for (key, count) in self.status_tally.iter().chain(self.mode_tally.iter()) {
            if let Some(previous) = merged.insert(key.clone(), *count) {
                log::warn!(
                    "{}: metric '{}' collides ({} replaced by {})",
                    self.course_id,
                    key,
                    previous,
                    count
                );
            }
        }

        merged
    }
}

// =============================================================================
// Dates
// =============================================================================

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC)
pub fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ReportError::InvalidDate(s.to_string()))
}
