// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Error types for certreport

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Course not found: {0}")]
    CourseNotFound(String),

    #[error("Invalid course key: {0}")]
    InvalidCourseKey(String),

    #[error("Invalid date: {0} (expected RFC 3339 or YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Too many users requested: {0} (at most {1} per run)")]
    TooManyUsers(usize, usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
