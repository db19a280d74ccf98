// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! certreport - Library
//!
//! Certificate status reporting over LMS course data.
//!
//! For each selected course the report counts active and total enrollments,
//! certificates per mode, certificates per status, and downloadable
//! certificates per mode, then prints one row per course with one column per
//! metric seen in any course.
//!
//! ```rust,ignore
//! use certreport::{LmsDatabase, ReportBuilder, ReportConfig, ReportFormat};
//!
//! let db = LmsDatabase::open(Path::new("lms.db"))?;
//! let config = ReportConfig::load(Path::new("config.json"))?;
//! let report = ReportBuilder::new(&config).build(&db)?;
//! print!("{}", report.render(ReportFormat::Plain)?);
//! ```

pub mod cli;
pub mod colors;
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod report;
pub mod seed;
pub mod store;

// Re-export commonly used items
pub use cli::{CertificateCommands, Cli, Commands, CourseCommands};
pub use config::{MissingCoursePolicy, ReportConfig};
pub use database::{DatabaseStats, LmsDatabase};
pub use error::ReportError;
pub use models::{
    Certificate, CertificateMode, CertificateStatus, Course, CourseKey, CourseReportRow, User,
};
pub use report::{CertificateReport, CourseSelector, MetricsCollector, ReportBuilder, ReportFormat};
pub use store::{CertificateStore, CourseStore, EnrollmentStore, GroupBy, LmsStore};
