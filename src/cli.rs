// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! CLI argument definitions using clap derive macros

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::report::ReportFormat;

/// certreport - certificate status reports for ended courses
#[derive(Parser)]
#[command(name = "certreport")]
#[command(author = "Nervosys")]
#[command(version)]
#[command(about = "Report certificate status across courses", long_about = None)]
pub struct Cli {
    /// SQLite database with courses, enrollments and certificates
    #[arg(long, global = true, env = "CERTREPORT_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Configuration file (JSON or YAML)
    #[arg(long, global = true, env = "CERTREPORT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report certificate status for every listed course that has ended
    #[command(long_about = "Report certificate status for every listed course that has ended.\n\n\
        Statuses:\n  \
        generating   - requested, not generated yet\n  \
        regenerating - regeneration requested, not generated yet\n  \
        deleting     - deletion requested\n  \
        deleted      - deleted\n  \
        downloadable - available for download\n  \
        notpassing   - graded, not passing")]
    Report {
        /// Only report on COURSE_ID (ended or not)
        #[arg(short, long, value_name = "COURSE_ID")]
        course: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Plain)]
        format: ReportFormat,

        /// Skip listed courses that do not exist instead of failing
        #[arg(long)]
        skip_missing: bool,
    },

    /// Create N users with random parameters, optionally enrolling them in a course
    SeedUsers {
        /// Number of users to create
        #[arg(value_parser = clap::value_parser!(u64).range(1..=crate::seed::MAX_SEED_USERS as u64))]
        count: u64,

        /// Course to enroll the users in (course-v1:ORG+NUM+RUN or ORG/NUM/RUN)
        course: Option<String>,
    },

    /// Manage courses
    Course {
        #[command(subcommand)]
        command: CourseCommands,
    },

    /// Manage certificates
    #[command(visible_alias = "cert")]
    Certificate {
        #[command(subcommand)]
        command: CertificateCommands,
    },
}

#[derive(Subcommand)]
pub enum CourseCommands {
    /// Add or update a course
    Add {
        /// Course key (course-v1:ORG+NUM+RUN or ORG/NUM/RUN)
        course_id: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Start date (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// End date (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },

    /// List courses
    #[command(visible_alias = "ls")]
    List,
}

#[derive(Subcommand)]
pub enum CertificateCommands {
    /// Set a user's certificate for a course
    Set {
        /// Username of the certificate holder
        username: String,

        /// Course id
        course_id: String,

        /// Certificate mode (honor, verified, audit, ...)
        #[arg(long, default_value = "honor")]
        mode: String,

        /// Certificate status (generating, downloadable, notpassing, ...)
        #[arg(long)]
        status: String,
    },
}
