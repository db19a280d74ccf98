// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! certreport - Main entry point
//!
//! Certificate status reports and test-data seeding for LMS course data.

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use certreport::cli::{CertificateCommands, Cli, Commands, CourseCommands};
use certreport::commands;
use certreport::config::ReportConfig;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("CERTREPORT_LOG", "warn,certreport=info"))
        .init();

    let cli = Cli::parse();

    let config = ReportConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let db = commands::open_database(cli.db.as_deref(), &config)?;

    match cli.command {
        // ====================================================================
        // Report
        // ====================================================================
        Commands::Report {
            course,
            format,
            skip_missing,
        } => commands::certificate_report(&db, &config, course.as_deref(), format, skip_missing),

        // ====================================================================
        // Seeding
        // ====================================================================
        Commands::SeedUsers { count, course } => {
            commands::seed_users(&db, count, course.as_deref())
        }

        // ====================================================================
        // Courses
        // ====================================================================
        Commands::Course { command } => match command {
            CourseCommands::Add {
                course_id,
                name,
                start,
                end,
            } => commands::course_add(
                &db,
                &course_id,
                name.as_deref(),
                start.as_deref(),
                end.as_deref(),
            ),
            CourseCommands::List => commands::course_list(&db),
        },

        // ====================================================================
        // Certificates
        // ====================================================================
        Commands::Certificate { command } => match command {
            CertificateCommands::Set {
                username,
                course_id,
                mode,
                status,
            } => commands::certificate_set(&db, &username, &course_id, &mode, &status),
        },
    }
}
