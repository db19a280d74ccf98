// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Certificate status report command

use anyhow::Result;

use crate::config::{MissingCoursePolicy, ReportConfig};
use crate::report::{ReportBuilder, ReportFormat};
use crate::store::LmsStore;

/// Print the certificate status report for the selected courses
pub fn certificate_report<S: LmsStore + ?Sized>(
    store: &S,
    config: &ReportConfig,
    course: Option<&str>,
    format: ReportFormat,
    skip_missing: bool,
) -> Result<()> {
    let mut builder = ReportBuilder::new(config).course(course);
    if skip_missing {
        builder = builder.missing_courses(MissingCoursePolicy::Skip);
    }

    let report = builder.build_with_progress(store, |course_id| {
        if format == ReportFormat::Json {
            log::info!("Looking up certificate states for {}", course_id);
        } else {
            println!("Looking up certificate states for {}", course_id);
        }
    })?;

    let rendered = report.render(format)?;
    if rendered.ends_with('\n') {
        print!("{}", rendered);
    } else {
        println!("{}", rendered);
    }

    Ok(())
}
