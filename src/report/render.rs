// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Certificate report rendering
//!
//! The plain layout is a fixed-width table: a 26-column course id field
//! (ids cut to 24 characters) followed by one 16-column field per metric,
//! each preceded by a single space. Metrics a course never produced are
//! left blank rather than printed as zero.
//!
//! With no metric columns the header is the right-justified label alone,
//! with no trailing space after it.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style as TableStyle};

use crate::error::Result;
use crate::models::CourseReportRow;

pub const COURSE_ID_WIDTH: usize = 26;
pub const COURSE_ID_MAX_CHARS: usize = 24;
pub const METRIC_WIDTH: usize = 16;

const COURSE_ID_LABEL: &str = "course ID";

/// Output layout for the certificate report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Fixed-width columns
    #[default]
    Plain,
    /// Bordered table
    Table,
    /// JSON array of per-course metrics
    Json,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    course_id: &'a str,
    metrics: &'a BTreeMap<String, u64>,
}

/// Flattened metrics for every reported course, ordered by course id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateReport {
    rows: BTreeMap<String, BTreeMap<String, u64>>,
}

impl CertificateReport {
    pub fn from_rows(rows: Vec<CourseReportRow>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|row| {
                    let metrics = row.metrics();
                    (row.course_id, metrics)
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn metrics(&self, course_id: &str) -> Option<&BTreeMap<String, u64>> {
        self.rows.get(course_id)
    }

    /// Every metric key seen in any course, sorted
    pub fn headings(&self) -> Vec<&str> {
        self.rows
            .values()
            .flat_map(|metrics| metrics.keys().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Plain => Ok(self.render_plain()),
            ReportFormat::Table => Ok(self.render_table()),
            ReportFormat::Json => self.render_json(),
        }
    }

    pub fn render_plain(&self) -> String {
        let headings = self.headings();
        let mut out = String::new();

        out.push_str(&format!("{:>width$}", COURSE_ID_LABEL, width = COURSE_ID_WIDTH));
        for heading in &headings {
            out.push_str(&format!(" {:>width$}", heading, width = METRIC_WIDTH));
        }
        out.push('\n');

        for (course_id, metrics) in &self.rows {
            out.push_str(&format!(
                "{:>width$}",
                truncate_course_id(course_id),
                width = COURSE_ID_WIDTH
            ));
            for heading in &headings {
                match metrics.get(*heading) {
                    Some(count) => {
                        out.push_str(&format!(" {:>width$}", count, width = METRIC_WIDTH))
                    }
                    None => {
                        out.push(' ');
                        out.push_str(&" ".repeat(METRIC_WIDTH));
                    }
                }
            }
            out.push('\n');
        }

        out
    }

    pub fn render_table(&self) -> String {
        let headings = self.headings();
        let mut builder = Builder::default();

        builder.push_record(
            std::iter::once(COURSE_ID_LABEL.to_string())
                .chain(headings.iter().map(|h| h.to_string())),
        );
        for (course_id, metrics) in &self.rows {
            builder.push_record(std::iter::once(course_id.clone()).chain(
                headings.iter().map(|h| {
                    metrics
                        .get(*h)
                        .map(|count| count.to_string())
                        .unwrap_or_default()
                }),
            ));
        }

        builder
            .build()
            .with(TableStyle::ascii_rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string()
    }

    pub fn render_json(&self) -> Result<String> {
        let rows: Vec<JsonRow<'_>> = self
            .rows
            .iter()
            .map(|(course_id, metrics)| JsonRow { course_id, metrics })
            .collect();
        Ok(serde_json::to_string_pretty(&rows)?)
    }
}

/// First 24 characters of a course id
pub fn truncate_course_id(course_id: &str) -> String {
    course_id.chars().take(COURSE_ID_MAX_CHARS).collect()
}
