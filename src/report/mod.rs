// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Certificate status report
//!
//! Counts enrollments and certificates per course, then renders one row per
//! course with one column per metric observed anywhere in the run.
//!
//! - [`CourseSelector`] - which courses to report on
//! - [`MetricsCollector`] - enrollment and certificate counts for one course
//! - [`CertificateReport`] - column discovery and rendering

pub mod collector;
pub mod render;
pub mod selector;

pub use collector::MetricsCollector;
pub use render::{CertificateReport, ReportFormat};
pub use selector::CourseSelector;

use crate::config::{MissingCoursePolicy, ReportConfig};
use crate::error::Result;
use crate::store::LmsStore;

/// Selects courses, collects their metrics in order and assembles the report
pub struct ReportBuilder<'a> {
    config: &'a ReportConfig,
    course: Option<&'a str>,
    policy: Option<MissingCoursePolicy>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            course: None,
            policy: None,
        }
    }

    /// Report on this course only, whether or not it has ended
    pub fn course(mut self, course_id: Option<&'a str>) -> Self {
        self.course = course_id;
        self
    }

    pub fn missing_courses(mut self, policy: MissingCoursePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn build<S: LmsStore + ?Sized>(&self, store: &S) -> Result<CertificateReport> {
        self.build_with_progress(store, |_| {})
    }

    /// Build the report, calling `on_course` before each course is collected.
    /// The first failing course aborts the run.
    pub fn build_with_progress<S, F>(&self, store: &S, mut on_course: F) -> Result<CertificateReport>
    where
        S: LmsStore + ?Sized,
        F: FnMut(&str),
    {
        let mut selector = CourseSelector::new(self.config);
        if let Some(policy) = self.policy {
            selector = selector.with_policy(policy);
        }
        let courses = selector.select(store, self.course)?;

        let collector = MetricsCollector::new(store);
        let mut rows = Vec::with_capacity(courses.len());
        for course_id in &courses {
            on_course(course_id);
            rows.push(collector.collect(course_id)?);
        }

        Ok(CertificateReport::from_rows(rows))
    }
}
