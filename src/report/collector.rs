// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Per-course enrollment and certificate counts

use crate::error::Result;
use crate::models::{CertificateMode, CertificateStatus, CourseReportRow};
use crate::store::{GroupBy, LmsStore};

/// Collects one [`CourseReportRow`] per course from an [`LmsStore`]
pub struct MetricsCollector<'a, S: LmsStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: LmsStore + ?Sized> MetricsCollector<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Run every count for `course_id`. Any failing query fails the whole row.
    pub fn collect(&self, course_id: &str) -> Result<CourseReportRow> {
        let store = self.store;
        let downloadable = CertificateStatus::Downloadable;

        let row = CourseReportRow {
            course_id: course_id.to_string(),
            enrolled_current: store.count_enrollments(course_id, Some(true))?,
            enrolled_total: store.count_enrollments(course_id, None)?,
            // Certificate rows per mode, whatever their status
            verified_enrolled: store.count_certificates(
                course_id,
                Some(CertificateMode::Verified.as_str()),
                None,
            )?,
            honor_enrolled: store.count_certificates(
                course_id,
                Some(CertificateMode::Honor.as_str()),
                None,
            )?,
            audit_enrolled: store.count_certificates(
                course_id,
                Some(CertificateMode::Audit.as_str()),
                None,
            )?,
            status_tally: store.group_certificates(course_id, GroupBy::Status, None)?,
            mode_tally: store.group_certificates(
                course_id,
                GroupBy::Mode,
                Some(downloadable.as_str()),
            )?,
        };

        log::debug!(
            "{}: {} enrolled ({} active), {} statuses, {} downloadable modes",
            course_id,
            row.enrolled_total,
            row.enrolled_current,
            row.status_tally.len(),
            row.mode_tally.len()
        );

        Ok(row)
    }
}
