// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Read interfaces the report is built against

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::Course;

/// Certificate column used for grouped counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Mode,
    Status,
}

impl GroupBy {
    pub fn column(&self) -> &'static str {
        match self {
            GroupBy::Mode => "mode",
            GroupBy::Status => "status",
        }
    }
}

pub trait CourseStore {
    /// Look up a course by id; `Ok(None)` if it does not exist
    fn get_course(&self, course_id: &str) -> Result<Option<Course>>;
}

pub trait EnrollmentStore {
    /// Count enrollments for a course, optionally only active or only inactive ones
    fn count_enrollments(&self, course_id: &str, is_active: Option<bool>) -> Result<u64>;
}

pub trait CertificateStore {
    /// Count certificate rows for a course matching the optional mode and status
    fn count_certificates(
        &self,
        course_id: &str,
        mode: Option<&str>,
        status: Option<&str>,
    ) -> Result<u64>;

    /// Count certificate rows for a course per distinct value of `by`,
    /// optionally restricted to one status
    fn group_certificates(
        &self,
        course_id: &str,
        by: GroupBy,
        status: Option<&str>,
    ) -> Result<BTreeMap<String, u64>>;
}

/// Everything the certificate report reads
pub trait LmsStore: CourseStore + EnrollmentStore + CertificateStore {}

impl<T: CourseStore + EnrollmentStore + CertificateStore> LmsStore for T {}
