// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Course selection for the certificate report

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::config::{MissingCoursePolicy, ReportConfig};
use crate::error::{ReportError, Result};
use crate::store::CourseStore;

/// Picks the courses to report on: one explicit course, or every listed course that has ended
pub struct CourseSelector<'a> {
    config: &'a ReportConfig,
    policy: MissingCoursePolicy,
}

impl<'a> CourseSelector<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            policy: config.missing_courses,
        }
    }

    /// Override the configured missing-course policy
    pub fn with_policy(mut self, policy: MissingCoursePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn select<S: CourseStore + ?Sized>(
        &self,
        store: &S,
        explicit: Option<&str>,
    ) -> Result<Vec<String>> {
        self.select_at(store, explicit, Utc::now())
    }

    /// Same as [`select`](Self::select) with the ended check evaluated at `now`.
    /// An explicit course is returned as-is without being looked up.
    pub fn select_at<S: CourseStore + ?Sized>(
        &self,
        store: &S,
        explicit: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Vec<String>> {
        if let Some(course_id) = explicit {
            return Ok(vec![course_id.to_string()]);
        }

        let mut seen = HashSet::new();
        let mut selected = Vec::new();

        for course_id in self.config.listed_courses() {
            if !seen.insert(course_id) {
                continue;
            }

            match store.get_course(course_id)? {
                Some(course) if course.has_ended_at(now) => selected.push(course_id.to_string()),
                Some(_) => log::debug!("{} has not ended, skipping", course_id),
                None => match self.policy {
                    MissingCoursePolicy::Fail => {
                        return Err(ReportError::CourseNotFound(course_id.to_string()))
                    }
                    MissingCoursePolicy::Skip => {
                        log::warn!("Listed course {} not found, skipping", course_id)
                    }
                },
            }
        }

        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::LmsDatabase;
    use crate::models::Course;
    use chrono::Duration;

    fn add_course(db: &LmsDatabase, id: &str, end: Option<DateTime<Utc>>) {
        db.upsert_course(&Course {
            id: id.to_string(),
            display_name: None,
            start: None,
            end,
        })
        .unwrap();
    }

    fn config(listings: &[(&str, &[&str])]) -> ReportConfig {
        let mut config = ReportConfig::default();
        for (group, ids) in listings {
            config.course_listings.insert(
                group.to_string(),
                ids.iter().map(|s| s.to_string()).collect(),
            );
        }
        config
    }

    #[test]
    fn test_selects_only_ended_courses() {
        let db = LmsDatabase::open_in_memory().unwrap();
        let now = Utc::now();
        add_course(&db, "MITx/6.002x/2012_Fall", Some(now - Duration::days(30)));
        add_course(&db, "MITx/6.002x/2013_Spring", Some(now + Duration::days(30)));
        add_course(&db, "HarvardX/CS50x/2012", None);
        let config = config(&[
            ("fall", &["MITx/6.002x/2012_Fall", "HarvardX/CS50x/2012"]),
            ("spring", &["MITx/6.002x/2013_Spring"]),
        ]);

        let selected = CourseSelector::new(&config).select_at(&db, None, now).unwrap();
        assert_eq!(selected, vec!["MITx/6.002x/2012_Fall".to_string()]);
    }

    #[test]
    fn test_explicit_course_bypasses_filter() {
        let db = LmsDatabase::open_in_memory().unwrap();
        let now = Utc::now();
        add_course(&db, "MITx/6.002x/2013_Spring", Some(now + Duration::days(30)));
        let config = config(&[("spring", &["MITx/6.002x/2013_Spring"])]);
        let selector = CourseSelector::new(&config);

        let selected = selector
            .select_at(&db, Some("MITx/6.002x/2013_Spring"), now)
            .unwrap();
        assert_eq!(selected, vec!["MITx/6.002x/2013_Spring".to_string()]);

        // Not even looked up
        let selected = selector.select_at(&db, Some("no/such/course"), now).unwrap();
        assert_eq!(selected, vec!["no/such/course".to_string()]);
    }

    #[test]
    fn test_missing_course_fails_by_default() {
        let db = LmsDatabase::open_in_memory().unwrap();
        let config = config(&[("all", &["no/such/course"])]);

        let err = CourseSelector::new(&config).select(&db, None).unwrap_err();
        assert!(matches!(err, ReportError::CourseNotFound(ref id) if id == "no/such/course"));
    }

    #[test]
    fn test_missing_course_skipped_with_policy() {
        let db = LmsDatabase::open_in_memory().unwrap();
        let now = Utc::now();
        add_course(&db, "edX/Demo/2014", Some(now - Duration::days(1)));
        let config = config(&[("all", &["no/such/course", "edX/Demo/2014"])]);

        let selected = CourseSelector::new(&config)
            .with_policy(MissingCoursePolicy::Skip)
            .select_at(&db, None, now)
            .unwrap();
        assert_eq!(selected, vec!["edX/Demo/2014".to_string()]);
    }

    #[test]
    fn test_duplicate_listings_reported_once() {
        let db = LmsDatabase::open_in_memory().unwrap();
        let now = Utc::now();
        add_course(&db, "edX/Demo/2014", Some(now - Duration::days(1)));
        let config = config(&[("a", &["edX/Demo/2014"]), ("b", &["edX/Demo/2014"])]);

        let selected = CourseSelector::new(&config).select_at(&db, None, now).unwrap();
        assert_eq!(selected.len(), 1);
    }
}
