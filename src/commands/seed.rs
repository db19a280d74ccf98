// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Random user seeding command

use anyhow::{Context, Result};

use crate::colors::{Status, StyledText};
use crate::database::LmsDatabase;
use crate::models::CourseKey;
use crate::seed::create_random_users;

/// Create `count` random users, enrolling them in `course` if given
pub fn seed_users(db: &LmsDatabase, count: u64, course: Option<&str>) -> Result<()> {
    let course_key = course
        .map(|c| c.parse::<CourseKey>())
        .transpose()
        .context("Course must be course-v1:ORG+NUM+RUN or ORG/NUM/RUN")?;

    let count = usize::try_from(count).context("User count does not fit in memory")?;
    let users = create_random_users(db, count, course_key.as_ref())?;

    match &course_key {
        Some(key) => println!(
            "{} Created {} users enrolled in {}",
            Status::ok(),
            users.len().to_string().as_str().count(),
            key.to_string().as_str().path()
        ),
        None => println!(
            "{} Created {} users",
            Status::ok(),
            users.len().to_string().as_str().count()
        ),
    }

    Ok(())
}
