// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Course management commands

use anyhow::{Context, Result};
use tabled::{settings::Style as TableStyle, Table, Tabled};

use crate::colors::{Status, StyledText};
use crate::database::LmsDatabase;
use crate::models::{parse_date, Course, CourseKey};

#[derive(Tabled)]
struct CourseRow {
    #[tabled(rename = "Course ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Ended")]
    ended: String,
}

/// Add or update a course
pub fn course_add(
    db: &LmsDatabase,
    course_id: &str,
    name: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<()> {
    let key: CourseKey = course_id
        .parse()
        .context("Course must be course-v1:ORG+NUM+RUN or ORG/NUM/RUN")?;

    let course = Course {
        id: key.to_string(),
        display_name: name.map(str::to_string),
        start: start.map(parse_date).transpose()?,
        end: end.map(parse_date).transpose()?,
    };
    db.upsert_course(&course)?;

    println!("{} Saved course {}", Status::add(), course.id.as_str().path());
    Ok(())
}

/// List all courses
pub fn course_list(db: &LmsDatabase) -> Result<()> {
    let courses = db.list_courses()?;

    if courses.is_empty() {
        println!("{} No courses found.", Status::info());
        return Ok(());
    }

    let fmt_date = |d: Option<chrono::DateTime<chrono::Utc>>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    let rows: Vec<CourseRow> = courses
        .iter()
        .map(|c| CourseRow {
            id: c.id.clone(),
            name: c.display_name.clone().unwrap_or_default(),
            start: fmt_date(c.start),
            end: fmt_date(c.end),
            ended: if c.has_ended() { "Yes" } else { "No" }.to_string(),
        })
        .collect();

    let table = Table::new(rows)
        .with(TableStyle::ascii_rounded())
        .to_string();

    println!("{}", table);
    println!("\nTotal courses: {}", courses.len());
    Ok(())
}
