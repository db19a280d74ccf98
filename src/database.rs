// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! SQLite-backed LMS store
//!
//! Holds the courses, users, enrollments and certificates the report reads,
//! plus the write operations used by the seeding and data-entry commands.
//!
//! ## Schema Overview
//!
//! ```text
//! +-----------------+     +-----------------+     +-----------------+
//! |     Courses     |     |      Users      |----<|   Enrollments   |
//! +-----------------+     +-----------------+     +-----------------+
//!          .                       |
//!          .                       v
//!          .              +-----------------+
//!          . . . . . . . .|  Certificates   |
//!                         +-----------------+
//! ```
//!
//! Enrollments and certificates refer to courses by id only.

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ReportError, Result};
use crate::models::{Certificate, Course, User};
use crate::store::{CertificateStore, CourseStore, EnrollmentStore, GroupBy};

/// Row counts across the whole store
#[derive(Debug, Clone, Default)]
pub struct DatabaseStats {
    pub course_count: u64,
    pub user_count: u64,
    pub enrollment_count: u64,
    pub certificate_count: u64,
}

/// LMS database manager
pub struct LmsDatabase {
    conn: Connection,
}

impl LmsDatabase {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;

        let db = LmsDatabase { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;

        let db = LmsDatabase { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema
    fn initialize(&self) -> Result<()> {
        self.conn
            .execute_batch(include_str!("sql/schema.sql"))
            .map_err(|e| ReportError::DatabaseError(format!("schema initialization: {}", e)))
    }

    /// Run `f` inside one transaction; nothing is committed if it fails
    pub fn with_transaction<T>(&self, f: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }

    // -------------------------------------------------------------------------
    // Course Operations
    // -------------------------------------------------------------------------

    /// Insert or update a course
    pub fn upsert_course(&self, course: &Course) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO courses (id, display_name, start_at, end_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                display_name = excluded.display_name,
                start_at = excluded.start_at,
                end_at = excluded.end_at
            "#,
            params![
                course.id,
                course.display_name,
                course.start.map(|d| d.timestamp()),
                course.end.map(|d| d.timestamp()),
            ],
        )?;
        Ok(())
    }

    /// List all courses ordered by id
    pub fn list_courses(&self) -> Result<Vec<Course>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, display_name, start_at, end_at FROM courses ORDER BY id")?;

        let courses = stmt
            .query_map([], course_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(courses)
    }

    // -------------------------------------------------------------------------
    // User Operations
    // -------------------------------------------------------------------------

    /// Create a user account
    pub fn create_user(&self, username: &str, email: &str, name: &str) -> Result<User> {
        let created_at = Utc::now().timestamp();
        self.conn.execute(
            "INSERT INTO users (username, email, name, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![username, email, name, created_at],
        )?;

        Ok(User {
            id: self.conn.last_insert_rowid(),
            username: username.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            created_at,
        })
    }

    /// Get a user by username
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, username, email, name, created_at FROM users WHERE username = ?",
                [username],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        email: row.get(2)?,
                        name: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    // -------------------------------------------------------------------------
    // Enrollment Operations
    // -------------------------------------------------------------------------

    /// Enroll a user in a course, reactivating an inactive enrollment
    pub fn enroll(&self, user_id: i64, course_id: &str) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO enrollments (user_id, course_id, is_active)
            VALUES (?1, ?2, 1)
            ON CONFLICT(user_id, course_id) DO UPDATE SET is_active = 1
            "#,
            params![user_id, course_id],
        )?;
        Ok(())
    }

    /// Deactivate an enrollment. Returns false if the user was never enrolled.
    pub fn unenroll(&self, user_id: i64, course_id: &str) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE enrollments SET is_active = 0 WHERE user_id = ?1 AND course_id = ?2",
            params![user_id, course_id],
        )?;
        Ok(changed > 0)
    }

    // -------------------------------------------------------------------------
    // Certificate Operations
    // -------------------------------------------------------------------------

    /// Insert a certificate row unconditionally
    pub fn insert_certificate(&self, certificate: &Certificate) -> Result<()> {
        self.conn.execute(
            "INSERT INTO certificates (user_id, course_id, mode, status) VALUES (?1, ?2, ?3, ?4)",
            params![
                certificate.user_id,
                certificate.course_id,
                certificate.mode.as_str(),
                certificate.status.as_str(),
            ],
        )?;
        Ok(())
    }

    /// Update the user's certificates for the course, or insert one if none exists.
    /// Returns true if an existing certificate was updated.
    pub fn set_certificate(&self, certificate: &Certificate) -> Result<bool> {
        let updated = self.conn.execute(
            r#"
            UPDATE certificates
            SET mode = ?3, status = ?4, modified_at = strftime('%s', 'now')
            WHERE user_id = ?1 AND course_id = ?2
            "#,
            params![
                certificate.user_id,
                certificate.course_id,
                certificate.mode.as_str(),
                certificate.status.as_str(),
            ],
        )?;

        if updated == 0 {
            self.insert_certificate(certificate)?;
        }
        Ok(updated > 0)
    }

    // -------------------------------------------------------------------------
    // Statistics
    // -------------------------------------------------------------------------

    pub fn get_statistics(&self) -> Result<DatabaseStats> {
        let count = |table: &str| -> Result<u64> {
            let n: i64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", table),
                [],
                |row| row.get(0),
            )?;
            Ok(n as u64)
        };

        Ok(DatabaseStats {
            course_count: count("courses")?,
            user_count: count("users")?,
            enrollment_count: count("enrollments")?,
            certificate_count: count("certificates")?,
        })
    }
}

fn course_from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    let start: Option<i64> = row.get(2)?;
    let end: Option<i64> = row.get(3)?;
    Ok(Course {
        id: row.get(0)?,
        display_name: row.get(1)?,
        start: start.and_then(|s| DateTime::from_timestamp(s, 0)),
        end: end.and_then(|s| DateTime::from_timestamp(s, 0)),
    })
}

// =============================================================================
// Store Implementations
// =============================================================================

impl CourseStore for LmsDatabase {
    fn get_course(&self, course_id: &str) -> Result<Option<Course>> {
        let course = self
            .conn
            .query_row(
                "SELECT id, display_name, start_at, end_at FROM courses WHERE id = ?",
                [course_id],
                course_from_row,
            )
            .optional()?;
        Ok(course)
    }
}

impl EnrollmentStore for LmsDatabase {
    fn count_enrollments(&self, course_id: &str, is_active: Option<bool>) -> Result<u64> {
        let count: i64 = match is_active {
            Some(active) => self.conn.query_row(
                "SELECT COUNT(*) FROM enrollments WHERE course_id = ?1 AND is_active = ?2",
                params![course_id, active],
                |row| row.get(0),
            )?,
            None => self.conn.query_row(
                "SELECT COUNT(*) FROM enrollments WHERE course_id = ?1",
                params![course_id],
                |row| row.get(0),
            )?,
        };
        Ok(count as u64)
    }
}

impl CertificateStore for LmsDatabase {
    fn count_certificates(
        &self,
        course_id: &str,
        mode: Option<&str>,
        status: Option<&str>,
    ) -> Result<u64> {
        let mut query = String::from("SELECT COUNT(*) FROM certificates WHERE course_id = ?");
        let mut args = vec![course_id];

        if let Some(mode) = mode {
            query.push_str(" AND mode = ?");
            args.push(mode);
        }
        if let Some(status) = status {
            query.push_str(" AND status = ?");
            args.push(status);
        }

        let count: i64 = self
            .conn
            .query_row(&query, params_from_iter(args), |row| row.get(0))?;
        Ok(count as u64)
    }

    fn group_certificates(
        &self,
        course_id: &str,
        by: GroupBy,
        status: Option<&str>,
    ) -> Result<BTreeMap<String, u64>> {
        let column = by.column();
        let mut query = format!(
            "SELECT {}, COUNT(*) FROM certificates WHERE course_id = ?",
            column
        );
        let mut args = vec![course_id];

        if let Some(status) = status {
            query.push_str(" AND status = ?");
            args.push(status);
        }
        query.push_str(&format!(" GROUP BY {}", column));

        let mut stmt = self.conn.prepare(&query)?;
        let groups = stmt
            .query_map(params_from_iter(args), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
            })?
            .collect::<std::result::Result<BTreeMap<_, _>, _>>()?;

        Ok(groups)
    }
}
