// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Synthetic user accounts for exercising reports against realistic volumes

use rand::Rng;
use rusqlite::ErrorCode;

use crate::database::LmsDatabase;
use crate::error::{ReportError, Result};
use crate::models::{CourseKey, User};

const UPPER_DIGITS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Attempts per account before giving up on username/email collisions
const MAX_ATTEMPTS: usize = 5;

/// Largest number of users a single seeding run may create
pub const MAX_SEED_USERS: usize = 100_000;

/// Randomly generated account parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomAccount {
    pub username: String,
    pub email: String,
    pub name: String,
}

impl RandomAccount {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            username: format!("random_{}", random_string(rng, 6, UPPER_DIGITS)),
            email: format!("{}_dummy_test@example.com", random_string(rng, 10, LOWER)),
            name: format!(
                "{} {}",
                random_string(rng, 5, LOWER),
                random_string(rng, 7, LOWER)
            ),
        }
    }
}

fn random_string<R: Rng + ?Sized>(rng: &mut R, len: usize, charset: &[u8]) -> String {
    (0..len)
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect()
}

fn is_unique_violation(err: &ReportError) -> bool {
    matches!(
        err,
        ReportError::SqliteError(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation
    )
}

/// Create `count` random users, enrolling each in `course` when given.
/// All accounts are created in one transaction.
pub fn create_random_users(
    db: &LmsDatabase,
    count: usize,
    course: Option<&CourseKey>,
) -> Result<Vec<User>> {
    if count > MAX_SEED_USERS {
        return Err(ReportError::TooManyUsers(count, MAX_SEED_USERS));
    }

    let course_id = course.map(|key| key.to_string());
    let mut rng = rand::thread_rng();

    db.with_transaction(|db| {
        let mut users = Vec::with_capacity(count);
        for _ in 0..count {
            let user = create_one(db, &mut rng)?;
            if let Some(course_id) = &course_id {
                db.enroll(user.id, course_id)?;
            }
            log::debug!("Created {} <{}>", user.username, user.email);
            users.push(user);
        }
        Ok(users)
    })
}

fn create_one<R: Rng + ?Sized>(db: &LmsDatabase, rng: &mut R) -> Result<User> {
    let mut attempt = 0;
    loop {
        let account = RandomAccount::generate(rng);
        match db.create_user(&account.username, &account.email, &account.name) {
            Err(e) if is_unique_violation(&e) && attempt + 1 < MAX_ATTEMPTS => {
                log::debug!("{} already taken, retrying", account.username);
                attempt += 1;
            }
            result => return result,
        }
    }
}
