// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Certificate management commands

use anyhow::Result;

use crate::colors::{Status, StyledText};
use crate::database::LmsDatabase;
use crate::error::ReportError;
use crate::models::{Certificate, CertificateMode, CertificateStatus};

/// Set a user's certificate for a course, creating it if needed
pub fn certificate_set(
    db: &LmsDatabase,
    username: &str,
    course_id: &str,
    mode: &str,
    status: &str,
) -> Result<()> {
    let user = db
        .get_user_by_username(username)?
        .ok_or_else(|| ReportError::UserNotFound(username.to_string()))?;

    let certificate = Certificate {
        user_id: user.id,
        course_id: course_id.to_string(),
        mode: CertificateMode::from(mode.to_lowercase()),
        status: CertificateStatus::from(status.to_lowercase()),
    };

    for value in unrecognized_values(&certificate) {
        println!("{} Unrecognized value '{}' stored as-is", Status::warn(), value);
    }

    let updated = db.set_certificate(&certificate)?;
    println!(
        "{} {} certificate for {} in {}: {} / {}",
        Status::ok(),
        if updated { "Updated" } else { "Created" },
        username,
        course_id.path(),
        certificate.mode,
        certificate.status
    );
    Ok(())
}

/// Mode and status values outside the known sets, mode first
fn unrecognized_values(certificate: &Certificate) -> Vec<&str> {
    let mut values = Vec::new();
    if let CertificateMode::Other(mode) = &certificate.mode {
        values.push(mode.as_str());
    }
    if let CertificateStatus::Other(status) = &certificate.status {
        values.push(status.as_str());
    }
    values
}
