// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Command implementations

mod certificate;
mod course;
mod report;
mod seed;

pub use certificate::*;
pub use course::*;
pub use report::*;
pub use seed::*;

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::ReportConfig;
use crate::database::LmsDatabase;

/// Open the LMS database named on the command line or in the configuration
pub fn open_database(db: Option<&Path>, config: &ReportConfig) -> Result<LmsDatabase> {
    let path = config.database_path(db)?;
    log::debug!("Opening database {}", path.display());
    LmsDatabase::open(&path).with_context(|| format!("Failed to open database {}", path.display()))
}
