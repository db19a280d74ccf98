// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: AGPL-3.0-only
//! Terminal styling for command status output
//!
//! Report bodies are never colored so they stay byte-stable; only the
//! surrounding status lines use these helpers.

use colored::{ColoredString, Colorize};

/// Status indicators with consistent colors
pub struct Status;

impl Status {
    /// Success indicator: `[OK]` in green
    pub fn ok() -> ColoredString {
        "[OK]".green()
    }

    /// Info indicator: `[i]` in cyan
    pub fn info() -> ColoredString {
        "[i]".cyan()
    }

    /// Warning indicator: `[!]` in yellow
    pub fn warn() -> ColoredString {
        "[!]".yellow()
    }

    /// Add/created indicator: `[+]` in green bold
    pub fn add() -> ColoredString {
        "[+]".green().bold()
    }
}

/// Text styling helpers
pub trait StyledText {
    /// Style as a course id or path (cyan)
    fn path(&self) -> ColoredString;
    /// Style as a count (yellow)
    fn count(&self) -> ColoredString;
}

impl StyledText for str {
    fn path(&self) -> ColoredString {
        self.cyan()
    }

    fn count(&self) -> ColoredString {
        self.yellow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicators_keep_their_text() {
        colored::control::set_override(false);
        assert_eq!(Status::ok().to_string(), "[OK]");
        assert_eq!(Status::add().to_string(), "[+]");
        assert_eq!("edX/Demo/2014".path().to_string(), "edX/Demo/2014");
        assert_eq!("12".count().to_string(), "12");
    }
}
