//! How much a finding should worry the reader.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seriousness of a finding. Later variants compare greater.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A suggestion only.
    Help,
    /// The scan picked one answer among several; nothing is wrong.
    Note,
    /// Some structure was likely skipped.
    Warning,
    /// A required structural match was absent; `scan` exits non-zero.
    Error,
}

impl Severity {
    /// Whether this severity fails a scan.
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Lowercase label used in rendered output and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Help => "help",
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Bold ANSI colour for the rendered label.
    pub(crate) fn ansi(self) -> &'static str {
        match self {
            Severity::Help => "\x1b[1;36m",
            Severity::Note => "\x1b[1;32m",
            Severity::Warning => "\x1b[1;33m",
            Severity::Error => "\x1b[1;31m",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
