//! Stable identifiers for each kind of finding a scan can report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of finding a code names; rendered as the code's leading letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// `E`: a structural match the scan depends on is missing.
    Error,
    /// `W`: recovery was partial, e.g. modules or blocks were skipped.
    Warning,
    /// `A`: the scan had to pick between equally plausible answers.
    Ambiguity,
}

impl Category {
    /// The letter this category contributes to a rendered code.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Ambiguity => 'A',
        }
    }
}

/// A finding identifier such as `W101` or `A102`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// Leading letter.
    pub category: Category,
    /// Number rendered as three digits after the letter.
    pub number: u16,
}

impl DiagnosticCode {
    /// Pairs a category with a number; usable in `const` items.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
