//! Diagnostic codes emitted by structural recovery.

use vscan_diagnostics::{Category, DiagnosticCode};

/// A module body has no recognizable header, so its ports are unknown.
pub const MISSING_HEADER: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);

/// More `endmodule` keywords than extracted modules.
pub const MODULE_COVERAGE: DiagnosticCode = DiagnosticCode::new(Category::Warning, 101);

/// An `always @(...) begin` with no matching `end`.
pub const UNCLOSED_BLOCK: DiagnosticCode = DiagnosticCode::new(Category::Warning, 102);

/// Several independent top-level hierarchies.
pub const MULTIPLE_TOPS: DiagnosticCode = DiagnosticCode::new(Category::Ambiguity, 101);

/// More than one clock candidate survived narrowing.
pub const AMBIGUOUS_CLOCK: DiagnosticCode = DiagnosticCode::new(Category::Ambiguity, 102);
