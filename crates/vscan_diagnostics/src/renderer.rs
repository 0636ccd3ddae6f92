//! Diagnostic rendering for human-readable terminal output.

use crate::diagnostic::Diagnostic;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[W101]: 1 module(s) may have been missed
///   --> rtl/alu.v
///    = note: 3 `endmodule` keyword(s), 2 module(s) extracted
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();

        if self.color {
            out.push_str(&format!(
                "{}{}[{}]{RESET}{BOLD}: {}{RESET}\n",
                diag.severity.ansi(),
                diag.severity,
                diag.code,
                diag.message
            ));
        } else {
            out.push_str(&format!(
                "{}[{}]: {}\n",
                diag.severity, diag.code, diag.message
            ));
        }

        if let Some(origin) = &diag.origin {
            out.push_str(&format!("  --> {origin}\n"));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }

        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}
