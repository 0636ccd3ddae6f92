//! Source files and whole-design assembly.

use vscan_diagnostics::DiagnosticSink;

use crate::comments::strip_comments;
use crate::module::emit_modules;

/// Keyword whose presence marks a file as simulation-only.
const TESTBENCH_MARKER: &str = "initial";

/// One source file's decoded contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceText {
    /// Where the text came from, used as the diagnostic origin.
    pub origin: String,
    /// The file contents.
    pub text: String,
}

impl SourceText {
    /// Wraps already-decoded text.
    pub fn new(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            text: text.into(),
        }
    }

    /// Decodes raw bytes as UTF-8, replacing invalid sequences.
    pub fn from_bytes(origin: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(origin, String::from_utf8_lossy(bytes))
    }

    /// Returns `true` if the text contains `initial` anywhere.
    ///
    /// This is a substring test, so identifiers such as `initial_value` and
    /// occurrences inside comments also count.
    pub fn is_testbench(&self) -> bool {
        self.text.contains(TESTBENCH_MARKER)
    }
}

/// Concatenates the module definitions of every source into one design text.
///
/// Each file is comment-stripped and reduced to its modules before joining, so
/// text outside modules never reaches later stages.
pub fn assemble_design(sources: &[SourceText], sink: &DiagnosticSink) -> String {
    sources
        .iter()
        .map(|src| emit_modules(&strip_comments(&src.text), &src.origin, sink))
        .collect::<Vec<_>>()
        .join("\n")
}
