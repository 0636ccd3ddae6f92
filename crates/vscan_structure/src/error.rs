//! Error types for structural recovery.

/// Errors raised by structural recovery.
///
/// Coverage shortfalls are not errors: they are reported as warnings through a
/// [`DiagnosticSink`](vscan_diagnostics::DiagnosticSink) and recovery continues
/// with partial results.
#[derive(Debug, thiserror::Error)]
pub enum StructureError {
    /// A module body had no recognizable `module NAME (...);` header.
    #[error("no module header found in text starting `{excerpt}`")]
    MissingHeader {
        /// The first few characters of the offending text.
        excerpt: String,
    },

    /// The summary record could not be serialized.
    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The summary record could not be written to its destination.
    #[error("failed to write summary: {0}")]
    Io(#[from] std::io::Error),
}

impl StructureError {
    pub(crate) fn missing_header(text: &str) -> Self {
        let excerpt: String = text.trim_start().chars().take(32).collect();
        StructureError::MissingHeader {
            excerpt: excerpt.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_excerpt_is_short_and_flat() {
        let err = StructureError::missing_header("\n  wire a;\n  assign a = 1'b0;\n  and more text that goes on");
        let msg = err.to_string();
        assert!(msg.starts_with("no module header found in text starting `wire a; assign"));
        assert!(!msg.contains('\n'));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StructureError = io.into();
        assert!(err.to_string().starts_with("failed to write summary:"));
    }
}
