//! Failures while reading `vscan.toml`.

/// Why a `vscan.toml` could not be turned into a [`ScanConfig`](crate::ScanConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read vscan.toml: {0}")]
    IoError(#[from] std::io::Error),

    /// The text is not valid TOML or does not fit the schema.
    #[error("malformed vscan.toml: {0}")]
    ParseError(String),

    /// A value parsed but is unusable, such as an empty extension list.
    #[error("invalid vscan.toml: {0}")]
    ValidationError(String),
}
