//! Configuration types deserialized from `vscan.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// The top-level configuration parsed from `vscan.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct ScanConfig {
    /// Source discovery settings.
    #[serde(default)]
    pub scan: DiscoveryConfig,
    /// Clock inference settings.
    #[serde(default)]
    pub clock: ClockConfig,
    /// Summary log settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Which files under the design directory take part in the scan.
#[derive(Debug, Deserialize)]
pub struct DiscoveryConfig {
    /// File extensions to collect, without the leading dot.
    ///
    /// Accepts either `extensions = "v"` or `extensions = ["v", "sv"]`.
    #[serde(
        default = "default_extensions",
        deserialize_with = "deserialize_string_or_vec"
    )]
    pub extensions: Vec<String>,
    /// Drop files that look like testbenches (contain `initial`).
    #[serde(default = "default_true")]
    pub filter_testbenches: bool,
    /// Path substrings; any file whose path contains one is skipped.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            filter_testbenches: true,
            exclude: Vec::new(),
        }
    }
}

/// Naming conventions consulted by clock inference.
#[derive(Debug, Deserialize)]
pub struct ClockConfig {
    /// Case-insensitive substrings that mark an identifier as clock-like.
    #[serde(default = "default_name_hints")]
    pub name_hints: Vec<String>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            name_hints: default_name_hints(),
        }
    }
}

/// Where the per-run JSON summary is appended.
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Path of the JSON-lines log file.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["v".to_string()]
}

fn default_name_hints() -> Vec<String> {
    vec!["clk".to_string(), "clock".to_string()]
}

fn default_log_file() -> PathBuf {
    PathBuf::from("vscan.log")
}

fn default_true() -> bool {
    true
}

/// Deserializes a field that can be either a single string or a list of strings.
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
