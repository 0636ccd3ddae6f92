//! The per-run summary record and its JSON-lines serialization.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::io::Write;

use crate::error::StructureError;

/// Literal written in place of a clock that could not be inferred.
pub const NO_CLOCK: &str = "None";

/// Top-module candidates paired position-by-position with their clocks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    /// Top-module candidates in collection order.
    pub top_module_candidates: Vec<String>,
    /// The inferred clock of each candidate; `None` serializes as `"None"`.
    #[serde(with = "clock_list")]
    pub top_module_clocks: Vec<Option<String>>,
}

/// One line of the summary log: what was scanned and what was found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    /// The scanned design directory.
    pub design_dir: String,
    /// The files that took part, after filtering.
    pub file_list: Vec<String>,
    /// The analysis result.
    #[serde(flatten)]
    pub summary: AnalysisSummary,
}

/// Appends `record` as one JSON line to `dest` and flushes.
pub fn write_summary<T, W>(record: &T, mut dest: W) -> Result<(), StructureError>
where
    T: Serialize,
    W: Write,
{
    serde_json::to_writer(&mut dest, record)?;
    dest.write_all(b"\n")?;
    dest.flush()?;
    Ok(())
}

mod clock_list {
    use super::*;

    pub fn serialize<S: Serializer>(clocks: &[Option<String>], ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_seq(clocks.iter().map(|c| c.as_deref().unwrap_or(NO_CLOCK)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<Option<String>>, D::Error> {
        let raw = Vec::<String>::deserialize(de)?;
        Ok(raw
            .into_iter()
            .map(|c| (c != NO_CLOCK).then_some(c))
            .collect())
    }
}
