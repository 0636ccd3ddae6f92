//! Clock signal inference.
//!
//! Two stages, tried in order:
//!
//! - **Port naming.** The first port whose name contains a clock hint.
//! - **Trigger narrowing.** Every identifier qualified by `posedge`/`negedge`
//!   in a sequential block's trigger is a candidate. Candidates read as a
//!   plain token in any block body are dropped, since a clock appears only in
//!   trigger position. If several remain, only clock-like names are kept.
//!   Ties go to the lexicographically first survivor.

use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use crate::sequential::{extract_sequential_blocks, SequentialBlock};

static EDGE_SIGNAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:posedge|negedge)\s+([A-Za-z_][A-Za-z0-9_$]*)").unwrap()
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_$]*").unwrap());

/// Case-insensitive substrings that mark an identifier as clock-like.
#[derive(Clone, Debug)]
pub struct ClockHints {
    hints: Vec<String>,
}

impl ClockHints {
    /// Builds hints from the given substrings.
    pub fn new<I, S>(hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            hints: hints
                .into_iter()
                .map(|h| h.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Returns `true` if `ident` contains any hint, ignoring case.
    pub fn matches(&self, ident: &str) -> bool {
        let lower = ident.to_lowercase();
        self.hints.iter().any(|h| lower.contains(h.as_str()))
    }
}

impl Default for ClockHints {
    fn default() -> Self {
        Self::new(["clk", "clock"])
    }
}

/// Which stage produced a clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockEvidence {
    /// Resolved from sequential-block triggers.
    Trigger,
    /// Resolved from the triggers of directly instantiated modules.
    Instance,
    /// Resolved from a clock-like port name.
    Port,
    /// Nothing resolved.
    Unresolved,
}

/// The outcome of clock inference for one module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClockResolution {
    /// The chosen clock, if any.
    pub clock: Option<String>,
    /// Which stage produced it.
    pub evidence: ClockEvidence,
    /// All trigger survivors when more than one remained; empty otherwise.
    pub tied: Vec<String>,
}

impl ClockResolution {
    pub(crate) fn unresolved() -> Self {
        Self {
            clock: None,
            evidence: ClockEvidence::Unresolved,
            tied: Vec::new(),
        }
    }
}

/// Infers the clock of one module from its body and port list.
pub fn infer_clock(body: &str, ports: &[String], hints: &ClockHints) -> Option<String> {
    let scan = extract_sequential_blocks(body);
    resolve_clock(&scan.blocks, ports, hints).clock
}

/// Runs port naming, then trigger narrowing over `blocks` if no port is clock-like.
pub fn resolve_clock(
    blocks: &[SequentialBlock],
    ports: &[String],
    hints: &ClockHints,
) -> ClockResolution {
    port_resolution(ports, hints)
        .unwrap_or_else(|| resolve_from_candidates(edge_candidates(blocks), blocks, hints))
}

/// The port-naming stage alone; `None` when no port is clock-like.
pub fn port_resolution(ports: &[String], hints: &ClockHints) -> Option<ClockResolution> {
    clock_from_ports(ports, hints).map(|port| ClockResolution {
        clock: Some(port.to_string()),
        evidence: ClockEvidence::Port,
        tied: Vec::new(),
    })
}

/// The trigger-narrowing stage over an explicit candidate set.
///
/// `blocks` are the bodies scanned for plain-token use.
pub fn resolve_from_candidates(
    candidates: BTreeSet<String>,
    blocks: &[SequentialBlock],
    hints: &ClockHints,
) -> ClockResolution {
    let survivors = narrow_by_name(narrow_by_usage(candidates, blocks), hints);
    let Some(first) = survivors.iter().next() else {
        return ClockResolution::unresolved();
    };
    ClockResolution {
        clock: Some(first.clone()),
        evidence: ClockEvidence::Trigger,
        tied: if survivors.len() > 1 {
            survivors.iter().cloned().collect()
        } else {
            Vec::new()
        },
    }
}

/// The first port whose name contains a clock hint.
pub fn clock_from_ports<'a>(ports: &'a [String], hints: &ClockHints) -> Option<&'a str> {
    ports
        .iter()
        .map(String::as_str)
        .find(|port| hints.matches(port))
}

/// Identifiers qualified by `posedge`/`negedge` in any block's trigger.
///
/// A wildcard (`*`) or level-sensitive trigger contributes nothing.
pub fn edge_candidates(blocks: &[SequentialBlock]) -> BTreeSet<String> {
    blocks
        .iter()
        .flat_map(|block| {
            EDGE_SIGNAL
                .captures_iter(&block.trigger)
                .map(|caps| caps[1].to_string())
        })
        .collect()
}

/// Drops candidates that appear as a plain token inside any block body.
pub fn narrow_by_usage(
    candidates: BTreeSet<String>,
    blocks: &[SequentialBlock],
) -> BTreeSet<String> {
    let referenced: HashSet<&str> = blocks
        .iter()
        .flat_map(|block| IDENTIFIER.find_iter(&block.body).map(|m| m.as_str()))
        .collect();
    candidates
        .into_iter()
        .filter(|c| !referenced.contains(c.as_str()))
        .collect()
}

/// With more than one survivor, keeps only clock-like names.
pub fn narrow_by_name(survivors: BTreeSet<String>, hints: &ClockHints) -> BTreeSet<String> {
    if survivors.len() <= 1 {
        return survivors;
    }
    survivors.into_iter().filter(|s| hints.matches(s)).collect()
}
