//! Clocked procedural block extraction.
//!
//! `always @(...) begin ... end` regions nest arbitrarily deep, which a single
//! regular expression cannot balance. The opening is found by pattern and the
//! matching `end` by counting `begin`/`end` keywords from there.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use vscan_diagnostics::{Diagnostic, DiagnosticSink};

use crate::codes;

/// `always @(<trigger>) begin`, trigger in group 1.
static ALWAYS_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\balways\s*@\s*\(([^)]*)\)\s*begin\b").unwrap());

static BLOCK_KEYWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:begin|end)\b").unwrap());

/// One clocked procedural region.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SequentialBlock {
    /// The raw sensitivity list, e.g. `posedge clk or negedge rst_n`.
    pub trigger: String,
    /// Everything between the opening `begin` and its matching `end`.
    pub body: String,
}

/// An opening whose matching `end` never arrived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnclosedBlock {
    /// The raw sensitivity list of the skipped opening.
    pub trigger: String,
    /// Byte offset of the `always` keyword in the scanned text.
    pub offset: usize,
}

/// Result of scanning one module body.
#[derive(Clone, Debug, Default)]
pub struct BlockScan {
    /// Closed blocks in source order.
    pub blocks: Vec<SequentialBlock>,
    /// Openings skipped for lack of a matching `end`.
    pub unclosed: Vec<UnclosedBlock>,
}

impl BlockScan {
    /// Emits one [`codes::UNCLOSED_BLOCK`] warning per skipped opening.
    pub fn report_unclosed(&self, module: &str, sink: &DiagnosticSink) {
        for open in &self.unclosed {
            sink.emit(
                Diagnostic::warning(
                    codes::UNCLOSED_BLOCK,
                    "sequential block has no matching `end` and was skipped",
                )
                .with_origin(module)
                .with_note(format!(
                    "trigger `{}` at byte {} of the module text",
                    open.trigger, open.offset
                )),
            );
        }
    }
}

/// Finds every `always @(...) begin` block of a module body, in order.
pub fn extract_sequential_blocks(text: &str) -> BlockScan {
    let mut scan = BlockScan::default();
    let mut pos = 0;

    while let Some(caps) = ALWAYS_OPEN.captures_at(text, pos) {
        let Some(open) = caps.get(0) else { break };
        let trigger = caps[1].trim().to_string();

        match matching_end(text, open.end()) {
            Some((end_start, end_end)) => {
                scan.blocks.push(SequentialBlock {
                    trigger,
                    body: text[open.end()..end_start].to_string(),
                });
                pos = end_end;
            }
            None => {
                scan.unclosed.push(UnclosedBlock {
                    trigger,
                    offset: open.start(),
                });
                pos = open.end();
            }
        }
    }

    scan
}

/// Locates the `end` balancing a `begin` that finished at `from`.
fn matching_end(text: &str, from: usize) -> Option<(usize, usize)> {
    let mut depth = 1usize;
    let mut cursor = from;
    while let Some(kw) = BLOCK_KEYWORD.find_at(text, cursor) {
        if kw.as_str() == "begin" {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return Some((kw.start(), kw.end()));
            }
        }
        cursor = kw.end();
    }
    None
}
