//! Module boundary extraction.
//!
//! A module is recognized as `module NAME [#(...)] (...) ;` followed by text
//! that contains no other module header, up to the first `endmodule`. The
//! optional parameter block and the port list are each matched as one
//! non-greedy parenthesized span, so a `)` followed by `;` inside either of
//! them ends the header early.

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use vscan_diagnostics::{Diagnostic, DiagnosticSink};

use crate::codes;

/// `module NAME [#(params)] (ports);` with the name in group 1.
pub(crate) static MODULE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\bmodule\s+([^(\s#]+)\s*(?:#\s*\(.*?\))?\s*\(.*?\)\s*;").unwrap()
});

/// A whole-word `module` keyword; its presence inside a candidate body rejects the body.
static NESTED_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bmodule\s").unwrap());

static ENDMODULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bendmodule").unwrap());

const TERMINATOR: &str = "endmodule";

/// One extracted module definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModuleRecord {
    /// The module name as written in its header.
    pub name: String,
    /// The verbatim text from `module` through `endmodule`, inclusive.
    pub body: String,
}

/// Extracted modules keyed by name, in order of first appearance.
///
/// Inserting a name that is already present replaces the earlier body but keeps
/// the original position.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ModuleCollection {
    modules: IndexMap<String, ModuleRecord>,
}

impl ModuleCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the record it replaced, if any.
    pub fn insert(&mut self, record: ModuleRecord) -> Option<ModuleRecord> {
        self.modules.insert(record.name.clone(), record)
    }

    /// Looks up a module by name.
    pub fn get(&self, name: &str) -> Option<&ModuleRecord> {
        self.modules.get(name)
    }

    /// Returns `true` if a module with this name was extracted.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Module names in collection order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Records in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleRecord> {
        self.modules.values()
    }

    /// Number of distinct module names.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if no module was extracted.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FromIterator<ModuleRecord> for ModuleCollection {
    fn from_iter<I: IntoIterator<Item = ModuleRecord>>(iter: I) -> Self {
        let mut collection = ModuleCollection::new();
        for record in iter {
            collection.insert(record);
        }
        collection
    }
}

/// Extracts every module definition from (comment-stripped) source text.
///
/// Duplicate names resolve last-write-wins. Emits a [`codes::MODULE_COVERAGE`]
/// warning when the text holds more `endmodule` keywords than modules found.
pub fn extract_modules(text: &str, sink: &DiagnosticSink) -> ModuleCollection {
    let records = scan_modules(text);
    check_coverage(text, records.len(), None, sink);
    records.into_iter().collect()
}

/// Re-emits the modules found in one source file as standalone text.
///
/// Each module is followed by a blank line. Text outside module definitions is
/// dropped. The coverage warning names `origin`.
pub fn emit_modules(text: &str, origin: &str, sink: &DiagnosticSink) -> String {
    let records = scan_modules(text);
    check_coverage(text, records.len(), Some(origin), sink);
    let mut out = String::new();
    for record in &records {
        out.push_str(&record.body);
        out.push_str("\n\n");
    }
    out
}

/// Finds module definitions in source order, without deduplication.
fn scan_modules(text: &str) -> Vec<ModuleRecord> {
    let mut records = Vec::new();
    let mut pos = 0;

    while let Some(caps) = MODULE_HEADER.captures_at(text, pos) {
        let Some(header) = caps.get(0) else { break };

        match module_end(text, header.end()) {
            Some(end) => {
                records.push(ModuleRecord {
                    name: caps[1].to_string(),
                    body: text[header.start()..end].to_string(),
                });
                pos = end;
            }
            // Retry from just past this `module` keyword.
            None => pos = header.start() + "module".len(),
        }
    }

    records
}

/// Byte offset just past the `endmodule` closing a body that starts at `from`.
///
/// Returns `None` when there is no `endmodule`, or when another module header
/// begins before it.
fn module_end(text: &str, from: usize) -> Option<usize> {
    let end = ENDMODULE.find_at(text, from)?;
    match NESTED_HEADER.find_at(text, from) {
        Some(nested) if nested.start() < end.start() => None,
        _ => Some(end.end()),
    }
}

fn check_coverage(text: &str, extracted: usize, origin: Option<&str>, sink: &DiagnosticSink) {
    let terminators = text.matches(TERMINATOR).count();
    if terminators <= extracted {
        return;
    }
    let mut diag = Diagnostic::warning(
        codes::MODULE_COVERAGE,
        format!(
            "{} module(s) may have been missed during extraction",
            terminators - extracted
        ),
    )
    .with_note(format!(
        "found {terminators} `{TERMINATOR}` keyword(s) but extracted {extracted} module(s)"
    ))
    .with_help("modules without a port list or with nested parentheses in the header are not recognized");
    if let Some(origin) = origin {
        diag = diag.with_origin(origin);
    }
    sink.emit(diag);
}

#[cfg(test)]
mod tests {
    use super::*;
    use vscan_diagnostics::Severity;

    fn extract(text: &str) -> (ModuleCollection, DiagnosticSink) {
        let sink = DiagnosticSink::new();
        let modules = extract_modules(text, &sink);
        (modules, sink)
    }

    #[test]
    fn single_module_spans_header_to_terminator() {
        let src = "`timescale 1ns/1ps\nmodule counter(input clk, output reg [3:0] q);\n  always @(posedge clk) q <= q + 1;\nendmodule\n";
        let (modules, sink) = extract(src);
        assert_eq!(modules.len(), 1);
        let record = modules.get("counter").unwrap();
        assert!(record.body.starts_with("module counter("));
        assert!(record.body.ends_with("endmodule"));
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn parameterized_header() {
        let src = "module fifo #(parameter DEPTH = 16, parameter W = 8) (\n  input clk,\n  input [W-1:0] din\n);\nendmodule";
        let (modules, _) = extract(src);
        assert_eq!(modules.names().collect::<Vec<_>>(), vec!["fifo"]);
    }

    #[test]
    fn name_stops_at_parameter_marker() {
        let src = "module fifo#(parameter W = 8)(input clk);\nendmodule";
        let (modules, _) = extract(src);
        assert!(modules.contains("fifo"));
    }

    #[test]
    fn several_modules_in_order() {
        let src = "module a(input x);\nendmodule\nmodule b(input y);\n  a u0(.x(y));\nendmodule\n";
        let (modules, _) = extract(src);
        assert_eq!(modules.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(modules.get("b").unwrap().body.contains("a u0"));
    }

    #[test]
    fn duplicate_name_last_write_wins_keeps_position() {
        let src = "module a(input x);\n// first\nendmodule\nmodule b(input y);\nendmodule\nmodule a(input z);\nendmodule\n";
        let (modules, _) = extract(src);
        assert_eq!(modules.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(modules.get("a").unwrap().body.contains("input z"));
    }

    #[test]
    fn portless_module_is_missed_and_reported() {
        let src = "module tb;\nendmodule\nmodule a(input x);\nendmodule\nmodule b(input y);\nendmodule\n";
        let (modules, sink) = extract(src);
        assert_eq!(modules.len(), 2);
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].code, codes::MODULE_COVERAGE);
        assert!(diags[0].notes[0].contains("found 3"));
    }

    #[test]
    fn unterminated_module_is_skipped_without_swallowing_next() {
        let src = "module broken(input x);\n  wire w;\nmodule ok(input y);\nendmodule\n";
        let (modules, _) = extract(src);
        assert_eq!(modules.names().collect::<Vec<_>>(), vec!["ok"]);
    }

    #[test]
    fn instance_of_module_named_with_module_suffix_keeps_parent() {
        let src = "module uart_module(input clk, input a);\nendmodule\n\
                   module top(input clk, input a);\n  uart_module u0(.clk(clk), .a(a));\nendmodule\n";
        let (modules, sink) = extract(src);
        assert_eq!(modules.names().collect::<Vec<_>>(), vec!["uart_module", "top"]);
        assert!(modules.get("top").unwrap().body.contains("uart_module u0"));
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn endmodule_inside_identifier_does_not_close() {
        let src = "module m(input x);\n  wire xendmodule_flag;\nendmodule";
        let (modules, _) = extract(src);
        assert!(modules.get("m").unwrap().body.ends_with("flag;\nendmodule"));
    }

    #[test]
    fn empty_text_yields_empty_collection() {
        let (modules, sink) = extract("");
        assert!(modules.is_empty());
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn emit_joins_with_blank_lines_and_names_origin() {
        let sink = DiagnosticSink::new();
        let src = "wire stray;\nmodule a(input x);\nendmodule\nmodule b;\nendmodule\n";
        let out = emit_modules(src, "rtl/a.v", &sink);
        assert_eq!(out, "module a(input x);\nendmodule\n\n");
        let diags = sink.take_all();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].origin.as_deref(), Some("rtl/a.v"));
    }
}
