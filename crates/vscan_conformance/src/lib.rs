//! Conformance test helpers for vscan.
//!
//! Provides shared functions that run in-memory source files through the same
//! steps as `vscan scan` (testbench filter → per-file module emission →
//! analysis) and return structured results for assertion in integration tests.

#![warn(missing_docs)]

use vscan_config::ScanConfig;
use vscan_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use vscan_structure::{assemble_design, analyze, Analysis, ClockHints, SourceText};

/// Result of running a scan over in-memory sources.
pub struct ScanResult {
    /// Everything recovered from the design.
    pub analysis: Analysis,
    /// Origins of the files that survived filtering.
    pub file_list: Vec<String>,
    /// All diagnostics emitted during the scan.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any errors were emitted.
    pub has_errors: bool,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl ScanResult {
    /// Top-module candidates in collection order.
    pub fn tops(&self) -> Vec<&str> {
        self.analysis
            .summary
            .top_module_candidates
            .iter()
            .map(String::as_str)
            .collect()
    }

    /// Clocks paired with [`tops`](Self::tops), `"None"` where unresolved.
    pub fn clocks(&self) -> Vec<&str> {
        self.analysis
            .summary
            .top_module_clocks
            .iter()
            .map(|c| c.as_deref().unwrap_or(vscan_structure::NO_CLOCK))
            .collect()
    }

    /// Diagnostics carrying the given code, rendered as `E101` etc.
    pub fn with_code(&self, code: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.code.to_string() == code)
            .collect()
    }
}

/// Creates a `ScanConfig` from `vscan.toml` text.
pub fn make_config(toml_str: &str) -> ScanConfig {
    toml::from_str(toml_str).unwrap()
}

/// Creates a `ScanConfig` with custom clock name hints.
pub fn make_config_with_hints(hints: &[&str]) -> ScanConfig {
    let list: Vec<String> = hints.iter().map(|h| format!("\"{h}\"")).collect();
    make_config(&format!("[clock]\nname_hints = [{}]\n", list.join(", ")))
}

/// Scans a single source text with the default configuration.
pub fn scan_text(source: &str) -> ScanResult {
    scan_sources(&[("design.v", source)])
}

/// Scans `(origin, text)` pairs with the default configuration.
pub fn scan_sources(files: &[(&str, &str)]) -> ScanResult {
    scan_sources_with_config(files, &ScanConfig::default())
}

/// Scans `(origin, text)` pairs in the given order with a custom configuration.
pub fn scan_sources_with_config(files: &[(&str, &str)], config: &ScanConfig) -> ScanResult {
    let sources: Vec<SourceText> = files
        .iter()
        .map(|(origin, text)| SourceText::new(*origin, *text))
        .filter(|src| !(config.scan.filter_testbenches && src.is_testbench()))
        .collect();

    let sink = DiagnosticSink::new();
    let design = assemble_design(&sources, &sink);
    let hints = ClockHints::new(&config.clock.name_hints);
    let analysis = analyze(&design, &hints, &sink);

    let diagnostics = sink.take_all();
    let error_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();

    ScanResult {
        analysis,
        file_list: sources.into_iter().map(|s| s.origin).collect(),
        diagnostics,
        has_errors: error_count > 0,
        error_count,
        warning_count,
    }
}
