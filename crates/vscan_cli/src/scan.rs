//! `vscan scan`: top-module and clock inference.
//!
//! The full pipeline:
//!
//! 1. Load config (`vscan.toml` or `--config`), apply CLI overrides
//! 2. Discover source files and drop testbenches
//! 3. Reduce each file to its modules and concatenate
//! 4. Extract modules, build the instantiation graph, find tops and clocks
//! 5. Append the run record to the summary log
//! 6. Print the result and render diagnostics

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use vscan_diagnostics::{DiagnosticSink, Severity};
use vscan_structure::{write_summary, RunRecord, NO_CLOCK};

use crate::pipeline::{load_design, render_diagnostics};
use crate::{GlobalArgs, ReportFormat, ScanArgs};

/// Runs the `vscan scan` command.
///
/// Returns exit code 0 if no errors, 1 if there are errors.
pub fn run(args: &ScanArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let design = load_design(&args.source, global)?;

    if !global.quiet {
        eprintln!(
            "   Scanning {} ({} file(s))",
            design.dir.display(),
            design.sources.len()
        );
    }
    if design.sources.is_empty() && !global.quiet {
        eprintln!(
            "warning: no source files with extension(s) {} found in {}",
            design.config.scan.extensions.join(", "),
            design.dir.display()
        );
    }

    let sink = DiagnosticSink::new();
    let analysis = design.analyze(&sink);

    if global.verbose && !global.quiet {
        for record in analysis.modules.iter() {
            eprintln!("      module {}", record.name);
        }
    }

    let record = RunRecord {
        design_dir: design.dir.display().to_string(),
        file_list: design.file_list(),
        summary: analysis.summary.clone(),
    };

    let log_path = args
        .log
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| design.config.report.log_file.clone());
    append_record(&log_path, &record)?;

    let diagnostics = sink.diagnostics();
    match args.format {
        ReportFormat::Text => {
            for (top, clock) in record
                .summary
                .top_module_candidates
                .iter()
                .zip(&record.summary.top_module_clocks)
            {
                println!("{top}\tclock: {}", clock.as_deref().unwrap_or(NO_CLOCK));
            }
            render_diagnostics(&diagnostics, global.color);
        }
        ReportFormat::Json => {
            let mut out = serde_json::Map::new();
            out.insert("run".to_string(), serde_json::to_value(&record)?);
            out.insert("diagnostics".to_string(), serde_json::to_value(&diagnostics)?);
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!(
            "     Summary {} module(s), {} top candidate(s), {} error(s), {} warning(s)",
            analysis.modules.len(),
            record.summary.top_module_candidates.len(),
            sink.error_count(),
            sink.count(Severity::Warning)
        );
        eprintln!("     Logged to {}", log_path.display());
    }

    if sink.has_errors() {
        Ok(1)
    } else {
        Ok(0)
    }
}

/// Appends one JSON line to the log at `path`, creating it and its parent
/// directories as needed.
pub fn append_record(path: &Path, record: &RunRecord) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    write_summary(record, file)?;
    Ok(())
}
