//! `vscan modules`: per-module listing.

use vscan_diagnostics::DiagnosticSink;
use vscan_structure::{ClockEvidence, NO_CLOCK};

use crate::pipeline::{load_design, render_diagnostics};
use crate::{GlobalArgs, ModulesArgs, ReportFormat};

/// Runs the `vscan modules` command.
///
/// Lists every extracted module with its ports, inferred clock, and
/// instantiation degrees.
pub fn run(args: &ModulesArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let design = load_design(&args.source, global)?;
    let sink = DiagnosticSink::new();
    let analysis = design.analyze(&sink);
    let reports = analysis.module_reports(&design.clock_hints(), &sink);

    match args.format {
        ReportFormat::Text => {
            for report in &reports {
                println!(
                    "{}\tclock: {}{}\tin: {}\tout: {}",
                    report.name,
                    report.clock.as_deref().unwrap_or(NO_CLOCK),
                    evidence_suffix(report.evidence),
                    report.in_degree,
                    report.out_degree
                );
                if global.verbose {
                    println!("\tports: {}", report.ports.join(", "));
                    if !report.children.is_empty() {
                        println!("\tinstantiates: {}", report.children.join(", "));
                    }
                }
            }
            if !global.quiet {
                render_diagnostics(&sink.diagnostics(), global.color);
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(if sink.has_errors() { 1 } else { 0 })
}

fn evidence_suffix(evidence: ClockEvidence) -> &'static str {
    match evidence {
        ClockEvidence::Port | ClockEvidence::Unresolved => "",
        ClockEvidence::Trigger => " (by trigger)",
        ClockEvidence::Instance => " (from instances)",
    }
}
