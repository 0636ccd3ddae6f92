//! Whole-design analysis: modules, hierarchy, top candidates, and their clocks.

use serde::Serialize;
use std::collections::BTreeSet;
use vscan_diagnostics::{Diagnostic, DiagnosticSink};

use crate::clock::{
    edge_candidates, port_resolution, resolve_from_candidates, ClockEvidence, ClockHints,
    ClockResolution,
};
use crate::codes;
use crate::comments::strip_comments;
use crate::error::StructureError;
use crate::graph::{build_graph, InstantiationGraph};
use crate::header::read_header;
use crate::module::{extract_modules, ModuleCollection};
use crate::sequential::{extract_sequential_blocks, SequentialBlock};
use crate::summary::AnalysisSummary;
use crate::top::{find_top_modules, hierarchy, HierarchyNode};

/// Everything recovered from one design text.
#[derive(Debug)]
pub struct Analysis {
    /// Extracted modules.
    pub modules: ModuleCollection,
    /// Instantiation relationships between them.
    pub graph: InstantiationGraph,
    /// Top candidates paired with their clocks.
    pub summary: AnalysisSummary,
}

/// Per-module details for listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleReport {
    /// The module name.
    pub name: String,
    /// Port identifiers in declaration order; empty when the header is unreadable.
    pub ports: Vec<String>,
    /// The inferred clock.
    pub clock: Option<String>,
    /// How the clock was found.
    pub evidence: ClockEvidence,
    /// Instantiation edges entering the module.
    pub in_degree: usize,
    /// Instantiation edges leaving the module.
    pub out_degree: usize,
    /// Distinct modules it instantiates.
    pub children: Vec<String>,
}

/// Runs every recovery stage over `text` and pairs each top candidate with its clock.
///
/// Comments are stripped first. Coverage shortfalls, unreadable headers, and
/// ambiguities are reported to `sink`; the run itself never fails.
pub fn analyze(text: &str, hints: &ClockHints, sink: &DiagnosticSink) -> Analysis {
    let stripped = strip_comments(text);
    let modules = extract_modules(&stripped, sink);
    let graph = build_graph(&modules);
    let mut analysis = Analysis {
        modules,
        graph,
        summary: AnalysisSummary::default(),
    };

    let tops = find_top_modules(&analysis.graph);
    if tops.len() > 1 {
        sink.emit(
            Diagnostic::note(
                codes::MULTIPLE_TOPS,
                format!("{} independent top-level hierarchies found", tops.len()),
            )
            .with_note(format!("candidates: {}", tops.join(", "))),
        );
    }

    let clocks = tops
        .iter()
        .map(|top| analysis.clock_or_report(top, hints, sink).clock)
        .collect();
    analysis.summary = AnalysisSummary {
        top_module_candidates: tops,
        top_module_clocks: clocks,
    };
    analysis
}

impl Analysis {
    /// Infers the clock of the named module.
    ///
    /// A clock-like port name decides first. Otherwise the module's own
    /// edge-triggered blocks are narrowed; a module without any borrows the
    /// blocks of the modules it directly instantiates, keeping only candidates
    /// that are also its own ports. Unclosed blocks and tie-breaks are
    /// reported to `sink`.
    pub fn module_clock(
        &self,
        name: &str,
        hints: &ClockHints,
        sink: &DiagnosticSink,
    ) -> Result<ClockResolution, StructureError> {
        let Some(record) = self.modules.get(name) else {
            return Ok(ClockResolution::unresolved());
        };
        let header = read_header(&record.body)?;
        let own = extract_sequential_blocks(&record.body);
        own.report_unclosed(name, sink);

        if let Some(resolution) = port_resolution(&header.ports, hints) {
            return Ok(resolution);
        }

        let candidates = edge_candidates(&own.blocks);
        let resolution = if candidates.is_empty() {
            self.clock_from_instances(name, &header.ports, hints)
        } else {
            resolve_from_candidates(candidates, &own.blocks, hints)
        };

        if let Some(clock) = &resolution.clock {
            if !resolution.tied.is_empty() {
                sink.emit(
                    Diagnostic::note(
                        codes::AMBIGUOUS_CLOCK,
                        format!("several clock candidates remain; picked `{clock}`"),
                    )
                    .with_origin(name)
                    .with_note(format!("tied: {}", resolution.tied.join(", ")))
                    .with_help("add a distinguishing substring to `[clock] name_hints`"),
                );
            }
        }
        Ok(resolution)
    }

    fn clock_from_instances(
        &self,
        name: &str,
        ports: &[String],
        hints: &ClockHints,
    ) -> ClockResolution {
        let blocks: Vec<SequentialBlock> = self
            .graph
            .children(name)
            .into_iter()
            .filter_map(|child| self.modules.get(child))
            .flat_map(|child| extract_sequential_blocks(&child.body).blocks)
            .collect();
        let candidates: BTreeSet<String> = edge_candidates(&blocks)
            .into_iter()
            .filter(|c| ports.contains(c))
            .collect();

        let mut resolution = resolve_from_candidates(candidates, &blocks, hints);
        if resolution.evidence == ClockEvidence::Trigger {
            resolution.evidence = ClockEvidence::Instance;
        }
        resolution
    }

    /// Like [`module_clock`](Self::module_clock), reporting a missing header as
    /// an error diagnostic and resolving to nothing.
    pub fn clock_or_report(
        &self,
        name: &str,
        hints: &ClockHints,
        sink: &DiagnosticSink,
    ) -> ClockResolution {
        match self.module_clock(name, hints, sink) {
            Ok(resolution) => resolution,
            Err(err) => {
                sink.emit(Diagnostic::error(codes::MISSING_HEADER, err.to_string()).with_origin(name));
                ClockResolution::unresolved()
            }
        }
    }

    /// Instantiation trees below every top candidate.
    pub fn hierarchies(&self) -> Vec<HierarchyNode> {
        self.summary
            .top_module_candidates
            .iter()
            .map(|top| hierarchy(&self.graph, top))
            .collect()
    }

    /// Name, ports, clock, and connectivity of every module, in collection order.
    ///
    /// Top candidates were already reported on by [`analyze`]; only the other
    /// modules' diagnostics reach `sink`.
    pub fn module_reports(&self, hints: &ClockHints, sink: &DiagnosticSink) -> Vec<ModuleReport> {
        let reported = DiagnosticSink::new();
        self.modules
            .iter()
            .map(|record| {
                let name = record.name.as_str();
                let ports = read_header(&record.body)
                    .map(|header| header.ports)
                    .unwrap_or_default();
                let is_top = self.summary.top_module_candidates.iter().any(|t| t == name);
                let resolution =
                    self.clock_or_report(name, hints, if is_top { &reported } else { sink });
                ModuleReport {
                    name: name.to_string(),
                    ports,
                    clock: resolution.clock,
                    evidence: resolution.evidence,
                    in_degree: self.graph.in_degree(name),
                    out_degree: self.graph.out_degree(name),
                    children: self
                        .graph
                        .children(name)
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                }
            })
            .collect()
    }
}
