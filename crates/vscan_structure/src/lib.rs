//! Heuristic structural recovery for Verilog designs.
//!
//! No grammar is involved. Regular expressions locate module headers and
//! procedural-block openings, and hand-written keyword counting balances
//! nested `begin`/`end` regions. Malformed or partial source is tolerated: the
//! recovery stages report what they could not match as diagnostics and carry
//! on with partial results.
//!
//! The stages, leaves first:
//!
//! 1. [`strip_comments`]: remove `//` and `/* */` comments.
//! 2. [`extract_modules`]: module name and verbatim text span.
//! 3. [`read_header`]: header clause and ordered port identifiers.
//! 4. [`extract_sequential_blocks`]: `always @(...) begin ... end` regions.
//! 5. [`build_graph`]: which modules instantiate which.
//! 6. [`find_top_modules`]: modules nothing else instantiates.
//! 7. [`infer_clock`]: the most likely clock of a module.
//!
//! [`analyze`] runs them all and produces the [`AnalysisSummary`] that
//! [`write_summary`] appends to a JSON-lines log.

#![warn(missing_docs)]

pub mod analysis;
pub mod clock;
pub mod codes;
pub mod comments;
pub mod design;
pub mod error;
pub mod graph;
pub mod header;
pub mod module;
pub mod sequential;
pub mod summary;
pub mod top;

pub use analysis::{analyze, Analysis, ModuleReport};
pub use clock::{infer_clock, resolve_clock, ClockEvidence, ClockHints, ClockResolution};
pub use comments::strip_comments;
pub use design::{assemble_design, SourceText};
pub use error::StructureError;
pub use graph::{build_graph, InstantiationGraph};
pub use header::{read_header, Header};
pub use module::{emit_modules, extract_modules, ModuleCollection, ModuleRecord};
pub use sequential::{extract_sequential_blocks, BlockScan, SequentialBlock};
pub use summary::{write_summary, AnalysisSummary, RunRecord, NO_CLOCK};
pub use top::{find_top_modules, hierarchy, HierarchyNode};
