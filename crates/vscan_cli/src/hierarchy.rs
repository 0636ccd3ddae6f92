//! `vscan hierarchy`: instantiation trees below each top module.

use vscan_diagnostics::DiagnosticSink;

use crate::pipeline::{load_design, render_diagnostics};
use crate::{GlobalArgs, SourceArgs};

/// Runs the `vscan hierarchy` command.
///
/// Prints one indented tree per top-module candidate to stdout. Modules that
/// reappear on their own path are marked `(recursive)` and not expanded again.
pub fn run(args: &SourceArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let design = load_design(args, global)?;
    let sink = DiagnosticSink::new();
    let analysis = design.analyze(&sink);

    let trees = analysis.hierarchies();
    if trees.is_empty() && !global.quiet {
        eprintln!("warning: no top module found in {}", design.dir.display());
    }
    for tree in &trees {
        print!("{}", tree.render());
    }

    if !global.quiet {
        render_diagnostics(&sink.diagnostics(), global.color);
    }
    Ok(if sink.has_errors() { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn hierarchy_runs_on_small_design() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("design.v"),
            "module leaf(input a);\nendmodule\nmodule top(input a);\n  leaf l0(.a(a));\nendmodule\n",
        )
        .unwrap();
        let args = SourceArgs {
            dir: tmp.path().to_string_lossy().into_owned(),
            extensions: Vec::new(),
            keep_testbenches: false,
        };
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        };
        assert_eq!(run(&args, &global).unwrap(), 0);
    }
}
