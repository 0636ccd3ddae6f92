//! Shared pipeline helpers for CLI commands.
//!
//! Contains the steps every command runs before analysis: configuration
//! resolution, source file discovery, parallel loading, testbench filtering,
//! and diagnostic rendering.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use vscan_config::ScanConfig;
use vscan_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use vscan_structure::{analyze, assemble_design, Analysis, ClockHints, SourceText};
use walkdir::WalkDir;

use crate::{GlobalArgs, SourceArgs};

/// A design directory's selected sources, ready for analysis.
pub struct LoadedDesign {
    /// The scanned directory as given on the command line.
    pub dir: PathBuf,
    /// Effective configuration, CLI overrides applied.
    pub config: ScanConfig,
    /// Sources that survived filtering, in path order.
    pub sources: Vec<SourceText>,
}

impl LoadedDesign {
    /// Paths of the selected sources.
    pub fn file_list(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.origin.clone()).collect()
    }

    /// Clock naming hints from the effective configuration.
    pub fn clock_hints(&self) -> ClockHints {
        ClockHints::new(&self.config.clock.name_hints)
    }

    /// Assembles every source into one design and analyzes it.
    pub fn analyze(&self, sink: &DiagnosticSink) -> Analysis {
        let design = assemble_design(&self.sources, sink);
        analyze(&design, &self.clock_hints(), sink)
    }
}

/// Loads the configuration for `dir`.
///
/// If `--config` is given, that file must exist. Otherwise `vscan.toml` in the
/// design directory is used when present, and defaults when not.
pub fn resolve_config(
    dir: &Path,
    global: &GlobalArgs,
) -> Result<ScanConfig, Box<dyn std::error::Error>> {
    let config = match global.config {
        Some(ref path) => vscan_config::load_config_file(Path::new(path))?,
        None => vscan_config::load_config(dir)?,
    };
    Ok(config)
}

/// Applies command-line overrides on top of the file configuration.
pub fn apply_overrides(config: &mut ScanConfig, args: &SourceArgs) {
    if !args.extensions.is_empty() {
        config.scan.extensions = args
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
    }
    if args.keep_testbenches {
        config.scan.filter_testbenches = false;
    }
}

/// Runs configuration, discovery, loading, and filtering for one command.
pub fn load_design(
    args: &SourceArgs,
    global: &GlobalArgs,
) -> Result<LoadedDesign, Box<dyn std::error::Error>> {
    let dir = PathBuf::from(&args.dir);
    if !dir.is_dir() {
        return Err(format!("design directory {} does not exist", dir.display()).into());
    }

    let mut config = resolve_config(&dir, global)?;
    apply_overrides(&mut config, args);

    let paths = discover_source_files(&dir, &config.scan.extensions, &config.scan.exclude)?;
    let mut sources = load_sources(&paths)?;
    let discovered = sources.len();
    if config.scan.filter_testbenches {
        sources.retain(|src| !src.is_testbench());
    }

    if global.verbose && !global.quiet {
        eprintln!(
            "   Discovered {} file(s), {} dropped as testbenches",
            discovered,
            discovered - sources.len()
        );
        for src in &sources {
            eprintln!("      {}", src.origin);
        }
    }

    Ok(LoadedDesign {
        dir,
        config,
        sources,
    })
}

/// Discovers source files under `dir` (recursive) with one of `extensions`.
///
/// Any path containing one of the `exclude` substrings is skipped. The result
/// is sorted by path.
pub fn discover_source_files(
    dir: &Path,
    extensions: &[String],
    exclude: &[String],
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !has_extension(path, extensions) {
            continue;
        }
        let shown = path.to_string_lossy();
        if exclude.iter().any(|pat| shown.contains(pat.as_str())) {
            continue;
        }
        files.push(path.to_path_buf());
    }
    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}

/// Reads every file in parallel, decoding lossily. Order follows `paths`.
pub fn load_sources(paths: &[PathBuf]) -> Result<Vec<SourceText>, Box<dyn std::error::Error>> {
    let sources = paths
        .par_iter()
        .map(|path| {
            fs::read(path)
                .map(|bytes| SourceText::from_bytes(path.display().to_string(), &bytes))
                .map_err(|e| format!("failed to read {}: {e}", path.display()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sources)
}

/// Renders diagnostics to stderr using the terminal renderer.
///
/// Returns the number of diagnostics rendered.
pub fn render_diagnostics(diagnostics: &[Diagnostic], color: bool) -> usize {
    let renderer = TerminalRenderer::new(color);
    for diag in diagnostics {
        eprintln!("{}", renderer.render(diag));
    }
    diagnostics.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn global() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        }
    }

    fn source_args(dir: &Path) -> SourceArgs {
        SourceArgs {
            dir: dir.to_string_lossy().into_owned(),
            extensions: Vec::new(),
            keep_testbenches: false,
        }
    }

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn discover_files_recursive_and_sorted() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("rtl").join("core");
        fs::create_dir_all(&sub).unwrap();
        fs::write(tmp.path().join("top.v"), "module top; endmodule").unwrap();
        fs::write(sub.join("alu.v"), "module alu; endmodule").unwrap();
        fs::write(sub.join("regs.sv"), "module regs; endmodule").unwrap();
        fs::write(tmp.path().join("readme.txt"), "not hdl").unwrap();

        let files = discover_source_files(tmp.path(), &exts(&["v"]), &[]).unwrap();
        assert_eq!(files, vec![sub.join("alu.v"), tmp.path().join("top.v")]);

        let files = discover_source_files(tmp.path(), &exts(&["v", "sv"]), &[]).unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn discover_files_honors_exclusions() {
        let tmp = TempDir::new().unwrap();
        let sim = tmp.path().join("sim");
        fs::create_dir_all(&sim).unwrap();
        fs::write(sim.join("tb_top.v"), "").unwrap();
        fs::write(tmp.path().join("top.v"), "").unwrap();

        let files = discover_source_files(tmp.path(), &exts(&["v"]), &exts(&["/sim/"])).unwrap();
        assert_eq!(files, vec![tmp.path().join("top.v")]);
    }

    #[test]
    fn discover_files_empty_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(discover_source_files(tmp.path(), &exts(&["v"]), &[])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn load_sources_preserves_order_and_tolerates_bad_bytes() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.v");
        let b = tmp.path().join("b.v");
        fs::write(&a, b"module a(input x);\xfe\nendmodule").unwrap();
        fs::write(&b, "module b(input y);\nendmodule").unwrap();

        let sources = load_sources(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(sources[0].origin, a.display().to_string());
        assert_eq!(sources[1].origin, b.display().to_string());
        assert!(sources[0].text.contains('\u{FFFD}'));
    }

    #[test]
    fn load_sources_reports_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_sources(&[tmp.path().join("gone.v")]).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }

    #[test]
    fn load_design_drops_testbenches_by_default() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("dut.v"), "module dut(input clk);\nendmodule").unwrap();
        fs::write(
            tmp.path().join("tb.v"),
            "module tb;\n  initial begin end\nendmodule",
        )
        .unwrap();

        let design = load_design(&source_args(tmp.path()), &global()).unwrap();
        assert_eq!(design.sources.len(), 1);
        assert!(design.file_list()[0].ends_with("dut.v"));

        let mut args = source_args(tmp.path());
        args.keep_testbenches = true;
        let design = load_design(&args, &global()).unwrap();
        assert_eq!(design.sources.len(), 2);
    }

    #[test]
    fn load_design_reads_config_and_applies_overrides() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("vscan.toml"),
            "[scan]\nextensions = \"sv\"\n[clock]\nname_hints = [\"tick\"]\n",
        )
        .unwrap();
        fs::write(tmp.path().join("a.sv"), "").unwrap();
        fs::write(tmp.path().join("b.v"), "").unwrap();

        let design = load_design(&source_args(tmp.path()), &global()).unwrap();
        assert_eq!(design.sources.len(), 1);
        assert!(design.clock_hints().matches("sys_tick"));

        let mut args = source_args(tmp.path());
        args.extensions = exts(&[".v"]);
        let design = load_design(&args, &global()).unwrap();
        assert_eq!(design.config.scan.extensions, vec!["v"]);
        assert!(design.file_list()[0].ends_with("b.v"));
    }

    #[test]
    fn explicit_config_must_exist() {
        let tmp = TempDir::new().unwrap();
        let mut g = global();
        g.config = Some(tmp.path().join("missing.toml").to_string_lossy().into_owned());
        assert!(resolve_config(tmp.path(), &g).is_err());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_design(&source_args(&tmp.path().join("nope")), &global())
            .err()
            .unwrap();
        assert!(err.to_string().contains("does not exist"));
    }
}
