//! Error recovery: malformed or partial input must produce partial
//! results and diagnostics, never a panic or a failed run.

use vscan_conformance::{scan_sources, scan_text};
use vscan_diagnostics::{DiagnosticSink, Severity};
use vscan_structure::{read_header, StructureError};

#[test]
fn unterminated_module_does_not_swallow_its_neighbour() {
    let src = r#"
module broken (input a, output y);
    assign y = a;

module fine (input a, output y);
    assign y = ~a;
endmodule
"#;
    let result = scan_text(src);
    let names: Vec<_> = result.analysis.modules.names().collect();
    assert_eq!(names, vec!["fine"]);
    assert!(!result.has_errors);
}

#[test]
fn nested_parentheses_in_parameter_block_still_match() {
    let src = "module odd #(parameter W = f(8)) (input [W-1:0] a);\nendmodule\n";
    let result = scan_text(src);
    assert!(result.analysis.modules.contains("odd"));
    assert_eq!(result.tops(), vec!["odd"]);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn portless_modules_raise_coverage_warning_per_file() {
    let result = scan_sources(&[
        ("a.v", "module a(input x);\nendmodule\n"),
        ("pkg.v", "module consts;\n  localparam W = 8;\nendmodule\n"),
        ("b.v", "module b;\nendmodule\nmodule c;\nendmodule\n"),
    ]);
    assert_eq!(result.warning_count, 2);
    let origins: Vec<_> = result
        .with_code("W101")
        .iter()
        .filter_map(|d| d.origin.clone())
        .collect();
    assert_eq!(origins, vec!["pkg.v", "b.v"]);
    assert_eq!(result.tops(), vec!["a"]);
}

#[test]
fn unclosed_sequential_block_is_skipped_with_warning() {
    let src = r#"
module m (input clk, input d, output reg q);
    always @(posedge clk) begin
        if (d) begin
            q <= 1'b1;
        end
endmodule
"#;
    let result = scan_text(src);
    assert_eq!(result.with_code("W102").len(), 1);
    assert_eq!(result.with_code("W102")[0].origin.as_deref(), Some("m"));
    // The trigger is lost, but the port name still identifies the clock.
    assert_eq!(result.clocks(), vec!["clk"]);
}

#[test]
fn commented_out_modules_and_instances_are_invisible() {
    let src = r#"
/*
module old_top (input clk);
    leaf u0 (.clk(clk));
endmodule
*/
module leaf (input clk);
endmodule
// leaf stray_instance (.clk(clk));
"#;
    let result = scan_text(src);
    let names: Vec<_> = result.analysis.modules.names().collect();
    assert_eq!(names, vec!["leaf"]);
    assert_eq!(result.tops(), vec!["leaf"]);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn duplicate_module_names_keep_the_later_body() {
    let result = scan_sources(&[
        ("v1/alu.v", "module alu(input a);\nendmodule\n"),
        ("v2/alu.v", "module alu(input clk, input a);\nendmodule\n"),
    ]);
    assert_eq!(result.analysis.modules.len(), 1);
    let body = &result.analysis.modules.get("alu").unwrap().body;
    assert!(body.contains("input clk"));
    assert_eq!(result.clocks(), vec!["clk"]);
}

#[test]
fn mutual_instantiation_leaves_no_top() {
    let src = "module p(input a);\n  q u0(.a(a));\nendmodule\nmodule q(input a);\n  p u0(.a(a));\nendmodule\n";
    let result = scan_text(src);
    assert!(result.tops().is_empty());
    assert!(result.clocks().is_empty());
    let trees = result.analysis.hierarchies();
    assert!(trees.is_empty());
}

#[test]
fn header_failure_is_an_error_value() {
    let err = read_header("assign y = a;").unwrap_err();
    assert!(matches!(err, StructureError::MissingHeader { .. }));
    assert!(err.to_string().contains("assign y = a;"));
}

#[test]
fn garbage_input_never_fails() {
    let inputs = [
        "",
        "endmodule endmodule",
        "module",
        "module (;",
        "always @(posedge clk) begin begin begin",
        "/* unterminated block comment module a(input x); endmodule",
        "\u{FFFD}\u{FFFD} module \u{00e9}(input x);\nendmodule",
    ];
    for src in inputs {
        let result = scan_text(src);
        assert!(!result.has_errors, "errors for {src:?}");
        assert_eq!(
            result.tops().len(),
            result.clocks().len(),
            "unpaired summary for {src:?}"
        );
    }
}

#[test]
fn stray_endmodule_is_counted_against_extraction() {
    let sink = DiagnosticSink::new();
    let modules = vscan_structure::extract_modules("endmodule\nmodule a(input x);\nendmodule", &sink);
    assert_eq!(modules.len(), 1);
    assert_eq!(sink.count(Severity::Warning), 1);
}
