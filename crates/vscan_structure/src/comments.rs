//! Comment removal ahead of structural scanning.

use regex::Regex;
use std::sync::LazyLock;

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//.*").unwrap());
static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// Removes `//` line comments, then `/* ... */` block comments.
///
/// Line comments go first, so a `//` inside a block comment truncates it to the
/// end of that line. Block comments close at the first `*/`. Comment markers
/// inside string literals are not recognized.
pub fn strip_comments(text: &str) -> String {
    let without_lines = LINE_COMMENT.replace_all(text, "");
    BLOCK_COMMENT.replace_all(&without_lines, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_line_comments_keeps_newlines() {
        let src = "wire a; // the a wire\nwire b;\n";
        assert_eq!(strip_comments(src), "wire a; \nwire b;\n");
    }

    #[test]
    fn removes_multiline_block_comment() {
        let src = "wire a;\n/* first\n   second */wire b;";
        assert_eq!(strip_comments(src), "wire a;\nwire b;");
    }

    #[test]
    fn block_comment_closes_at_first_terminator() {
        let src = "a /* x */ b /* y */ c";
        assert_eq!(strip_comments(src), "a  b  c");
    }

    #[test]
    fn line_comment_inside_block_wins() {
        // `//` runs to end of line first, eating the `*/` on that line.
        let src = "a /* see http://x */ b\nc */ d";
        assert_eq!(strip_comments(src), "a  d");
    }

    #[test]
    fn unterminated_block_comment_is_left_alone() {
        let src = "wire a; /* never closed";
        assert_eq!(strip_comments(src), src);
    }

    #[test]
    fn idempotent_on_balanced_comments() {
        let samples = [
            "module m(input clk); // c\n/* b */ endmodule",
            "a/**/b//x\n/*\n*/c",
            "//*a*//\nb",
            "x = y / z; /* ratio */ w = 2 * 3;",
        ];
        for src in samples {
            let once = strip_comments(src);
            assert_eq!(strip_comments(&once), once, "not idempotent for {src:?}");
        }
    }
}
