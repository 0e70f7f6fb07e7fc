//! Indentation-aware line writer for generated Rust source.

const INDENT: &str = "    ";

/// Accumulates generated source one line at a time.
pub struct CodeWriter {
    /// Current indentation level.
    indent: usize,
    /// Generated code output.
    output: String,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter {
    pub fn new() -> Self {
        CodeWriter {
            indent: 0,
            output: String::with_capacity(2048),
        }
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write a line with indentation and a trailing newline.
    ///
    /// Empty lines are written without indentation.
    pub fn writeln(&mut self, line: &str) {
        if !line.is_empty() {
            for _ in 0..self.indent {
                self.output.push_str(INDENT);
            }
            self.output.push_str(line);
        }
        self.output.push('\n');
    }

    /// Write `head {`, run `body` one level deeper, then write `}`.
    pub fn block(&mut self, head: &str, body: impl FnOnce(&mut Self)) {
        self.writeln(&format!("{head} {{"));
        self.indent();
        body(self);
        self.dedent();
        self.writeln("}");
    }

    pub fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_dedent() {
        let mut w = CodeWriter::new();
        w.writeln("line1");
        w.indent();
        w.writeln("line2");
        w.indent();
        w.writeln("line3");
        w.dedent();
        w.writeln("line4");
        w.dedent();
        w.writeln("line5");

        assert_eq!(
            w.finish(),
            "line1\n    line2\n        line3\n    line4\nline5\n"
        );
    }

    #[test]
    fn test_block_and_blank_lines() {
        let mut w = CodeWriter::new();
        w.block("fn f()", |w| {
            w.writeln("let a = 1;");
            w.writeln("");
            w.writeln("a");
        });
        assert_eq!(w.finish(), "fn f() {\n    let a = 1;\n\n    a\n}\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut w = CodeWriter::new();
        w.dedent();
        w.writeln("x");
        assert_eq!(w.finish(), "x\n");
    }
}
