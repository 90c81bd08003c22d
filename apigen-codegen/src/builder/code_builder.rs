//! Code builder utility for generating properly indented code.

use super::Indent;

/// Fluent API for building code with proper indentation.
///
/// Supports both consuming methods (returning `Self`) for chaining and
/// mutable methods (returning `&mut Self`) for loops.
///
/// # Example (Consuming API)
///
/// ```
/// use apigen_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::haskell()
///     .line("main :: IO ()")
///     .line("main =")
///     .indent()
///     .line("putStrLn \"hello\"")
///     .build();
///
/// assert_eq!(code, "main :: IO ()\nmain =\n  putStrLn \"hello\"\n");
/// ```
///
/// # Example (Mutable API)
///
/// ```
/// use apigen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::haskell();
/// for name in ["a", "b"] {
///     builder.push_line(&format!("{name} = ()"));
/// }
/// assert_eq!(builder.build(), "a = ()\nb = ()\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 2-space indentation.
    pub fn haskell() -> Self {
        Self::new(Indent::HASKELL)
    }

    // =========================================================================
    // Mutable API - methods prefixed with `push_`
    // =========================================================================

    /// Add a line of code with current indentation (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if s.is_empty() {
            return self.push_blank();
        }
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or newline (mutable).
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Increase indentation level (mutable).
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level (mutable).
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a comment spanning several lines (mutable).
    ///
    /// The first line gets `first`, continuation lines get `rest`
    /// (`-- |` and `--` for Haddock). Trailing whitespace is trimmed.
    pub fn push_comment(&mut self, first: &str, rest: &str, text: &str) -> &mut Self {
        for (i, line) in text.trim().lines().enumerate() {
            let prefix = if i == 0 { first } else { rest };
            let line = line.trim_end();
            if line.is_empty() {
                self.push_line(prefix);
            } else {
                self.push_line(&format!("{prefix} {line}"));
            }
        }
        self
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::haskell()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let code = CodeBuilder::haskell().line("x = 1").build();
        assert_eq!(code, "x = 1\n");
    }

    #[test]
    fn test_consuming_indent() {
        let code = CodeBuilder::haskell()
            .line("packages:")
            .indent()
            .line("- .")
            .build();
        assert_eq!(code, "packages:\n  - .\n");
    }

    #[test]
    fn test_empty_line_has_no_indent() {
        let mut builder = CodeBuilder::haskell();
        builder.push_indent().push_line("a").push_line("").push_line("b");
        assert_eq!(builder.build(), "  a\n\n  b\n");
    }

    #[test]
    fn test_multiline_comment() {
        let mut builder = CodeBuilder::haskell();
        builder
            .push_comment("-- |", "--", "Find pets.\n\nBy status.  ")
            .push_line("findPets :: Handler");

        assert_eq!(builder.build(), "-- | Find pets.\n--\n-- By status.\nfindPets :: Handler\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::haskell().indent();
        builder.push_dedent().push_dedent().push_line("x");
        assert_eq!(builder.build(), "x\n");
    }
}
