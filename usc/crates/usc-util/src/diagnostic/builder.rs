//! Fluent diagnostic construction and source snippets.

use super::{Diagnostic, DiagnosticCode, Handler, Level, Span};

/// One source line with a highlighted column range, rendered under a
/// diagnostic.
///
/// # Examples
///
/// ```
/// use usc_util::diagnostic::SourceSnippet;
///
/// let snippet = SourceSnippet::new("var a = 1x;", 1, 9, 11);
/// assert_eq!(snippet.format(), "  1 | var a = 1x;\n    |         ^^");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSnippet {
    /// The source line content, without its line terminator
    pub line: String,
    /// Physical line number (1-based)
    pub line_number: usize,
    /// First highlighted column (1-based)
    pub start_column: usize,
    /// Column one past the highlighted range (1-based)
    pub end_column: usize,
}

impl SourceSnippet {
    /// Create a new source snippet.
    pub fn new(
        line: impl Into<String>,
        line_number: usize,
        start_column: usize,
        end_column: usize,
    ) -> Self {
        Self {
            line: line.into(),
            line_number,
            start_column,
            end_column,
        }
    }

    /// Cut the physical line containing `span.start` out of `source`.
    ///
    /// Lines and columns are recomputed from byte offsets, so the result
    /// does not depend on how the lexer tracked positions. The highlight is
    /// clipped to the end of the line. Returns `None` when the span starts
    /// past the end of `source`.
    pub fn from_source(source: &[u8], span: Span) -> Option<Self> {
        if span.start > source.len() {
            return None;
        }
        let line_start = source[..span.start]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let line_end = source[span.start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(source.len(), |i| span.start + i);
        let line_number = source[..line_start].iter().filter(|&&b| b == b'\n').count() + 1;
        let text = String::from_utf8_lossy(&source[line_start..line_end]);
        let text = text.trim_end_matches('\r');

        let start_column = span.start - line_start + 1;
        let end_column = span.end.clamp(span.start, line_end) - line_start + 1;
        Some(Self::new(text, line_number, start_column, end_column))
    }

    /// Format the snippet as a numbered source line followed by a caret
    /// line.
    pub fn format(&self) -> String {
        let width = self.line_number.to_string().len().max(3);
        let indent = self.start_column.saturating_sub(1);
        let carets = self.end_column.saturating_sub(self.start_column).max(1);

        let mut result = format!("{:>width$} | {}\n", self.line_number, self.line);
        result.push_str(&format!("{:>width$} | ", ""));
        result.push_str(&" ".repeat(indent));
        result.push_str(&"^".repeat(carets));
        result
    }
}

/// Builder for constructing diagnostics with a fluent API.
///
/// # Examples
///
/// ```
/// use usc_util::diagnostic::{DiagnosticBuilder, DiagnosticCode, Level, Span};
///
/// let diag = DiagnosticBuilder::error("Invalid escape sequence")
///     .code(DiagnosticCode::E_LEX_INVALID_ESCAPE)
///     .span(Span::new(4, 6, 1, 5))
///     .help("valid escapes are \\n \\r \\t \\\\ \\' \\\" \\0")
///     .build();
/// assert_eq!(diag.level, Level::Error);
/// assert_eq!(diag.helps.len(), 1);
/// ```
#[must_use = "a diagnostic does nothing until it is built or emitted"]
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    /// Create a new diagnostic builder.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            diagnostic: Diagnostic::new(level, message, Span::DUMMY),
        }
    }

    /// Start an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// Set the diagnostic code.
    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.diagnostic.code = Some(code);
        self
    }

    /// Set the primary span.
    pub fn span(mut self, span: Span) -> Self {
        self.diagnostic.span = span;
        self
    }

    /// Add a note.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.diagnostic.notes.push(note.into());
        self
    }

    /// Add a help suggestion.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic.helps.push(help.into());
        self
    }

    /// Attach a source snippet.
    pub fn snippet(mut self, snippet: SourceSnippet) -> Self {
        self.diagnostic.snippets.push(snippet);
        self
    }

    /// Finish building.
    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }

    /// Build and hand the diagnostic to `handler`.
    pub fn emit(self, handler: &Handler) {
        handler.emit_diagnostic(self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_format() {
        let snippet = SourceSnippet::new("var a = 1x;", 1, 9, 11);
        let formatted = snippet.format();
        assert_eq!(formatted, "  1 | var a = 1x;\n    |         ^^");
    }

    #[test]
    fn test_empty_snippet_has_one_caret() {
        let snippet = SourceSnippet::new("$", 12, 1, 1);
        assert!(snippet.format().ends_with("| ^"));
    }

    #[test]
    fn test_snippet_from_source_second_line() {
        let source = b"var a;\nvar b = @;\n";
        let span = Span::new(15, 16, 1, 16);
        let snippet = SourceSnippet::from_source(source, span).unwrap();
        assert_eq!(snippet.line, "var b = @;");
        assert_eq!(snippet.line_number, 2);
        assert_eq!(snippet.start_column, 9);
        assert_eq!(snippet.end_column, 10);
    }

    #[test]
    fn test_snippet_from_source_clips_to_line() {
        let source = b"\"abc\ndef\"";
        let span = Span::new(0, 9, 1, 1);
        let snippet = SourceSnippet::from_source(source, span).unwrap();
        assert_eq!(snippet.line, "\"abc");
        assert_eq!(snippet.end_column, 5);
    }

    #[test]
    fn test_snippet_from_source_at_eof() {
        let source = b"abc";
        let snippet = SourceSnippet::from_source(source, Span::new(3, 3, 1, 4)).unwrap();
        assert_eq!(snippet.start_column, 4);
        assert!(SourceSnippet::from_source(source, Span::new(9, 9, 1, 10)).is_none());
    }

    #[test]
    fn test_builder_collects_parts() {
        let diag = DiagnosticBuilder::new(Level::Note, "n0")
            .code(DiagnosticCode::new("N", 1))
            .note("n")
            .help("h")
            .snippet(SourceSnippet::new("x", 1, 1, 2))
            .build();
        assert_eq!(diag.level, Level::Note);
        assert_eq!(diag.notes, vec!["n".to_string()]);
        assert_eq!(diag.helps, vec!["h".to_string()]);
        assert_eq!(diag.snippets.len(), 1);
    }

    #[test]
    fn test_builder_emit() {
        let handler = Handler::new();
        DiagnosticBuilder::error("Illegal token").emit(&handler);
        assert!(handler.has_errors());
    }
}
