//! Diagnostic reporting infrastructure.
//!
//! Phases build [`Diagnostic`]s with the [`DiagnosticBuilder`] and hand them
//! to a [`Handler`], which collects them for the driver to print.
//!
//! # Examples
//!
//! ```
//! use usc_util::diagnostic::{DiagnosticBuilder, DiagnosticCode, Handler};
//! use usc_util::Span;
//!
//! let handler = Handler::new();
//! DiagnosticBuilder::error("Invalid string literal")
//!     .code(DiagnosticCode::E_LEX_INVALID_STRING)
//!     .span(Span::new(0, 6, 1, 1))
//!     .emit(&handler);
//!
//! assert!(handler.has_errors());
//! assert_eq!(
//!     handler.diagnostics()[0].to_string(),
//!     "error[E0106]: Invalid string literal"
//! );
//! ```

mod builder;
mod codes;

pub use builder::{DiagnosticBuilder, SourceSnippet};
pub use codes::DiagnosticCode;

pub use crate::span::Span;
use std::cell::RefCell;
use std::fmt;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// A problem that makes the input invalid
    Error,
    /// Additional context attached to another diagnostic
    Note,
    /// A suggestion for fixing an issue
    Help,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Note => write!(f, "note"),
            Level::Help => write!(f, "help"),
        }
    }
}

/// A diagnostic message with severity and location.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    /// Severity
    pub level: Level,
    /// Main message
    pub message: String,
    /// Primary location
    pub span: Span,
    /// Optional code
    pub code: Option<DiagnosticCode>,
    /// Extra context lines
    pub notes: Vec<String>,
    /// Suggestions
    pub helps: Vec<String>,
    /// Source excerpts
    pub snippets: Vec<SourceSnippet>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
            snippets: Vec::new(),
        }
    }

    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach a source snippet.
    pub fn with_snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippets.push(snippet);
        self
    }

    /// Render the header line followed by snippets, notes and helps, one per
    /// line, each prefixed with `origin` when it is non-empty.
    ///
    /// ```
    /// use usc_util::diagnostic::{Diagnostic, DiagnosticCode};
    /// use usc_util::Span;
    ///
    /// let diag = Diagnostic::error("Illegal token", Span::new(4, 5, 1, 5))
    ///     .with_code(DiagnosticCode::E_LEX_ILLEGAL_TOKEN);
    /// assert_eq!(diag.render("main.us"), "main.us:1:5: error[E0101]: Illegal token");
    /// ```
    pub fn render(&self, origin: &str) -> String {
        let mut out = if origin.is_empty() {
            self.to_string()
        } else {
            format!("{}:{}:{}: {}", origin, self.span.line, self.span.column, self)
        };
        for snippet in &self.snippets {
            out.push('\n');
            out.push_str(&snippet.format());
        }
        for note in &self.notes {
            out.push_str(&format!("\n  = {}: {}", Level::Note, note));
        }
        for help in &self.helps {
            out.push_str(&format!("\n  = {}: {}", Level::Help, help));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}[{}]: {}", self.level, code, self.message),
            None => write!(f, "{}: {}", self.level, self.message),
        }
    }
}

/// Collects diagnostics for one thread of work.
///
/// The handler takes `&self` everywhere so a lexer can hold a shared
/// reference while the caller keeps querying it. It is not `Sync`: parallel
/// work keeps one handler per thread (or plain vectors) and merges them with
/// [`Handler::extend`].
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Create a new handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a pre-built diagnostic.
    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Move every diagnostic from `diagnostics` into this handler.
    pub fn extend(&self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.emit_diagnostic(diagnostic);
        }
    }

    /// Check if any errors have been reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    /// Number of errors reported.
    pub fn error_count(&self) -> usize {
        self.count(Level::Error)
    }

    fn count(&self, level: Level) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == level)
            .count()
    }

    /// A copy of everything reported so far, in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Remove and return every diagnostic.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    /// Drop every diagnostic.
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}
