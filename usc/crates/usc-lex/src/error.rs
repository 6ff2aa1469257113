//! Lexical errors.
//!
//! Every error is local to a single token: the scanner that hit it reports
//! one [`LexErrorKind`], the driver turns the token into
//! [`TokenKind::Illegal`](crate::TokenKind::Illegal) and hands a
//! [`LexError`] to the error callback.

use thiserror::Error;
use usc_util::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Span};

/// What went wrong while scanning a token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// The leading byte starts no token.
    #[error("Illegal token")]
    IllegalToken,

    /// A backslash followed by a byte outside the escape table.
    #[error("Invalid escape sequence")]
    InvalidEscape,

    /// The digits do not form a 64-bit integer.
    #[error("Invalid integer literal")]
    InvalidInteger,

    /// The digits do not form a float.
    #[error("Invalid float literal")]
    InvalidFloat,

    /// Empty, unterminated or overlong character literal.
    #[error("Invalid character literal")]
    InvalidChar,

    /// String broken by a raw newline or by the end of input.
    #[error("Invalid string literal")]
    InvalidString,
}

impl LexErrorKind {
    /// Fixed message, identical to the `Display` output.
    pub const fn message(self) -> &'static str {
        match self {
            LexErrorKind::IllegalToken => "Illegal token",
            LexErrorKind::InvalidEscape => "Invalid escape sequence",
            LexErrorKind::InvalidInteger => "Invalid integer literal",
            LexErrorKind::InvalidFloat => "Invalid float literal",
            LexErrorKind::InvalidChar => "Invalid character literal",
            LexErrorKind::InvalidString => "Invalid string literal",
        }
    }

    /// Diagnostic code for this kind.
    pub const fn code(self) -> DiagnosticCode {
        match self {
            LexErrorKind::IllegalToken => DiagnosticCode::E_LEX_ILLEGAL_TOKEN,
            LexErrorKind::InvalidEscape => DiagnosticCode::E_LEX_INVALID_ESCAPE,
            LexErrorKind::InvalidInteger => DiagnosticCode::E_LEX_INVALID_INTEGER,
            LexErrorKind::InvalidFloat => DiagnosticCode::E_LEX_INVALID_FLOAT,
            LexErrorKind::InvalidChar => DiagnosticCode::E_LEX_INVALID_CHAR,
            LexErrorKind::InvalidString => DiagnosticCode::E_LEX_INVALID_STRING,
        }
    }

    fn help(self) -> Option<&'static str> {
        match self {
            LexErrorKind::InvalidEscape => {
                Some("valid escapes are \\n \\r \\t \\\\ \\' \\\" and \\0")
            },
            LexErrorKind::InvalidInteger => {
                Some("`_` separators must sit between digits and the value must fit in 64 bits")
            },
            LexErrorKind::InvalidFloat => Some("`_` separators must sit between digits"),
            LexErrorKind::InvalidChar => Some("a character literal holds exactly one byte"),
            LexErrorKind::InvalidString => Some("strings must close on the line they start"),
            LexErrorKind::IllegalToken => None,
        }
    }
}

/// A lexical error with the span of the offending lexeme.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct LexError {
    /// Error category.
    pub kind: LexErrorKind,
    /// Bytes consumed by the failed token.
    pub span: Span,
}

impl LexError {
    /// Creates a new error.
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Fixed English message.
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }

    /// Converts the error into a coded diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let builder = DiagnosticBuilder::error(self.message())
            .code(self.kind.code())
            .span(self.span);
        match self.kind.help() {
            Some(help) => builder.help(help).build(),
            None => builder.build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use usc_util::Level;

    const ALL: [LexErrorKind; 6] = [
        LexErrorKind::IllegalToken,
        LexErrorKind::InvalidEscape,
        LexErrorKind::InvalidInteger,
        LexErrorKind::InvalidFloat,
        LexErrorKind::InvalidChar,
        LexErrorKind::InvalidString,
    ];

    #[test]
    fn test_messages_match_display() {
        for kind in ALL {
            assert_eq!(kind.to_string(), kind.message());
        }
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(LexErrorKind::IllegalToken.to_string(), "Illegal token");
        assert_eq!(LexErrorKind::InvalidEscape.to_string(), "Invalid escape sequence");
        assert_eq!(LexErrorKind::InvalidInteger.to_string(), "Invalid integer literal");
        assert_eq!(LexErrorKind::InvalidFloat.to_string(), "Invalid float literal");
        assert_eq!(LexErrorKind::InvalidChar.to_string(), "Invalid character literal");
        assert_eq!(LexErrorKind::InvalidString.to_string(), "Invalid string literal");
    }

    #[test]
    fn test_error_display_is_message() {
        let err = LexError::new(LexErrorKind::InvalidFloat, Span::new(0, 3, 1, 1));
        assert_eq!(err.to_string(), "Invalid float literal");
    }

    #[test]
    fn test_to_diagnostic() {
        let span = Span::new(2, 5, 1, 3);
        let diag = LexError::new(LexErrorKind::InvalidEscape, span).to_diagnostic();
        assert_eq!(diag.level, Level::Error);
        assert_eq!(diag.message, "Invalid escape sequence");
        assert_eq!(diag.code, Some(DiagnosticCode::E_LEX_INVALID_ESCAPE));
        assert_eq!(diag.span, span);
        assert_eq!(diag.helps.len(), 1);
    }

    #[test]
    fn test_illegal_token_has_no_help() {
        let diag = LexError::new(LexErrorKind::IllegalToken, Span::DUMMY).to_diagnostic();
        assert!(diag.helps.is_empty());
    }
}
