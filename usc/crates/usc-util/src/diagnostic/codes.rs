//! Diagnostic codes.
//!
//! Codes follow the format `{prefix}{number:04}`. Lexical errors live in
//! the `E01xx` block.
//!
//! # Examples
//!
//! ```
//! use usc_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::E_LEX_INVALID_INTEGER;
//! assert_eq!(code.prefix(), "E");
//! assert_eq!(code.number(), 103);
//! assert_eq!(code.as_str(), "E0103");
//! ```

use std::fmt;

/// A unique code identifying a diagnostic message.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    /// The prefix (`"E"` for errors, `"W"` for warnings)
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
}

impl DiagnosticCode {
    /// Create a new diagnostic code.
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    /// Get the prefix.
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Get the numeric identifier.
    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Render the code, zero-padding the number to four digits.
    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    /// Returns true for error codes.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.prefix == "E"
    }

    // ==================== LEXER ====================

    /// A byte that starts no token.
    pub const E_LEX_ILLEGAL_TOKEN: Self = Self::new("E", 101);
    /// A backslash followed by a byte outside the escape table.
    pub const E_LEX_INVALID_ESCAPE: Self = Self::new("E", 102);
    /// A digit run that does not parse as a 64-bit integer.
    pub const E_LEX_INVALID_INTEGER: Self = Self::new("E", 103);
    /// A digit run with a fraction that does not parse as a float.
    pub const E_LEX_INVALID_FLOAT: Self = Self::new("E", 104);
    /// A malformed or unterminated character literal.
    pub const E_LEX_INVALID_CHAR: Self = Self::new("E", 105);
    /// An unterminated string, or one broken by a raw newline.
    pub const E_LEX_INVALID_STRING: Self = Self::new("E", 106);
}

impl fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:04}", self.prefix, self.number)
    }
}
