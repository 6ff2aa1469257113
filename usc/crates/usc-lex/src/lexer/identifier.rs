//! Identifier and keyword lexing.

use crate::lexer::core::Scan;
use crate::token::{keyword_from_ident, TokenKind, TokenValue};
use crate::Lexer;

/// `[A-Za-z_]`
#[inline]
pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// `[A-Za-z0-9_]`
#[inline]
pub(crate) fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl<'a> Lexer<'a> {
    /// Lexes an identifier, reclassifying reserved words.
    ///
    /// Keywords keep the identifier payload, hash included.
    pub(crate) fn lex_identifier(&mut self) -> Scan {
        let start = self.cursor.position();
        while is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }

        let name = String::from_utf8_lossy(self.cursor.slice_from(start)).into_owned();
        let kind = keyword_from_ident(&name).unwrap_or(TokenKind::Ident);
        Ok((kind, TokenValue::ident(name)))
    }
}
