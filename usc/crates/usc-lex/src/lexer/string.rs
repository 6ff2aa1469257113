//! String and character literal lexing.
//!
//! Both scanners read through [`Cursor::advance_escaped`], so escape
//! sequences are resolved byte by byte as the literal is consumed.
//!
//! [`Cursor::advance_escaped`]: crate::cursor::Cursor::advance_escaped

use crate::error::LexErrorKind;
use crate::lexer::core::Scan;
use crate::token::{TokenKind, TokenValue};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a double-quoted string literal.
    ///
    /// A raw line feed or the end of input before the closing quote makes the
    /// literal invalid. A bad escape does not stop the scan: the literal is
    /// still consumed up to its closing quote and then reported.
    pub(crate) fn lex_string(&mut self) -> Scan {
        let mut bytes = Vec::new();
        let mut bad_escape = None;

        loop {
            if let Err(err) = self.cursor.advance_escaped() {
                bad_escape = Some(err);
            }
            if self.cursor.is_at_end() {
                return Err(LexErrorKind::InvalidString);
            }

            let b = self.cursor.current();
            if !self.cursor.is_escaped() {
                match b {
                    b'"' => break,
                    b'\n' => return Err(LexErrorKind::InvalidString),
                    _ => {},
                }
            }
            bytes.push(b);
        }
        self.cursor.advance();

        match bad_escape {
            Some(err) => Err(err),
            None => Ok((
                TokenKind::Str,
                TokenValue::Str(String::from_utf8_lossy(&bytes).into_owned()),
            )),
        }
    }

    /// Lexes a single-quoted character literal holding exactly one byte.
    pub(crate) fn lex_char(&mut self) -> Scan {
        let escape = self.cursor.advance_escaped();
        if self.cursor.is_at_end() {
            return Err(LexErrorKind::InvalidChar);
        }

        let byte = self.cursor.current();
        if byte == b'\'' && !self.cursor.is_escaped() {
            self.cursor.advance();
            return Err(LexErrorKind::InvalidChar);
        }

        self.cursor.advance();
        if self.cursor.current() != b'\'' {
            return Err(LexErrorKind::InvalidChar);
        }
        self.cursor.advance();

        escape?;
        Ok((TokenKind::Char, TokenValue::Char(byte)))
    }
}
