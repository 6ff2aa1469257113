//! Operator and punctuation lexing.
//!
//! Symbols are matched by maximal munch with up to two bytes of lookahead.
//! The cursor is left on the last byte of the symbol while matching and a
//! single trailing advance consumes it.

use crate::error::LexErrorKind;
use crate::lexer::core::Scan;
use crate::token::{TokenKind, TokenValue};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an operator or delimiter starting at the current byte.
    pub(crate) fn lex_operator(&mut self) -> Scan {
        use TokenKind::*;

        let kind = match self.cursor.current() {
            b'+' => self.pick2(b'+', Inc, b'=', AddAssign, Add),
            b'-' => self.pick2(b'-', Dec, b'=', SubAssign, Sub),
            b'*' => {
                if self.match_next(b'*') {
                    self.pick(b'=', PowAssign, Pow)
                } else {
                    self.pick(b'=', MulAssign, Mul)
                }
            },
            b'/' => self.pick(b'=', DivAssign, Div),
            b'%' => self.pick(b'=', ModAssign, Mod),
            b'&' => self.pick2(b'&', And, b'=', BitAndAssign, BitAnd),
            b'|' => self.pick2(b'|', Or, b'=', BitOrAssign, BitOr),
            b'^' => self.pick2(b'^', Xor, b'=', BitXorAssign, BitXor),
            b'~' => BitNot,
            b'<' => {
                if self.match_next(b'<') {
                    self.pick(b'=', ShiftLeftAssign, ShiftLeft)
                } else {
                    self.pick(b'=', LessEqual, Less)
                }
            },
            b'>' => {
                if self.match_next(b'>') {
                    self.pick(b'=', ShiftRightAssign, ShiftRight)
                } else {
                    self.pick(b'=', GreaterEqual, Greater)
                }
            },
            b'!' => self.pick(b'=', NotEqual, Not),
            b'=' => self.pick(b'=', Equal, Assign),
            b'.' => {
                if self.cursor.peek(1) == b'.' && self.cursor.peek(2) == b'.' {
                    self.cursor.advance();
                    self.cursor.advance();
                    Ellipsis
                } else {
                    Dot
                }
            },
            b'?' => Question,
            b'(' => LeftParen,
            b')' => RightParen,
            b'{' => LeftBrace,
            b'}' => RightBrace,
            b'[' => LeftBracket,
            b']' => RightBracket,
            b',' => Comma,
            b':' => Colon,
            b';' => Semicolon,
            _ => {
                self.skip_illegal_char();
                return Err(LexErrorKind::IllegalToken);
            },
        };

        self.cursor.advance();
        Ok((kind, TokenValue::None))
    }

    /// Steps onto the next byte if it is `expected`.
    fn match_next(&mut self, expected: u8) -> bool {
        if self.cursor.peek(1) == expected {
            self.cursor.advance();
            true
        } else {
            false
        }
    }

    fn pick(&mut self, next: u8, long: TokenKind, short: TokenKind) -> TokenKind {
        if self.match_next(next) {
            long
        } else {
            short
        }
    }

    fn pick2(
        &mut self,
        first: u8,
        first_kind: TokenKind,
        second: u8,
        second_kind: TokenKind,
        short: TokenKind,
    ) -> TokenKind {
        if self.match_next(first) {
            first_kind
        } else {
            self.pick(second, second_kind, short)
        }
    }

    /// Consumes an unrecognized byte, plus the continuation bytes of a
    /// multi-byte UTF-8 character so it is reported once.
    fn skip_illegal_char(&mut self) {
        let lead = self.cursor.current();
        self.cursor.advance();
        if lead >= 0xC0 {
            while !self.cursor.is_at_end() && (0x80..0xC0).contains(&self.cursor.current()) {
                self.cursor.advance();
            }
        }
    }
}
