//! Number literal lexing.
//!
//! Decimal literals are a run of digits and `_` separators, optionally
//! followed by `.` and a fraction run. `0x`, `0o` and `0b` prefixes select a
//! radix and always yield integers. An integer run with a leading `0` and
//! more digits is octal (`017` is 15, `08` is invalid); floats are always
//! decimal. There is no exponent notation.

use std::borrow::Cow;

use crate::error::LexErrorKind;
use crate::lexer::core::Scan;
use crate::token::{TokenKind, TokenValue};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an integer or float literal.
    ///
    /// Called on a digit, or on a `.` that is followed by a digit.
    pub(crate) fn lex_number(&mut self) -> Scan {
        let start = self.cursor.position();

        if self.cursor.current() == b'0' {
            if let Some(radix) = radix_for_prefix(self.cursor.peek(1)) {
                return self.lex_prefixed_integer(start, radix);
            }
        }

        self.eat_digit_run();
        if self.cursor.current() != b'.' {
            let text = self.lexeme(start);
            let radix = if text.len() > 1 && text.starts_with('0') { 8 } else { 10 };
            let value = parse_integer(&text, radix, false)?;
            return Ok((TokenKind::Int, TokenValue::Int(value)));
        }

        self.cursor.advance();
        self.eat_digit_run();
        let value = parse_float(&self.lexeme(start))?;
        Ok((TokenKind::Float, TokenValue::Float(value)))
    }

    /// Lexes `0x..`, `0o..` or `0b..`.
    ///
    /// Every alphanumeric byte after the prefix belongs to the literal, so a
    /// digit outside the radix invalidates the whole token.
    fn lex_prefixed_integer(&mut self, start: usize, radix: u32) -> Scan {
        self.cursor.advance();
        self.cursor.advance();
        while self.cursor.current().is_ascii_alphanumeric() || self.cursor.current() == b'_' {
            self.cursor.advance();
        }

        let text = self.lexeme(start);
        let value = parse_integer(&text[2..], radix, true)?;
        Ok((TokenKind::Int, TokenValue::Int(value)))
    }

    fn eat_digit_run(&mut self) {
        while self.cursor.current().is_ascii_digit() || self.cursor.current() == b'_' {
            self.cursor.advance();
        }
    }

    fn lexeme(&self, start: usize) -> Cow<'a, str> {
        String::from_utf8_lossy(self.cursor.slice_from(start))
    }
}

fn radix_for_prefix(b: u8) -> Option<u32> {
    match b {
        b'x' | b'X' => Some(16),
        b'o' | b'O' => Some(8),
        b'b' | b'B' => Some(2),
        _ => None,
    }
}

/// Removes `_` separators from `text`, checking each one sits between two
/// digits of `radix`. A leading separator is accepted only right after a
/// base prefix.
///
/// Returns `None` for a misplaced separator or a non-digit byte.
fn strip_separators(text: &str, radix: u32, after_prefix: bool) -> Option<String> {
    let bytes = text.as_bytes();
    let is_digit = |b: u8| (b as char).is_digit(radix);
    let mut digits = String::with_capacity(bytes.len());

    for (i, &b) in bytes.iter().enumerate() {
        if b == b'_' {
            let before = match i {
                0 => after_prefix,
                _ => is_digit(bytes[i - 1]),
            };
            let after = bytes.get(i + 1).is_some_and(|&next| is_digit(next));
            if !before || !after {
                return None;
            }
        } else if is_digit(b) {
            digits.push(b as char);
        } else {
            return None;
        }
    }

    Some(digits)
}

fn parse_integer(text: &str, radix: u32, after_prefix: bool) -> Result<i64, LexErrorKind> {
    let digits = strip_separators(text, radix, after_prefix).ok_or(LexErrorKind::InvalidInteger)?;
    i64::from_str_radix(&digits, radix).map_err(|_| LexErrorKind::InvalidInteger)
}

fn parse_float(text: &str) -> Result<f64, LexErrorKind> {
    let (whole, fraction) = text.split_once('.').ok_or(LexErrorKind::InvalidFloat)?;
    let whole = strip_separators(whole, 10, false).ok_or(LexErrorKind::InvalidFloat)?;
    let fraction = strip_separators(fraction, 10, false).ok_or(LexErrorKind::InvalidFloat)?;
    if whole.is_empty() && fraction.is_empty() {
        return Err(LexErrorKind::InvalidFloat);
    }

    format!("{}.{}", whole, fraction)
        .parse::<f64>()
        .map_err(|_| LexErrorKind::InvalidFloat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_one(source: &str) -> (TokenKind, TokenValue) {
        let token = Lexer::new("number.us", source).next_token();
        (token.kind, token.value)
    }

    fn int(source: &str) -> i64 {
        match lex_one(source) {
            (TokenKind::Int, TokenValue::Int(n)) => n,
            other => panic!("expected integer for {source:?}, got {other:?}"),
        }
    }

    fn float(source: &str) -> f64 {
        match lex_one(source) {
            (TokenKind::Float, TokenValue::Float(x)) => x,
            other => panic!("expected float for {source:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_decimal_integers() {
        assert_eq!(int("20"), 20);
        assert_eq!(int("0"), 0);
        assert_eq!(int("30_0"), 300);
        assert_eq!(int("1_000_000"), 1_000_000);
    }

    #[test]
    fn test_leading_zero_is_octal() {
        assert_eq!(int("00"), 0);
        assert_eq!(int("007"), 7);
        assert_eq!(int("017"), 15);
        assert_eq!(int("0_17"), 15);
        assert_eq!(int("0777_777"), 0o777_777);
    }

    #[test]
    fn test_leading_zero_rejects_decimal_digits() {
        let mut errors = Vec::new();
        {
            let lexer = Lexer::with_callback("number.us", "08 09 0_8 018", |e| errors.push(e.kind));
            assert!(lexer.map(|t| t.kind).all(|k| k == TokenKind::Illegal));
        }
        assert_eq!(errors, vec![LexErrorKind::InvalidInteger; 4]);
    }

    #[test]
    fn test_leading_zero_float_is_decimal() {
        assert_eq!(float("017.5"), 17.5);
        assert_eq!(float("09.0"), 9.0);
    }

    #[test]
    fn test_i64_bounds() {
        assert_eq!(int("9223372036854775807"), i64::MAX);
        assert_eq!(lex_one("9223372036854775808").0, TokenKind::Illegal);
    }

    #[test]
    fn test_floats() {
        assert_eq!(float("2.0"), 2.0);
        assert_eq!(float("0.0"), 0.0);
        assert_eq!(float("30_0.0"), 300.0);
        assert_eq!(float("30_0.43_20"), 300.432);
        assert_eq!(float("1."), 1.0);
        assert_eq!(float(".5"), 0.5);
    }

    #[test]
    fn test_prefixed_integers() {
        assert_eq!(int("0xff"), 255);
        assert_eq!(int("0XFF"), 255);
        assert_eq!(int("0o17"), 15);
        assert_eq!(int("0b1010"), 10);
        assert_eq!(int("0x_dead_beef"), 0xdead_beef);
    }

    #[test]
    fn test_prefixed_integer_never_float() {
        let mut lexer = Lexer::new("number.us", "0x10.5");
        assert_eq!(lexer.next_token().value, TokenValue::Int(16));
        assert_eq!(lexer.next_token().value, TokenValue::Float(0.5));
    }

    #[test]
    fn test_invalid_integers() {
        for source in ["1__0", "30_", "0x", "0b102", "0xfg", "0o8"] {
            assert_eq!(lex_one(source).0, TokenKind::Illegal, "{source}");
        }
    }

    #[test]
    fn test_invalid_floats() {
        for source in ["1._5", "1_.5", "1.5_", "1.5__0"] {
            assert_eq!(lex_one(source).0, TokenKind::Illegal, "{source}");
        }
    }

    #[test]
    fn test_number_followed_by_identifier() {
        let mut lexer = Lexer::new("number.us", "12ab");
        assert_eq!(lexer.next_token().value, TokenValue::Int(12));
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
    }

    #[test]
    fn test_strip_separators() {
        assert_eq!(strip_separators("1_2", 10, false).as_deref(), Some("12"));
        assert_eq!(strip_separators("_1", 10, false), None);
        assert_eq!(strip_separators("_1", 16, true).as_deref(), Some("1"));
        assert_eq!(strip_separators("", 10, false).as_deref(), Some(""));
        assert_eq!(strip_separators("1a", 10, false), None);
    }

    #[test]
    fn test_error_messages() {
        let mut messages = Vec::new();
        {
            let mut lexer = Lexer::with_callback("number.us", "1__0 1.5__0", |e| {
                messages.push(e.message())
            });
            while !lexer.next_token().is_eof() {}
        }
        assert_eq!(messages, ["Invalid integer literal", "Invalid float literal"]);
    }
}
