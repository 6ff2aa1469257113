//! usc-lex - Lexical Analyzer for UniiScript
//!
//! This crate turns UniiScript source bytes into a stream of classified
//! tokens for the parser.
//!
//! # Example Usage
//!
//! ```
//! use usc_lex::{Lexer, TokenKind, TokenValue};
//!
//! let mut lexer = Lexer::new("main.us", "var c = 'a'; // single");
//!
//! let kinds: Vec<TokenKind> = lexer.by_ref().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [TokenKind::Var, TokenKind::Ident, TokenKind::Assign, TokenKind::Char, TokenKind::Semicolon]
//! );
//! assert_eq!(lexer.next_token().kind, TokenKind::Eof);
//! assert_eq!(lexer.prev_token().map(|t| &t.value), Some(&TokenValue::None));
//! ```
//!
//! # Module Structure
//!
//! - [`token`] - token kinds, values and the keyword table
//! - [`cursor`] - byte cursor with escape resolution
//! - [`lexer`] - the [`Lexer`] and its scanners
//! - [`error`] - lexical error kinds
//!
//! # Token Categories
//!
//! ## Keywords
//!
//! `var const func return if else switch case default fallthrough while do
//! for break continue goto label class abstract interface enum static public
//! private protected import export`
//!
//! ## Literals
//!
//! - **Identifier**: `[A-Za-z_][A-Za-z0-9_]*`, tagged with its DJB2 hash
//! - **Integer**: `42`, `1_000`, `0xFF`, `0o17`, `017` (octal), `0b1010`
//! - **Float**: `3.14`, `30_0.43_20`, `.5`
//! - **Character**: `'a'`, `'\n'`
//! - **String**: `"hello\nworld"`
//!
//! Escapes: `\n \r \t \\ \' \" \0`.
//!
//! ## Operators
//!
//! - **Arithmetic**: `+ - * / % **` and their `=` forms, `++ --`
//! - **Bitwise**: `& | ^ ~ << >>` and their `=` forms
//! - **Logical**: `&& || ^^ !`
//! - **Comparison**: `== != < <= > >=`
//! - **Other**: `? =`
//!
//! ## Delimiters
//!
//! `( ) { } [ ] , : ; . ...`
//!
//! ## Comments
//!
//! `// line` and `/* block */`. Block comments do not nest.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod token;

mod edge_cases;

// Re-export main types for convenience
pub use cursor::{Cursor, PositionMode};
pub use error::{LexError, LexErrorKind};
pub use lexer::{Lexer, LexerCheckpoint};
pub use token::{keyword_from_ident, Token, TokenKind, TokenValue};

/// Lexes a whole buffer, collecting tokens and errors.
///
/// The returned tokens end with the [`TokenKind::Eof`] token and include
/// the illegal ones.
///
/// ```
/// use usc_lex::{tokenize, PositionMode, TokenKind};
///
/// let (tokens, errors) = tokenize("t.us", "a $", PositionMode::ColumnOnly);
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[2].kind, TokenKind::Eof);
/// assert_eq!(errors.len(), 1);
/// ```
pub fn tokenize<S>(
    source_name: impl Into<String>,
    source: &S,
    mode: PositionMode,
) -> (Vec<Token>, Vec<LexError>)
where
    S: AsRef<[u8]> + ?Sized,
{
    let mut errors = Vec::new();
    let mut tokens = Vec::new();
    {
        let mut lexer = Lexer::with_callback(source_name, source, |e: &LexError| {
            errors.push(e.clone())
        })
        .with_position_mode(mode);
        loop {
            let token = lexer.next_token();
            let eof = token.is_eof();
            tokens.push(token);
            if eof {
                break;
            }
        }
    }
    (tokens, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to collect all token kinds from source.
    fn lex_all(source: &str) -> Vec<TokenKind> {
        Lexer::new("test.us", source).map(|t| t.kind).collect()
    }

    #[test]
    fn test_every_keyword_alone() {
        for kind in TokenKind::KEYWORDS {
            let mut lexer = Lexer::new("test.us", kind.as_str());
            assert_eq!(lexer.next_token().kind, kind);
            assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        }
    }

    #[test]
    fn test_var_declaration() {
        assert_eq!(
            lex_all("var a = 1;"),
            vec![
                TokenKind::Var,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::Int,
                TokenKind::Semicolon
            ]
        );
    }

    #[test]
    fn test_comments_around_declaration() {
        let expected = vec![
            TokenKind::Var,
            TokenKind::Ident,
            TokenKind::Assign,
            TokenKind::Char,
            TokenKind::Semicolon,
        ];
        assert_eq!(lex_all("var c = 'a'; // single"), expected);
        assert_eq!(
            lex_all(" /* multi line */ var c = 'a'; // single"),
            expected
        );
    }

    #[test]
    fn test_identifier_value() {
        let token = Lexer::new("test.us", "counter").next_token();
        assert_eq!(
            token.value,
            TokenValue::Ident {
                name: "counter".to_string(),
                hash: usc_util::hash("counter"),
            }
        );
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("test.us", "a");
        lexer.next_token();
        for _ in 0..5 {
            assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        }
        assert!(lexer.is_done());
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_empty_source() {
        let mut lexer = Lexer::new("test.us", "");
        let eof = lexer.next_token();
        assert!(eof.is_eof());
        assert_eq!(eof.span.start, 0);
        assert_eq!(eof.column(), 1);
    }

    #[test]
    fn test_prev_token_skips_illegal() {
        let mut lexer = Lexer::new("test.us", "a $");
        lexer.next_token();
        let illegal = lexer.next_token();
        assert!(illegal.is_illegal());
        assert_eq!(lexer.token().map(|t| t.kind), Some(TokenKind::Illegal));
        assert_eq!(lexer.prev_token().map(|t| t.kind), Some(TokenKind::Ident));
    }

    #[test]
    fn test_one_callback_per_illegal_token() {
        let mut messages = Vec::new();
        {
            let lexer = Lexer::with_callback("test.us", "$ 1__0 \"open", |e| {
                messages.push(e.to_string())
            });
            assert_eq!(lexer.count(), 3);
        }
        assert_eq!(
            messages,
            [
                "Illegal token",
                "Invalid integer literal",
                "Invalid string literal"
            ]
        );
    }

    #[test]
    fn test_column_only_positions() {
        let tokens: Vec<Token> = Lexer::new("test.us", "var a\n= 1").collect();
        let positions: Vec<(u32, u32)> = tokens.iter().map(|t| (t.line(), t.column())).collect();
        assert_eq!(positions, vec![(1, 1), (1, 5), (1, 7), (1, 9)]);
    }

    #[test]
    fn test_line_column_positions() {
        let tokens: Vec<Token> = Lexer::new("test.us", "var a\n  = 1")
            .with_position_mode(PositionMode::LineColumn)
            .collect();
        let positions: Vec<(u32, u32)> = tokens.iter().map(|t| (t.line(), t.column())).collect();
        assert_eq!(positions, vec![(1, 1), (1, 5), (2, 3), (2, 5)]);
    }

    #[test]
    fn test_spans_cover_lexemes() {
        let source = "func add(x, y) { return x + y; }";
        for token in Lexer::new("test.us", source) {
            let text = &source[token.span.start..token.span.end];
            match token.kind {
                TokenKind::Ident => assert_eq!(token.value, TokenValue::ident(text)),
                kind => assert_eq!(kind.as_str(), text),
            }
        }
    }

    #[test]
    fn test_with_handler_emits_coded_diagnostics() {
        let handler = usc_util::Handler::new();
        let count = Lexer::with_handler("test.us", "'ab' @", &handler).count();
        assert_eq!(count, 4);
        let diagnostics = handler.diagnostics();
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[0].to_string(), "error[E0105]: Invalid character literal");
        assert_eq!(diagnostics[2].to_string(), "error[E0101]: Illegal token");
    }

    #[test]
    fn test_file_id_on_spans() {
        let token = Lexer::new("test.us", "x")
            .with_file_id(usc_util::FileId::new(4))
            .next_token();
        assert_eq!(token.span.file_id.index(), 4);
    }

    #[test]
    fn test_checkpoint_rewind_replays_tokens() {
        let mut lexer = Lexer::new("test.us", "a + b");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        let checkpoint = lexer.checkpoint();

        let first: Vec<Token> = lexer.by_ref().collect();
        assert!(lexer.is_done());

        lexer.rewind(checkpoint);
        assert!(!lexer.is_done());
        assert_eq!(lexer.prev_token().map(|t| t.kind), Some(TokenKind::Ident));
        let second: Vec<Token> = lexer.by_ref().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rewind_restores_token_start() {
        let mut lexer = Lexer::new("test.us", "ab  cd");
        lexer.next_token();
        assert_eq!(lexer.token_start(), 0);
        let checkpoint = lexer.checkpoint();

        lexer.next_token();
        assert_eq!(lexer.token_start(), 4);
        lexer.next_token();
        assert_eq!(lexer.token_start(), 6);

        lexer.rewind(checkpoint);
        assert_eq!(lexer.token_start(), 0);
        assert_eq!(lexer.position(), 2);
        assert_eq!(lexer.token().map(|t| t.span.start), Some(0));
    }

    #[test]
    fn test_tokenize_collects_errors() {
        let (tokens, errors) = tokenize("test.us", b"1.5_ x", PositionMode::ColumnOnly);
        assert_eq!(tokens.len(), 3);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, LexErrorKind::InvalidFloat);
        assert_eq!(errors[0].span, tokens[0].span);
    }
}
