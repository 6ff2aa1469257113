//! Core lexer implementation.
//!
//! This module contains the [`Lexer`] struct, its constructors and the
//! `next_token` dispatch. The scanners for each token family live in the
//! sibling modules and all return a [`Scan`].

use std::fmt;

use tracing::{debug, trace};
use usc_util::{FileId, Handler, Span};

use super::is_ident_start;
use crate::cursor::{Cursor, CursorSnapshot, PositionMode};
use crate::error::{LexError, LexErrorKind};
use crate::token::{Token, TokenKind, TokenValue};

/// Outcome of one scanner: a classified token or the reason it is illegal.
pub(crate) type Scan = Result<(TokenKind, TokenValue), LexErrorKind>;

type ErrorCallback<'a> = Box<dyn FnMut(&LexError) + 'a>;

/// Lexer for UniiScript source.
///
/// Each call to [`next_token`](Self::next_token) skips whitespace and
/// comments and produces exactly one token. Errors never abort lexing: the
/// offending token comes back as [`TokenKind::Illegal`] and the error
/// callback is invoked once with the reason.
///
/// # Example
///
/// ```
/// use usc_lex::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("main.us", "var a = 1;");
/// assert_eq!(lexer.next_token().kind, TokenKind::Var);
/// assert_eq!(lexer.next_token().kind, TokenKind::Ident);
/// ```
pub struct Lexer<'a> {
    source_name: String,

    pub(crate) cursor: Cursor<'a>,

    file_id: FileId,

    /// Most recently produced token, illegal or not.
    token: Option<Token>,

    /// Most recently produced successful token.
    prev_token: Option<Token>,

    on_error: ErrorCallback<'a>,

    token_start: usize,
    token_start_line: u32,
    token_start_column: u32,

    done: bool,
    error_count: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer that drops error reports.
    pub fn new<S>(source_name: impl Into<String>, source: &'a S) -> Self
    where
        S: AsRef<[u8]> + ?Sized,
    {
        Self::with_callback(source_name, source, |_| {})
    }

    /// Creates a lexer that calls `on_error` once per illegal token.
    ///
    /// ```
    /// use usc_lex::Lexer;
    ///
    /// let mut messages = Vec::new();
    /// let mut lexer = Lexer::with_callback("t.us", "1__0", |e| messages.push(e.to_string()));
    /// lexer.next_token();
    /// drop(lexer);
    /// assert_eq!(messages, ["Invalid integer literal"]);
    /// ```
    pub fn with_callback<S, F>(source_name: impl Into<String>, source: &'a S, on_error: F) -> Self
    where
        S: AsRef<[u8]> + ?Sized,
        F: FnMut(&LexError) + 'a,
    {
        Self {
            source_name: source_name.into(),
            cursor: Cursor::new(source.as_ref()),
            file_id: FileId::DUMMY,
            token: None,
            prev_token: None,
            on_error: Box::new(on_error),
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
            done: false,
            error_count: 0,
        }
    }

    /// Creates a lexer that reports every error to `handler` as a coded
    /// diagnostic.
    pub fn with_handler<S>(source_name: impl Into<String>, source: &'a S, handler: &'a Handler) -> Self
    where
        S: AsRef<[u8]> + ?Sized,
    {
        Self::with_callback(source_name, source, move |error: &LexError| {
            handler.emit_diagnostic(error.to_diagnostic())
        })
    }

    /// Sets how lines and columns are tracked from here on.
    pub fn with_position_mode(mut self, mode: PositionMode) -> Self {
        self.cursor.set_mode(mode);
        self
    }

    /// Attributes every produced span to `file_id`.
    pub fn with_file_id(mut self, file_id: FileId) -> Self {
        self.file_id = file_id;
        self
    }

    /// Returns the next token from the source.
    ///
    /// Once end of input is reached every further call returns
    /// [`TokenKind::Eof`] again.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        let scanned = if self.cursor.is_at_end() {
            self.done = true;
            Ok((TokenKind::Eof, TokenValue::None))
        } else {
            self.scan()
        };

        let token = match scanned {
            Ok((kind, value)) => {
                let token = Token::new(kind, value, self.token_span());
                self.prev_token = Some(token.clone());
                token
            },
            Err(kind) => {
                self.report_error(kind);
                Token::new(TokenKind::Illegal, TokenValue::None, self.token_span())
            },
        };

        trace!(
            kind = %token.kind,
            line = token.line(),
            column = token.column(),
            "token"
        );
        self.token = Some(token.clone());
        token
    }

    fn scan(&mut self) -> Scan {
        match self.cursor.current() {
            b if is_ident_start(b) => self.lex_identifier(),
            b if b.is_ascii_digit() => self.lex_number(),
            b'.' if self.cursor.peek(1).is_ascii_digit() => self.lex_number(),
            b'\'' => self.lex_char(),
            b'"' => self.lex_string(),
            _ => self.lex_operator(),
        }
    }

    /// Span from the current token start to the cursor.
    fn token_span(&self) -> Span {
        Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        )
        .with_file(self.file_id)
    }

    fn report_error(&mut self, kind: LexErrorKind) {
        let error = LexError::new(kind, self.token_span());
        debug!(
            source = %self.source_name,
            line = error.span.line,
            column = error.span.column,
            "{}",
            kind
        );
        self.error_count += 1;
        (self.on_error)(&error);
    }

    /// Saves the full lexer state.
    ///
    /// ```
    /// use usc_lex::{Lexer, TokenKind};
    ///
    /// let mut lexer = Lexer::new("t.us", "a b");
    /// let checkpoint = lexer.checkpoint();
    /// assert_eq!(lexer.next_token().kind, TokenKind::Ident);
    /// lexer.rewind(checkpoint);
    /// assert_eq!(lexer.position(), 0);
    /// ```
    pub fn checkpoint(&self) -> LexerCheckpoint {
        LexerCheckpoint {
            cursor: self.cursor.snapshot(),
            token: self.token.clone(),
            prev_token: self.prev_token.clone(),
            token_start: self.token_start,
            token_start_line: self.token_start_line,
            token_start_column: self.token_start_column,
            done: self.done,
        }
    }

    /// Restores a state saved by [`checkpoint`](Self::checkpoint).
    ///
    /// Errors reported after the checkpoint are not retracted and will be
    /// reported again if the same input is lexed a second time. Rewinding
    /// to a checkpoint taken before end of input makes the iterator yield
    /// tokens again.
    pub fn rewind(&mut self, checkpoint: LexerCheckpoint) {
        self.cursor.restore(checkpoint.cursor);
        self.token = checkpoint.token;
        self.prev_token = checkpoint.prev_token;
        self.token_start = checkpoint.token_start;
        self.token_start_line = checkpoint.token_start_line;
        self.token_start_column = checkpoint.token_start_column;
        self.done = checkpoint.done;
    }

    /// Name the source was registered under.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// File id stamped on produced spans.
    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    /// The token returned by the last `next_token` call.
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// The last token that was not illegal.
    pub fn prev_token(&self) -> Option<&Token> {
        self.prev_token.as_ref()
    }

    /// Returns the current line number (1-based).
    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// Returns the current column number (1-based).
    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    /// Returns the current byte offset.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Byte offset where the last token began.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Whether end of input has been returned.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Number of errors reported so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Active position mode.
    pub fn position_mode(&self) -> PositionMode {
        self.cursor.mode()
    }
}

impl fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("source_name", &self.source_name)
            .field("position", &self.cursor.position())
            .field("token", &self.token)
            .field("prev_token", &self.prev_token)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

/// Saved lexer state, see [`Lexer::checkpoint`].
#[derive(Clone, Debug)]
pub struct LexerCheckpoint {
    cursor: CursorSnapshot,
    token: Option<Token>,
    prev_token: Option<Token>,
    token_start: usize,
    token_start_line: u32,
    token_start_column: u32,
    done: bool,
}

/// Yields tokens up to, but not including, end of input.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        (!token.is_eof()).then_some(token)
    }
}
