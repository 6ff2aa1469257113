//! Byte cursor for traversing UniiScript source.
//!
//! The cursor owns the read position into a byte buffer and always has a
//! "current" byte primed. Past the end of input the current byte is `0` and
//! further advances are no-ops.
//!
//! Escape resolution happens here rather than in the string scanner:
//! [`Cursor::advance_escaped`] replaces a backslash sequence with the byte it
//! stands for and raises the escape flag for exactly that one position.

use crate::error::LexErrorKind;

/// How line and column numbers evolve as the cursor advances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PositionMode {
    /// Line stays at `1`; column counts every byte from the start of input.
    #[default]
    ColumnOnly,
    /// Advancing past a line feed moves to column `1` of the next line.
    LineColumn,
}

/// A cursor over source bytes.
///
/// # Example
///
/// ```
/// use usc_lex::cursor::Cursor;
///
/// let mut cursor = Cursor::new(b"var");
/// assert_eq!(cursor.current(), b'v');
/// assert_eq!(cursor.peek(1), b'a');
/// cursor.advance();
/// assert_eq!(cursor.current(), b'a');
/// assert_eq!(cursor.column(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    source: &'a [u8],

    /// Offset of the current byte.
    position: usize,

    /// Byte under the cursor, possibly substituted by an escape.
    current: u8,

    escaped: bool,

    line: u32,
    column: u32,
    mode: PositionMode,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor in [`PositionMode::ColumnOnly`] with the first byte
    /// primed.
    pub fn new(source: &'a [u8]) -> Self {
        Self::with_mode(source, PositionMode::default())
    }

    /// Creates a cursor with an explicit position mode.
    pub fn with_mode(source: &'a [u8], mode: PositionMode) -> Self {
        Self {
            source,
            position: 0,
            current: source.first().copied().unwrap_or(0),
            escaped: false,
            line: 1,
            column: 1,
            mode,
        }
    }

    /// The byte under the cursor, or `0` past the end.
    #[inline]
    pub fn current(&self) -> u8 {
        self.current
    }

    /// The raw byte `offset` positions ahead of the cursor, or `0` past the
    /// end. `peek(0)` is the unsubstituted current byte.
    #[inline]
    pub fn peek(&self, offset: usize) -> u8 {
        self.source
            .get(self.position + offset)
            .copied()
            .unwrap_or(0)
    }

    /// Whether the current byte was produced by an escape sequence.
    #[inline]
    pub fn is_escaped(&self) -> bool {
        self.escaped
    }

    /// Moves one byte forward and clears the escape flag.
    ///
    /// Does nothing at the end of input.
    pub fn advance(&mut self) {
        if self.is_at_end() {
            self.current = 0;
            self.escaped = false;
            return;
        }

        let consumed = self.source[self.position];
        self.position += 1;
        self.current = self.peek(0);
        self.escaped = false;

        if self.mode == PositionMode::LineColumn && consumed == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Moves one byte forward, resolving a backslash escape if one starts
    /// there.
    ///
    /// On a valid escape both bytes are consumed, the current byte becomes
    /// the mapped value and [`is_escaped`](Self::is_escaped) turns true. On an
    /// invalid one the cursor rests on the byte after the backslash and
    /// [`LexErrorKind::InvalidEscape`] is returned.
    ///
    /// ```
    /// use usc_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new(br#""\n""#);
    /// cursor.advance_escaped().unwrap();
    /// assert_eq!(cursor.current(), b'\n');
    /// assert!(cursor.is_escaped());
    /// ```
    pub fn advance_escaped(&mut self) -> Result<(), LexErrorKind> {
        self.advance();
        if self.current != b'\\' || self.is_at_end() {
            return Ok(());
        }

        self.advance();
        match unescape(self.current) {
            Some(byte) if !self.is_at_end() => {
                self.current = byte;
                self.escaped = true;
                Ok(())
            },
            _ => Err(LexErrorKind::InvalidEscape),
        }
    }

    /// Returns true when every byte has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Current line (1-based).
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Current column (1-based).
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Byte offset of the current byte.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The active position mode.
    #[inline]
    pub fn mode(&self) -> PositionMode {
        self.mode
    }

    /// Changes how later advances track lines.
    pub fn set_mode(&mut self, mode: PositionMode) {
        self.mode = mode;
    }

    /// Source bytes from `start` up to the cursor.
    pub fn slice_from(&self, start: usize) -> &'a [u8] {
        &self.source[start.min(self.position)..self.position]
    }

    /// The whole source buffer.
    #[inline]
    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    /// Captures the cursor state.
    ///
    /// ```
    /// use usc_lex::cursor::Cursor;
    ///
    /// let mut cursor = Cursor::new(b"abc");
    /// let snapshot = cursor.snapshot();
    /// cursor.advance();
    /// cursor.restore(snapshot);
    /// assert_eq!(cursor.current(), b'a');
    /// ```
    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            current: self.current,
            escaped: self.escaped,
            line: self.line,
            column: self.column,
        }
    }

    /// Returns to a state captured by [`snapshot`](Self::snapshot).
    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.current = snapshot.current;
        self.escaped = snapshot.escaped;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}

/// Saved cursor state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorSnapshot {
    position: usize,
    current: u8,
    escaped: bool,
    line: u32,
    column: u32,
}

/// Maps the byte after a backslash to the byte it denotes.
#[inline]
fn unescape(byte: u8) -> Option<u8> {
    match byte {
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        b'\\' => Some(b'\\'),
        b'\'' => Some(b'\''),
        b'"' => Some(b'"'),
        b'0' => Some(0),
        _ => None,
    }
}
