//! Source location tracking.
//!
//! # Examples
//!
//! ```
//! use usc_util::span::{FileId, Span};
//!
//! let span = Span::new(4, 9, 1, 5);
//! assert_eq!(span.len(), 5);
//!
//! let span = span.with_file(FileId::new(2));
//! assert_eq!(span.file_id.index(), 2);
//! ```

/// Identifies one source file within a compilation session.
///
/// Ids are handed out by the driver in the order files appear on the
/// command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub usize);

impl FileId {
    /// A placeholder id for single-buffer use and tests.
    pub const DUMMY: FileId = FileId(0);

    /// Creates a new `FileId`.
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Returns the raw index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl Default for FileId {
    #[inline]
    fn default() -> Self {
        Self::DUMMY
    }
}

/// A byte range in a source buffer plus the 1-based line/column of its
/// first byte.
///
/// Line and column come from the lexer's position tracking, so under the
/// column-only mode `line` stays `1` and `column` is the byte offset plus one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Line number (1-based).
    pub line: u32,
    /// Column number (1-based).
    pub column: u32,
    /// File the span belongs to.
    pub file_id: FileId,
}

static_assertions::assert_impl_all!(Span: Copy, Send, Sync);

impl Span {
    /// Dummy span for testing.
    pub const DUMMY: Span = Span {
        start: 0,
        end: 0,
        line: 0,
        column: 0,
        file_id: FileId::DUMMY,
    };

    /// Creates a span in the dummy file.
    #[inline]
    pub const fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
            file_id: FileId::DUMMY,
        }
    }

    /// Returns the same span attributed to `file_id`.
    #[inline]
    pub const fn with_file(mut self, file_id: FileId) -> Self {
        self.file_id = file_id;
        self
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
