//! Whitespace and comment skipping.

use tracing::debug;

use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Skips spaces, tabs, line breaks and comments in front of the next
    /// token.
    ///
    /// A `/` that opens no comment stops the loop and is left for the
    /// operator scanner.
    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.current() {
                b' ' | b'\t' | b'\n' | b'\r' => self.cursor.advance(),
                b'/' if self.skip_comment() => {},
                _ => return,
            }
        }
    }

    /// Skips one comment starting at the current `/`.
    ///
    /// Returns false, without moving, if the `/` starts no comment.
    fn skip_comment(&mut self) -> bool {
        match self.cursor.peek(1) {
            b'/' => {
                self.skip_line_comment();
                true
            },
            b'*' => {
                self.skip_block_comment();
                true
            },
            _ => false,
        }
    }

    /// Skips `//` through the end of the line, including the line feed.
    fn skip_line_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current() != b'\n' {
            self.cursor.advance();
        }
        self.cursor.advance();
    }

    /// Skips `/* ... */`. Block comments do not nest.
    fn skip_block_comment(&mut self) {
        let start = self.cursor.position();
        self.cursor.advance();
        self.cursor.advance();

        while !self.cursor.is_at_end() {
            if self.cursor.current() == b'*' && self.cursor.peek(1) == b'/' {
                self.cursor.advance();
                self.cursor.advance();
                return;
            }
            self.cursor.advance();
        }

        debug!(
            source = %self.source_name(),
            offset = start,
            "unterminated block comment runs to end of input"
        );
    }
}
