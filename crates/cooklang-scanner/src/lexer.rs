//! The cursor contract between the scanner and its host.
//!
//! The scanner never sees the document. It reads through [`Lexer`], which an
//! incremental parsing engine implements over whatever text representation
//! it keeps. [`StrLexer`] is the adapter for a plain `&str`.
//!
//! Contract
//! - `advance(true)` consumes a character that is not part of any token:
//!   while nothing else has been consumed in the current call, it moves the
//!   token start forward.
//! - `mark_end()` pins the token end at the current position, overwriting any
//!   earlier mark. Without a mark the token ends wherever the cursor stopped.
//! - When [`Scanner::scan`] reports no match, the host discards everything
//!   advanced during the call, so a failed scan has zero net effect.
//!
//! [`Scanner::scan`]: crate::Scanner::scan

use crate::token::Span;

/// The host capabilities the scanner consumes.
pub trait Lexer {
    /// The current lookahead, or `None` at end of input.
    fn peek(&self) -> Option<char>;

    /// Consumes the lookahead. `skip` marks it as insignificant (leading
    /// whitespace that is not part of the token).
    fn advance(&mut self, skip: bool);

    /// Records the current position as the end of the token being built.
    fn mark_end(&mut self);

    /// Zero-based column of the cursor; `0` exactly at the start of a line.
    fn column(&self) -> usize;

    /// Whether the cursor is at end of input.
    fn at_end(&self) -> bool {
        self.peek().is_none()
    }
}

/// A [`Lexer`] over an in-memory string with incremental-parser semantics.
///
/// The host drives it in three steps per token: [`begin`](Self::begin),
/// hand it to the scanner, then [`commit`](Self::commit) on success or
/// [`rewind`](Self::rewind) on no match.
#[derive(Debug, Clone)]
pub struct StrLexer<'src> {
    src: &'src str,
    pos: usize,
    column: usize,

    // Per-call bookkeeping
    call_start: (usize, usize),
    token_start: usize,
    started: bool,
    marked: Option<(usize, usize)>,
}

impl<'src> StrLexer<'src> {
    /// A cursor at the beginning of `src`.
    pub fn new(src: &'src str) -> Self {
        Self::at(src, 0)
    }

    /// A cursor at byte `offset` of `src`, clamped to the nearest preceding
    /// character boundary.
    pub fn at(src: &'src str, offset: usize) -> Self {
        let mut pos = offset.min(src.len());
        while !src.is_char_boundary(pos) {
            pos -= 1;
        }
        let line_start = src[..pos].rfind('\n').map_or(0, |i| i + 1);
        let column = src[line_start..pos].chars().count();
        Self {
            src,
            pos,
            column,
            call_start: (pos, column),
            token_start: pos,
            started: false,
            marked: None,
        }
    }

    /// The whole document.
    pub fn source(&self) -> &'src str {
        self.src
    }

    /// Byte offset of the cursor.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The unread remainder of the document.
    pub fn rest(&self) -> &'src str {
        &self.src[self.pos..]
    }

    /// Starts a new scan call at the current position.
    pub fn begin(&mut self) {
        self.call_start = (self.pos, self.column);
        self.token_start = self.pos;
        self.started = false;
        self.marked = None;
    }

    /// Accepts the token: moves the cursor to the marked end (or leaves it
    /// where the scan stopped) and returns the token's span.
    pub fn commit(&mut self) -> Span {
        if let Some((pos, column)) = self.marked.take() {
            self.pos = pos;
            self.column = column;
        }
        let span = Span::new(self.token_start, self.pos);
        self.begin();
        span
    }

    /// Discards everything advanced since [`begin`](Self::begin).
    pub fn rewind(&mut self) {
        (self.pos, self.column) = self.call_start;
        self.begin();
    }

    /// Consumes one character outside of any scanner call. Hosts use this for
    /// grammar-defined tokens such as `@`, `{` or `%`.
    pub fn advance_literal(&mut self) -> Option<char> {
        let (ch, len) = self.decode()?;
        self.bump(ch, len);
        self.begin();
        Some(ch)
    }

    fn decode(&self) -> Option<(char, usize)> {
        if self.pos >= self.src.len() {
            return None;
        }
        let (ch, len) = bstr::decode_utf8(&self.src.as_bytes()[self.pos..]);
        if len == 0 {
            return None;
        }
        Some((ch.unwrap_or('\u{FFFD}'), len))
    }

    #[inline]
    fn bump(&mut self, ch: char, len: usize) {
        self.pos += len;
        if ch == '\n' {
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl Lexer for StrLexer<'_> {
    fn peek(&self) -> Option<char> {
        self.decode().map(|(ch, _)| ch)
    }

    fn advance(&mut self, skip: bool) {
        let Some((ch, len)) = self.decode() else {
            return;
        };
        self.bump(ch, len);
        if !skip {
            self.started = true;
        } else if !self.started {
            self.token_start = self.pos;
        }
    }

    fn mark_end(&mut self) {
        self.marked = Some((self.pos, self.column));
    }

    fn column(&self) -> usize {
        self.column
    }
}
