//! Replay probe: lets every strategy in one call read from the same start.
//!
//! The host cursor only moves forward. Several constructs share a prefix
//! (`[` vs `[-`, `>` vs `>>`, `-` vs `--`, `.` vs `./`), so a strategy often
//! has to consume a character before it knows it does not apply. The probe
//! records everything pulled from the host during the call and replays it to
//! the next strategy before reading live input again.
//!
//! Positions are byte offsets from the first recorded character.
//!
//! Invariants
//! - `pos <= replay.len()`; reading past the replay pulls from the host.
//! - A mark at `pos == replay.len()` is forwarded to the host; a mark inside
//!   the replay is remembered only, and a token ending there cannot be
//!   reported (the host cursor is already past it). A forwarded mark stays
//!   valid however far the strategy reads afterwards.

use alloc::string::String;

use crate::lexer::Lexer;

pub(crate) struct Probe<'l, L: Lexer + ?Sized> {
    lexer: &'l mut L,
    replay: String,
    pos: usize,
    /// Token end and whether the host holds the same mark.
    end: Option<(usize, bool)>,
}

impl<'l, L: Lexer + ?Sized> Probe<'l, L> {
    pub(crate) fn new(lexer: &'l mut L, mut replay: String) -> Self {
        replay.clear();
        Self {
            lexer,
            replay,
            pos: 0,
            end: None,
        }
    }

    /// Hands the replay storage back for reuse by the next call.
    pub(crate) fn into_replay(self) -> String {
        self.replay
    }

    #[inline]
    fn live(&self) -> bool {
        self.pos == self.replay.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        if self.live() {
            self.lexer.peek()
        } else {
            self.replay[self.pos..].chars().next()
        }
    }

    #[inline]
    pub(crate) fn peek_is(&self, pred: impl FnOnce(char) -> bool) -> bool {
        self.peek().is_some_and(pred)
    }

    /// Moves past the lookahead as part of the token.
    pub(crate) fn advance(&mut self) {
        if self.live() {
            let Some(ch) = self.lexer.peek() else {
                return;
            };
            self.lexer.advance(false);
            self.replay.push(ch);
            self.pos += ch.len_utf8();
        } else if let Some(ch) = self.replay[self.pos..].chars().next() {
            self.pos += ch.len_utf8();
        }
    }

    /// Moves past insignificant leading whitespace. Only valid before any
    /// character has been recorded in this call.
    pub(crate) fn skip(&mut self) {
        debug_assert!(self.replay.is_empty(), "skip after recorded input");
        if self.replay.is_empty() {
            self.lexer.advance(true);
        } else {
            self.advance();
        }
    }

    /// Commits the current position as the token end.
    pub(crate) fn mark_end(&mut self) {
        let live = self.live();
        if live {
            self.lexer.mark_end();
        }
        self.end = Some((self.pos, live));
    }

    /// Starts the next strategy from the beginning of the recorded input.
    pub(crate) fn rewind(&mut self) {
        self.pos = 0;
        self.end = None;
    }

    /// Fixes the token end and returns its length, or `None` when the end
    /// falls inside input that was already handed past the host cursor.
    pub(crate) fn settle(&mut self) -> Option<usize> {
        match self.end {
            Some((end, true)) => Some(end),
            Some((_, false)) => None,
            None if self.live() => {
                self.lexer.mark_end();
                Some(self.pos)
            }
            None => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn recorded(&self) -> &str {
        &self.replay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::StrLexer, token::Span};

    #[test]
    fn replays_consumed_prefix() {
        let mut lx = StrLexer::new("[x");
        lx.begin();
        let mut p = Probe::new(&mut lx, String::new());
        p.advance();
        assert_eq!(p.peek(), Some('x'));
        p.rewind();
        assert_eq!(p.peek(), Some('['));
        p.advance();
        assert_eq!(p.peek(), Some('x'));
        p.advance();
        assert_eq!(p.recorded(), "[x");
        assert_eq!(p.settle(), Some(2));
        assert_eq!(lx.commit(), Span::new(0, 2));
    }

    #[test]
    fn mark_inside_replay_cannot_settle() {
        let mut lx = StrLexer::new("ab");
        lx.begin();
        let mut p = Probe::new(&mut lx, String::new());
        p.advance();
        p.advance();
        p.rewind();
        p.advance();
        p.mark_end();
        assert_eq!(p.settle(), None);
    }

    #[test]
    fn live_mark_forwards_to_host() {
        let mut lx = StrLexer::new("salt and");
        lx.begin();
        let mut p = Probe::new(&mut lx, String::new());
        for _ in 0..4 {
            p.advance();
        }
        p.mark_end();
        for _ in 0..4 {
            p.advance();
        }
        assert_eq!(p.settle(), Some(4));
        assert_eq!(lx.commit(), Span::new(0, 4));
    }

    #[test]
    fn multibyte_positions_are_bytes() {
        let mut lx = StrLexer::new("é-");
        lx.begin();
        let mut p = Probe::new(&mut lx, String::new());
        p.advance();
        p.advance();
        p.rewind();
        p.advance();
        assert_eq!(p.peek(), Some('-'));
        p.advance();
        assert_eq!(p.settle(), Some(3));
    }
}
