//! A scanner bound to one in-memory document.
//!
//! [`Session`] plays the host's part of the contract for a plain `&str`: it
//! opens each call on the lexer, commits the token span on a match and
//! rewinds on no match or error. A grammar driving the session decides which
//! kinds are acceptable and consumes its own literal tokens through
//! [`Session::skip_literal`].
//!
//! Suspending yields a [`Checkpoint`] (byte offset plus serialized scanner
//! state); [`Session::resume`] continues from it with identical results.

use core::fmt;

use tracing::debug;

use crate::{
    error::ScanError,
    lexer::{Lexer, StrLexer},
    options::ScannerOptions,
    scanner::Scanner,
    state::{SERIALIZED_LEN, ScannerState},
    token::{KindSet, Span, Token},
};

/// A token together with where it sits in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lexeme {
    /// The scanned token.
    pub token: Token,
    /// Its byte range in the source.
    pub span: Span,
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.span, self.token.kind, self.token.text)
    }
}

/// Where a suspended session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Checkpoint {
    /// Byte offset of the cursor.
    pub offset: usize,
    /// The scanner state as written by [`Scanner::serialize`].
    pub state: [u8; SERIALIZED_LEN],
}

/// A scanner driving a [`StrLexer`] over one document.
///
/// # Examples
///
/// ```rust
/// use cooklang_scanner::{KindSet, ScannerOptions, Session, TokenKind};
///
/// let mut session = Session::new("Add @salt{}", ScannerOptions::default());
/// let text = session.next_token(KindSet::TEXT_CONTENT).unwrap().unwrap();
/// assert_eq!(text.token.text, "Add ");
/// assert_eq!(session.skip_literal(), Some('@'));
/// let name = session.next_token(KindSet::INGREDIENT_NAME).unwrap().unwrap();
/// assert_eq!(name.token.kind, TokenKind::IngredientName);
/// assert_eq!(&session.source()[name.span.start..name.span.end], "salt");
/// ```
#[derive(Debug, Clone)]
pub struct Session<'src> {
    lexer: StrLexer<'src>,
    scanner: Scanner,
}

impl<'src> Session<'src> {
    /// Starts scanning `src` from the beginning.
    #[must_use]
    pub fn new(src: &'src str, options: ScannerOptions) -> Self {
        Self {
            lexer: StrLexer::new(src),
            scanner: Scanner::with_options(options),
        }
    }

    /// Continues a suspended session over `src`.
    ///
    /// The document must be the one the checkpoint was taken from, or one
    /// whose edits all lie after `checkpoint.offset`.
    #[must_use]
    pub fn resume(src: &'src str, checkpoint: &Checkpoint, options: ScannerOptions) -> Self {
        let mut scanner = Scanner::with_options(options);
        scanner.deserialize(&checkpoint.state);
        debug!(
            offset = checkpoint.offset,
            state = ?scanner.state(),
            "resuming session"
        );
        Self {
            lexer: StrLexer::at(src, checkpoint.offset),
            scanner,
        }
    }

    /// Scans one token of an acceptable kind.
    ///
    /// On `Ok(None)` and on error the cursor is left where it was.
    pub fn next_token(&mut self, acceptable: KindSet) -> Result<Option<Lexeme>, ScanError> {
        self.lexer.begin();
        match self.scanner.scan(&mut self.lexer, acceptable) {
            Ok(Some(token)) => {
                let span = self.lexer.commit();
                debug_assert_eq!(span.len(), token.len, "span disagrees with token length");
                Ok(Some(Lexeme { token, span }))
            }
            Ok(None) => {
                self.lexer.rewind();
                Ok(None)
            }
            Err(err) => {
                self.lexer.rewind();
                Err(err)
            }
        }
    }

    /// Consumes one character the grammar matches itself (`@`, `{`, `%`, …).
    pub fn skip_literal(&mut self) -> Option<char> {
        self.lexer.advance_literal()
    }

    /// The current lookahead.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.lexer.peek()
    }

    /// Whether the whole document has been consumed.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.lexer.at_end()
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.lexer.offset()
    }

    /// The whole document.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.lexer.source()
    }

    /// The scanner's cross-call state.
    #[must_use]
    pub fn state(&self) -> ScannerState {
        self.scanner.state()
    }

    /// The underlying scanner.
    #[must_use]
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Snapshot from which [`resume`](Self::resume) continues.
    #[must_use]
    pub fn suspend(&self) -> Checkpoint {
        Checkpoint {
            offset: self.lexer.offset(),
            state: self.scanner.serialize(),
        }
    }
}
