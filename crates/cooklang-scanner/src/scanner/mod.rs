//! Scan dispatcher: picks one strategy per call and applies its state change.
//!
//! Overview
//! - The host asks for one token at a time and says which kinds its grammar
//!   would accept right now. The dispatcher walks [`Strategy::ORDER`] and runs
//!   every strategy whose kind is acceptable and whose precondition holds,
//!   until one matches.
//! - Strategies read through a replay [`Probe`], so a strategy that consumed a
//!   shared prefix (`[`, `>`, `-`, `.`) and then declined leaves the input
//!   intact for the next one.
//! - State (`at_line_start`, `in_metadata`, `paren_depth`) is only written
//!   after a strategy matched and its end was settled.
//!
//! Priority
//! - Block comments come first: `[-` pre-empts every other reading of `[`.
//! - Whitespace is a token only when asked for; otherwise it is skipped as
//!   insignificant before the remaining strategies run.
//! - Line-start constructs (`>`, `>>`, `=`) are tried before inline ones, and
//!   plain text is the last resort.

mod delimited;
mod names;
mod probe;

use alloc::string::String;

use probe::Probe;
use tracing::{error, trace};

use crate::{
    buffer::AccumulationBuffer,
    classify::is_whitespace,
    error::ScanError,
    lexer::Lexer,
    options::ScannerOptions,
    state::{SERIALIZED_LEN, ScannerState},
    token::{KindSet, Token, TokenKind},
};

/// One entry of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strategy {
    BlockComment,
    Whitespace,
    /// Drops leading blanks; never produces a token.
    SkipWhitespace,
    EndOfInput,
    Newline,
    RecipeNote,
    MetadataKey,
    MetadataValue,
    SectionHeader,
    LineComment,
    IngredientName,
    CookwareName,
    TimerName,
    NoteContent,
    TextContent,
}

impl Strategy {
    /// Dispatch priority, highest first.
    pub(crate) const ORDER: [Strategy; 15] = [
        Strategy::BlockComment,
        Strategy::Whitespace,
        Strategy::SkipWhitespace,
        Strategy::EndOfInput,
        Strategy::Newline,
        Strategy::RecipeNote,
        Strategy::MetadataKey,
        Strategy::MetadataValue,
        Strategy::SectionHeader,
        Strategy::LineComment,
        Strategy::IngredientName,
        Strategy::CookwareName,
        Strategy::TimerName,
        Strategy::NoteContent,
        Strategy::TextContent,
    ];

    /// The kind this strategy produces.
    pub(crate) const fn kind(self) -> Option<TokenKind> {
        Some(match self {
            Strategy::BlockComment => TokenKind::BlockComment,
            Strategy::Whitespace => TokenKind::Whitespace,
            Strategy::SkipWhitespace => return None,
            Strategy::EndOfInput => TokenKind::EndOfInput,
            Strategy::Newline => TokenKind::Newline,
            Strategy::RecipeNote => TokenKind::RecipeNoteText,
            Strategy::MetadataKey => TokenKind::MetadataKey,
            Strategy::MetadataValue => TokenKind::MetadataValue,
            Strategy::SectionHeader => TokenKind::SectionName,
            Strategy::LineComment => TokenKind::LineComment,
            Strategy::IngredientName => TokenKind::IngredientName,
            Strategy::CookwareName => TokenKind::CookwareName,
            Strategy::TimerName => TokenKind::TimerName,
            Strategy::NoteContent => TokenKind::NoteContent,
            Strategy::TextContent => TokenKind::TextContent,
        })
    }

    /// Structural precondition, checked against the call's first character.
    pub(crate) fn applies(self, lookahead: Option<char>, state: &ScannerState) -> bool {
        match self {
            Strategy::BlockComment => lookahead == Some('['),
            Strategy::Whitespace | Strategy::SkipWhitespace => {
                lookahead.is_some_and(is_whitespace)
            }
            Strategy::EndOfInput => lookahead.is_none(),
            Strategy::Newline => lookahead == Some('\n'),
            Strategy::RecipeNote | Strategy::MetadataKey => {
                state.at_line_start && lookahead == Some('>')
            }
            Strategy::MetadataValue => state.in_metadata,
            Strategy::SectionHeader => state.at_line_start && lookahead == Some('='),
            Strategy::LineComment => lookahead == Some('-'),
            Strategy::IngredientName
            | Strategy::CookwareName
            | Strategy::TimerName
            | Strategy::NoteContent
            | Strategy::TextContent => lookahead.is_some(),
        }
    }

    /// Whether a match leaves `at_line_start` untouched.
    const fn keeps_line_start(self) -> bool {
        matches!(
            self,
            Strategy::BlockComment | Strategy::Whitespace | Strategy::EndOfInput
        )
    }
}

/// The context-sensitive scanner. One instance per parse session.
///
/// # Examples
///
/// ```rust
/// use cooklang_scanner::{KindSet, Scanner, StrLexer, TokenKind};
///
/// let mut scanner = Scanner::new();
/// let mut lexer = StrLexer::new("flour and sugar{200%g}");
/// lexer.begin();
/// let token = scanner
///     .scan(&mut lexer, KindSet::INGREDIENT_NAME)
///     .unwrap()
///     .unwrap();
/// assert_eq!(token.kind, TokenKind::IngredientName);
/// assert_eq!(token.text, "flour and sugar");
/// assert_eq!(lexer.commit().len(), token.len);
/// ```
#[derive(Debug, Clone)]
pub struct Scanner {
    state: ScannerState,
    options: ScannerOptions,
    buffer: AccumulationBuffer,
    replay: String,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// A scanner in the session-start state with default options.
    pub fn new() -> Self {
        Self::with_options(ScannerOptions::default())
    }

    /// A scanner in the session-start state.
    pub fn with_options(options: ScannerOptions) -> Self {
        Self {
            state: ScannerState::default(),
            options,
            buffer: AccumulationBuffer::new(options.max_token_bytes),
            replay: String::new(),
        }
    }

    /// A scanner resuming from `state`.
    pub fn from_state(state: ScannerState, options: ScannerOptions) -> Self {
        Self {
            state,
            ..Self::with_options(options)
        }
    }

    /// The cross-call state.
    pub fn state(&self) -> ScannerState {
        self.state
    }

    /// The options this scanner was built with.
    pub fn options(&self) -> &ScannerOptions {
        &self.options
    }

    /// Persists the cross-call state. See [`ScannerState::serialize`].
    pub fn serialize(&self) -> [u8; SERIALIZED_LEN] {
        self.state.serialize()
    }

    /// Restores state written by [`serialize`](Self::serialize). A short
    /// buffer resets to the session-start state.
    pub fn deserialize(&mut self, bytes: &[u8]) {
        self.state = ScannerState::restore(bytes);
    }

    /// Scans at most one token.
    ///
    /// Returns `Ok(None)` when no acceptable kind matches; the host must then
    /// discard whatever was advanced during the call. Errors are fatal: the
    /// token buffer could not hold the token.
    #[tracing::instrument(level = "trace", skip(self, lexer))]
    pub fn scan<L: Lexer + ?Sized>(
        &mut self,
        lexer: &mut L,
        acceptable: KindSet,
    ) -> Result<Option<Token>, ScanError> {
        if lexer.column() == 0 {
            self.state.at_line_start = true;
        }
        let replay = core::mem::take(&mut self.replay);
        let mut probe = Probe::new(lexer, replay);
        let result = self.dispatch(&mut probe, acceptable);
        self.replay = probe.into_replay();
        if let Err(err) = &result {
            error!(%err, "scan aborted");
        }
        result
    }

    fn dispatch<L: Lexer + ?Sized>(
        &mut self,
        probe: &mut Probe<'_, L>,
        acceptable: KindSet,
    ) -> Result<Option<Token>, ScanError> {
        for strategy in Strategy::ORDER {
            if strategy
                .kind()
                .is_some_and(|kind| !acceptable.accepts(kind))
            {
                continue;
            }
            probe.rewind();
            if !strategy.applies(probe.peek(), &self.state) {
                continue;
            }
            self.buffer.clear();

            let Some(next) = self.run(strategy, probe)? else {
                trace!(?strategy, "declined");
                continue;
            };
            let Some(kind) = strategy.kind() else {
                continue;
            };
            let Some(len) = probe.settle() else {
                trace!(?strategy, "match ends inside replayed input");
                continue;
            };

            self.state = next;
            if !strategy.keeps_line_start() {
                self.state.at_line_start = false;
            }
            if kind == TokenKind::Newline {
                self.state.at_line_start = true;
            }
            let token = Token {
                kind,
                text: self.buffer.to_text(),
                len,
            };
            trace!(kind = %token.kind, len, text = ?token.text, "token");
            return Ok(Some(token));
        }
        Ok(None)
    }

    /// Runs one strategy. On a match returns the state to commit.
    fn run<L: Lexer + ?Sized>(
        &mut self,
        strategy: Strategy,
        probe: &mut Probe<'_, L>,
    ) -> Result<Option<ScannerState>, ScanError> {
        let buf = &mut self.buffer;
        let mut next = self.state;
        let matched = match strategy {
            Strategy::BlockComment => delimited::scan_block_comment(probe, buf)?,
            Strategy::Whitespace => delimited::scan_whitespace(probe, buf)?,
            Strategy::SkipWhitespace => {
                while probe.peek_is(is_whitespace) {
                    probe.skip();
                }
                false
            }
            Strategy::EndOfInput => probe.peek().is_none(),
            Strategy::Newline => {
                // A metadata value never continues onto the next line.
                next.in_metadata = false;
                next.paren_depth = 0;
                delimited::scan_newline(probe, buf)?
            }
            Strategy::RecipeNote => delimited::scan_recipe_note(probe, buf)?,
            Strategy::MetadataKey => {
                next.in_metadata = true;
                delimited::scan_metadata_key(probe, buf)?
            }
            Strategy::MetadataValue => {
                next.in_metadata = false;
                delimited::scan_metadata_value(probe, buf)?
            }
            Strategy::SectionHeader => delimited::scan_section_header(probe, buf)?,
            Strategy::LineComment => delimited::scan_line_comment(probe, buf)?,
            Strategy::IngredientName => {
                let reference = self.options.recipe_references
                    && names::scan_recipe_reference(probe, buf)?;
                if reference {
                    true
                } else {
                    probe.rewind();
                    buf.clear();
                    names::scan_name(probe, buf)?
                }
            }
            Strategy::CookwareName | Strategy::TimerName => names::scan_name(probe, buf)?,
            Strategy::NoteContent => {
                match delimited::scan_note_content(probe, buf, self.state.paren_depth)? {
                    Some(open) => {
                        // Only a note cut off by end of input can resume.
                        next.paren_depth = if probe.peek().is_none() { open } else { 0 };
                        true
                    }
                    None => false,
                }
            }
            Strategy::TextContent => {
                delimited::scan_text(probe, buf, self.state.at_line_start)?
            }
        };
        Ok(matched.then_some(next))
    }
}
