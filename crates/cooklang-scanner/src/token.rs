use alloc::string::String;
use core::fmt;

use bitflags::bitflags;

/// The token kinds this scanner can produce.
///
/// The discriminants double as bit positions in [`KindSet`] and match the
/// order of the grammar's external token list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TokenKind {
    /// A single `\n`.
    Newline = 0,
    /// The name after `@`, possibly multiword or a recipe reference.
    IngredientName,
    /// The name after `#`.
    CookwareName,
    /// The name after `~`.
    TimerName,
    /// Plain step text.
    TextContent,
    /// The inside of a `( … )` note attached to an ingredient, cookware or
    /// timer.
    NoteContent,
    /// The key of a `>> key: value` line.
    MetadataKey,
    /// The value of a `>> key: value` line.
    MetadataValue,
    /// The name inside `== Section ==`.
    SectionName,
    /// The text after `--`.
    LineComment,
    /// The text between `[-` and `-]`.
    BlockComment,
    /// The text after a single `>` at the start of a line.
    RecipeNoteText,
    /// A run of spaces and tabs, when the grammar asks for it.
    Whitespace,
    /// End of input (zero width).
    EndOfInput,
}

impl TokenKind {
    /// Every kind, in discriminant order.
    pub const ALL: [TokenKind; 14] = [
        TokenKind::Newline,
        TokenKind::IngredientName,
        TokenKind::CookwareName,
        TokenKind::TimerName,
        TokenKind::TextContent,
        TokenKind::NoteContent,
        TokenKind::MetadataKey,
        TokenKind::MetadataValue,
        TokenKind::SectionName,
        TokenKind::LineComment,
        TokenKind::BlockComment,
        TokenKind::RecipeNoteText,
        TokenKind::Whitespace,
        TokenKind::EndOfInput,
    ];

    /// The singleton set containing this kind.
    #[inline]
    pub const fn as_set(self) -> KindSet {
        KindSet::from_bits_retain(1 << (self as u16))
    }

    /// Short, stable name used when rendering token streams.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Newline => "newline",
            TokenKind::IngredientName => "ingredient",
            TokenKind::CookwareName => "cookware",
            TokenKind::TimerName => "timer",
            TokenKind::TextContent => "text",
            TokenKind::NoteContent => "note",
            TokenKind::MetadataKey => "meta-key",
            TokenKind::MetadataValue => "meta-value",
            TokenKind::SectionName => "section",
            TokenKind::LineComment => "comment",
            TokenKind::BlockComment => "block-comment",
            TokenKind::RecipeNoteText => "recipe-note",
            TokenKind::Whitespace => "whitespace",
            TokenKind::EndOfInput => "eof",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// The token kinds the host grammar would accept at the current position.
    ///
    /// The scanner never produces a kind outside this set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KindSet: u16 {
        /// [`TokenKind::Newline`]
        const NEWLINE = 1 << 0;
        /// [`TokenKind::IngredientName`]
        const INGREDIENT_NAME = 1 << 1;
        /// [`TokenKind::CookwareName`]
        const COOKWARE_NAME = 1 << 2;
        /// [`TokenKind::TimerName`]
        const TIMER_NAME = 1 << 3;
        /// [`TokenKind::TextContent`]
        const TEXT_CONTENT = 1 << 4;
        /// [`TokenKind::NoteContent`]
        const NOTE_CONTENT = 1 << 5;
        /// [`TokenKind::MetadataKey`]
        const METADATA_KEY = 1 << 6;
        /// [`TokenKind::MetadataValue`]
        const METADATA_VALUE = 1 << 7;
        /// [`TokenKind::SectionName`]
        const SECTION_NAME = 1 << 8;
        /// [`TokenKind::LineComment`]
        const LINE_COMMENT = 1 << 9;
        /// [`TokenKind::BlockComment`]
        const BLOCK_COMMENT = 1 << 10;
        /// [`TokenKind::RecipeNoteText`]
        const RECIPE_NOTE_TEXT = 1 << 11;
        /// [`TokenKind::Whitespace`]
        const WHITESPACE = 1 << 12;
        /// [`TokenKind::EndOfInput`]
        const END_OF_INPUT = 1 << 13;
    }
}

impl KindSet {
    /// Whether `kind` is acceptable.
    #[inline]
    pub fn accepts(self, kind: TokenKind) -> bool {
        self.contains(kind.as_set())
    }

    /// The acceptable kinds, in discriminant order.
    pub fn kinds(self) -> impl Iterator<Item = TokenKind> {
        TokenKind::ALL.into_iter().filter(move |k| self.accepts(*k))
    }
}

impl From<TokenKind> for KindSet {
    fn from(kind: TokenKind) -> Self {
        kind.as_set()
    }
}

impl FromIterator<TokenKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(KindSet::empty(), |set, kind| set | kind.as_set())
    }
}

/// A token produced by one successful scan.
///
/// `text` is the payload without structural markers (`--`, `[-`/`-]`, `>>`,
/// `=`), trimmed where the construct calls for it. `len` is the number of
/// bytes the token spans from its start, after any insignificant whitespace
/// skipped in front of it. Because of backtracking, `len` can be shorter than
/// what the scanner inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// What was recognized.
    pub kind: TokenKind,
    /// The payload.
    pub text: String,
    /// Bytes consumed by the token.
    pub len: usize,
}

/// A half-open byte range into the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// First byte of the token.
    pub start: usize,
    /// One past the last byte of the token.
    pub end: usize,
}

impl Span {
    /// Creates a span covering `start..end`.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers nothing.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
