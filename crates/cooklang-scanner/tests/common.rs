#![allow(missing_docs, dead_code)]

//! A toy grammar driving a [`Session`] the way a generated parser would.
//!
//! The markers `@`, `#`, `~`, `(`, `)`, `{` and `}` are grammar literals.
//! After a marker only the matching name or note kind is acceptable; inside
//! braces the amount is consumed literally. Everywhere else the grammar
//! accepts every line-level and text kind.

use core::fmt::Write;

use cooklang_scanner::{Checkpoint, KindSet, Lexeme, ScanError, ScannerOptions, Session, Span};

pub const LINE_KINDS: KindSet = KindSet::all()
    .difference(KindSet::INGREDIENT_NAME)
    .difference(KindSet::COOKWARE_NAME)
    .difference(KindSet::TIMER_NAME)
    .difference(KindSet::NOTE_CONTENT)
    .difference(KindSet::WHITESPACE)
    .difference(KindSet::END_OF_INPUT);

pub fn acceptable_after(prev: Option<char>) -> KindSet {
    match prev {
        Some('@') => KindSet::INGREDIENT_NAME,
        Some('#') => KindSet::COOKWARE_NAME,
        Some('~') => KindSet::TIMER_NAME,
        Some('(') => KindSet::NOTE_CONTENT,
        _ => LINE_KINDS,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Token(Lexeme),
    /// A run of characters the grammar matched itself.
    Literal { span: Span, text: String },
}

pub struct Host<'src> {
    pub session: Session<'src>,
    pub prev: Option<char>,
    pub pieces: Vec<Piece>,
}

impl<'src> Host<'src> {
    pub fn new(src: &'src str, options: ScannerOptions) -> Self {
        Self {
            session: Session::new(src, options),
            prev: None,
            pieces: Vec::new(),
        }
    }

    pub fn resume(
        src: &'src str,
        checkpoint: &Checkpoint,
        prev: Option<char>,
        options: ScannerOptions,
    ) -> Self {
        Self {
            session: Session::resume(src, checkpoint, options),
            prev,
            pieces: Vec::new(),
        }
    }

    /// Advances by one token or one literal run. Returns `false` at the end.
    pub fn step(&mut self) -> Result<bool, ScanError> {
        if self.session.at_end() {
            return Ok(false);
        }
        if let Some(lexeme) = self.session.next_token(acceptable_after(self.prev))? {
            self.prev = None;
            self.pieces.push(Piece::Token(lexeme));
            return Ok(true);
        }
        let Some(ch) = self.literal() else {
            return Ok(false);
        };
        self.prev = Some(ch);
        if ch == '{' {
            while self.session.peek().is_some_and(|c| c != '}' && c != '\n') {
                self.literal();
            }
        }
        Ok(true)
    }

    pub fn run(&mut self) -> Result<(), ScanError> {
        while self.step()? {}
        Ok(())
    }

    fn literal(&mut self) -> Option<char> {
        let start = self.session.offset();
        let ch = self.session.skip_literal()?;
        let end = self.session.offset();
        match self.pieces.last_mut() {
            Some(Piece::Literal { span, text }) if span.end == start => {
                span.end = end;
                text.push(ch);
            }
            _ => self.pieces.push(Piece::Literal {
                span: Span::new(start, end),
                text: ch.to_string(),
            }),
        }
        Some(ch)
    }
}

pub fn tokenize(src: &str, options: ScannerOptions) -> Vec<Piece> {
    let mut host = Host::new(src, options);
    host.run().expect("scan error");
    host.pieces
}

pub fn render(pieces: &[Piece]) -> String {
    let mut out = String::new();
    for piece in pieces {
        match piece {
            Piece::Token(lexeme) => writeln!(out, "{lexeme}").unwrap(),
            Piece::Literal { span, text } => writeln!(out, "{span} lit {text:?}").unwrap(),
        }
    }
    out
}
