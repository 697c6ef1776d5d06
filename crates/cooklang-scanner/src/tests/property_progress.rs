use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::arbitrary::RecipeText;
use crate::{KindSet, Lexer, Scanner, StrLexer, TokenKind};

/// Property: every call either produces an acceptable token that consumed at
/// least one character (end of input aside), or leaves the cursor and the
/// persistent state exactly where they were.
#[test]
fn scan_progress_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: RecipeText, requests: Vec<KindSet>) -> bool {
        let src = text.0.as_str();
        let mut scanner = Scanner::new();
        let mut lexer = StrLexer::new(src);

        for acceptable in requests.iter().copied().cycle().take(2 * src.len() + 1) {
            let offset = lexer.offset();
            let mut before = scanner.state();
            if lexer.column() == 0 {
                before.at_line_start = true;
            }

            lexer.begin();
            match scanner.scan(&mut lexer, acceptable) {
                Ok(Some(token)) => {
                    let span = lexer.commit();
                    let empty_ok = token.kind == TokenKind::EndOfInput;
                    if !acceptable.accepts(token.kind)
                        || span.len() != token.len
                        || span.start < offset
                        || span.end > src.len()
                        || (token.len == 0 && !empty_ok)
                    {
                        return false;
                    }
                }
                Ok(None) => {
                    lexer.rewind();
                    if lexer.offset() != offset || scanner.state() != before {
                        return false;
                    }
                    lexer.advance_literal();
                }
                Err(_) => return false,
            }
        }
        true
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(RecipeText, Vec<KindSet>) -> bool);
}

/// Property: a host that asks for every kind except end of input always
/// reaches the end of the document, with spans in document order.
#[test]
fn tokenizing_terminates_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: RecipeText) -> bool {
        let src = text.0.as_str();
        let mut scanner = Scanner::new();
        let mut lexer = StrLexer::new(src);
        let acceptable = KindSet::all() - KindSet::END_OF_INPUT;

        let mut last_end = 0;
        for _ in 0..=src.len() {
            if lexer.at_end() {
                return true;
            }
            if let Some((_, span)) = super::step(&mut scanner, &mut lexer, acceptable) {
                if span.start < last_end || span.is_empty() {
                    return false;
                }
                last_end = span.end;
            }
        }
        lexer.at_end()
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(RecipeText) -> bool);
}
