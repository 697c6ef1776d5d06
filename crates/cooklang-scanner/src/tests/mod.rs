mod property_progress;
mod property_state;

use crate::{KindSet, Scanner, Span, StrLexer, Token};

/// One host step: scan, then commit the token or, on no match, consume one
/// literal character the way a grammar rule would.
pub(crate) fn step(
    scanner: &mut Scanner,
    lexer: &mut StrLexer<'_>,
    acceptable: KindSet,
) -> Option<(Token, Span)> {
    lexer.begin();
    if let Some(token) = scanner.scan(lexer, acceptable).unwrap() {
        Some((token, lexer.commit()))
    } else {
        lexer.rewind();
        lexer.advance_literal();
        None
    }
}
