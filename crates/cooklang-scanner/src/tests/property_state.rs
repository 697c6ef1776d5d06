use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::{arbitrary::RecipeText, step};
use crate::{KindSet, Scanner};

/// Property: replacing the scanner by one restored from its serialized state
/// before any call changes nothing about that call or the ones after it.
#[test]
fn serialized_state_resumes_identically_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: RecipeText, requests: Vec<KindSet>) -> bool {
        let mut scanner = Scanner::new();
        let mut lexer = crate::StrLexer::new(&text.0);

        for acceptable in requests {
            let mut restored = Scanner::new();
            restored.deserialize(&scanner.serialize());
            let mut shadow = lexer.clone();

            let expected = step(&mut scanner, &mut lexer, acceptable);
            let actual = step(&mut restored, &mut shadow, acceptable);
            if expected != actual
                || scanner.state() != restored.state()
                || lexer.offset() != shadow.offset()
            {
                return false;
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
