#![expect(missing_docs)]

mod common;

use common::{Host, Piece, tokenize};
use cooklang_scanner::{KindSet, ScannerOptions, ScannerState, Session, TokenKind};
use rstest::rstest;

const RECIPES: &[&str] = &[
    ">> servings: 4\n>> source: grandma\nMix @flour and sugar{200%g} with #large bowl{}.\n",
    "== Dough ==\n-- rest overnight\nKnead [- gently\nand slowly -] for ~{10%minutes}.\n",
    "> Best served warm.\n[inline] tip\n#pan on medium\n@egg (beaten (lightly)) and @./sauces/pesto{}",
    ">>  : nothing\n>> key:\n= Filling\ntext -- with comment\n(stray) note",
];

/// Suspends after `k` steps, resumes on a fresh session and finishes.
fn tokenize_with_break(src: &str, k: usize) -> Vec<Piece> {
    let mut host = Host::new(src, ScannerOptions::default());
    for _ in 0..k {
        if !host.step().unwrap() {
            break;
        }
    }
    let checkpoint = host.session.suspend();
    let mut resumed = Host::resume(src, &checkpoint, host.prev, ScannerOptions::default());
    resumed.run().unwrap();

    let mut pieces = host.pieces;
    // A literal run split by the break is rejoined so streams compare equal.
    let mut rest = resumed.pieces.into_iter();
    if let (Some(Piece::Literal { span, text }), Some(Piece::Literal { span: next, text: more })) =
        (pieces.last_mut(), rest.as_slice().first())
    {
        if span.end == next.start {
            span.end = next.end;
            text.push_str(more);
            rest.next();
        }
    }
    pieces.extend(rest);
    pieces
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
fn resuming_at_every_step_matches_one_pass(#[case] index: usize) {
    let src = RECIPES[index];
    let expected = tokenize(src, ScannerOptions::default());
    for k in 0..=expected.len() + 1 {
        assert_eq!(tokenize_with_break(src, k), expected, "break after {k} steps");
    }
}

#[test]
fn open_note_continues_after_appended_text() {
    let before = "@egg (beaten (lightly";
    let after = "@egg (beaten (lightly) first) then";

    let mut session = Session::new(before, ScannerOptions::default());
    assert_eq!(session.skip_literal(), Some('@'));
    session.next_token(KindSet::INGREDIENT_NAME).unwrap().unwrap();
    session.skip_literal();
    session.skip_literal();
    let note = session.next_token(KindSet::NOTE_CONTENT).unwrap().unwrap();
    assert_eq!(note.token.text, "beaten (lightly");
    assert_eq!(session.state().paren_depth, 1);

    let checkpoint = session.suspend();
    let mut resumed = Session::resume(after, &checkpoint, ScannerOptions::default());
    let rest = resumed.next_token(KindSet::NOTE_CONTENT).unwrap().unwrap();
    assert_eq!(rest.token.kind, TokenKind::NoteContent);
    assert_eq!(rest.token.text, ") first");
    assert_eq!(resumed.peek(), Some(')'));
    assert_eq!(resumed.state().paren_depth, 0);
}

#[test]
fn pending_metadata_value_survives_suspension() {
    let src = ">> prep time: 10 minutes\n";
    let mut session = Session::new(src, ScannerOptions::default());
    let key = session.next_token(KindSet::METADATA_KEY).unwrap().unwrap();
    assert_eq!(key.token.text, "prep time");

    let checkpoint = session.suspend();
    assert_eq!(
        ScannerState::restore(&checkpoint.state),
        ScannerState {
            at_line_start: false,
            in_metadata: true,
            paren_depth: 0,
        }
    );
    let mut resumed = Session::resume(src, &checkpoint, ScannerOptions::default());
    let value = resumed
        .next_token(KindSet::METADATA_VALUE)
        .unwrap()
        .unwrap();
    assert_eq!(value.token.text, "10 minutes");
    assert_eq!(value.span.end, src.len() - 1);
}

#[test]
fn short_state_resumes_from_session_start() {
    let mut session = Session::new("x\n== Section", ScannerOptions::default());
    session.skip_literal();
    session.skip_literal();
    let mut checkpoint = session.suspend();
    checkpoint.state = [0; 3];
    let mut resumed = Session::resume("x\n== Section", &checkpoint, ScannerOptions::default());
    // Column zero restores the line-start flag even from a blank state.
    let section = resumed.next_token(KindSet::SECTION_NAME).unwrap().unwrap();
    assert_eq!(section.token.text, "Section");

    let mut scanner = cooklang_scanner::Scanner::new();
    scanner.deserialize(&[1]);
    assert_eq!(scanner.state(), ScannerState::default());
}
