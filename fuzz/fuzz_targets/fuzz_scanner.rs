#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use cooklang_scanner::{KindSet, ScannerOptions, Session, TokenKind};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Recipe-shaped pieces the mutator splices in, so the fuzzer spends its time
/// on near misses between constructs rather than on random bytes.
#[derive(Debug, Arbitrary)]
enum Fragment {
    Marker(Marker),
    Name(Vec<Word>),
    Amount(u8, Word),
    Note(u8),
    Metadata(Word, Option<Word>),
    RecipeNote(Word),
    Section(u8, Word),
    LineComment(Word),
    BlockComment(Word, bool),
    Reference(bool, Vec<Word>),
    Text(String),
    Blanks(u8),
    Newline,
}

#[derive(Debug, Arbitrary)]
enum Marker {
    Ingredient,
    Cookware,
    Timer,
}

#[derive(Debug, Arbitrary)]
enum Word {
    Flour,
    Olive,
    Oil,
    Dash,
    Unicode,
    Free(String),
}

impl Word {
    fn push(&self, out: &mut String) {
        match self {
            Word::Flour => out.push_str("flour"),
            Word::Olive => out.push_str("olive"),
            Word::Oil => out.push_str("oil"),
            Word::Dash => out.push('-'),
            Word::Unicode => out.push_str("crème fraîche"),
            Word::Free(s) => out.push_str(s),
        }
    }
}

impl Fragment {
    fn push(&self, out: &mut String) {
        match self {
            Fragment::Marker(Marker::Ingredient) => out.push('@'),
            Fragment::Marker(Marker::Cookware) => out.push('#'),
            Fragment::Marker(Marker::Timer) => out.push('~'),
            Fragment::Name(words) => {
                for (i, word) in words.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    word.push(out);
                }
            }
            Fragment::Amount(n, unit) => {
                out.push('{');
                out.push_str(&n.to_string());
                out.push('%');
                unit.push(out);
                out.push('}');
            }
            Fragment::Note(depth) => {
                for _ in 0..depth % 4 {
                    out.push('(');
                }
                out.push_str("note");
                out.push(')');
            }
            Fragment::Metadata(key, value) => {
                out.push_str(">> ");
                key.push(out);
                out.push(':');
                if let Some(value) = value {
                    out.push(' ');
                    value.push(out);
                }
            }
            Fragment::RecipeNote(word) => {
                out.push_str("> ");
                word.push(out);
            }
            Fragment::Section(n, word) => {
                let bar = "=".repeat(usize::from(n % 4) + 1);
                out.push_str(&bar);
                out.push(' ');
                word.push(out);
                out.push(' ');
                out.push_str(&bar);
            }
            Fragment::LineComment(word) => {
                out.push_str("-- ");
                word.push(out);
            }
            Fragment::BlockComment(word, closed) => {
                out.push_str("[- ");
                word.push(out);
                if *closed {
                    out.push_str(" -]");
                }
            }
            Fragment::Reference(backslash, parts) => {
                let sep = if *backslash { '\\' } else { '/' };
                out.push('.');
                for part in parts {
                    out.push(sep);
                    part.push(out);
                }
            }
            Fragment::Text(s) => out.push_str(s),
            Fragment::Blanks(n) => {
                for i in 0..n % 4 {
                    out.push(if i % 2 == 0 { ' ' } else { '\t' });
                }
            }
            Fragment::Newline => out.push('\n'),
        }
    }
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        if max_size < HEADER {
            return fuzzer_mutate(data, size, max_size);
        }
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x03);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut recipe = String::new();
        let target = with_rng(|rng| rng.random_range(1..=16));
        for _ in 0..target {
            let bytes: Vec<u8> = with_rng(|rng| (0..64).map(|_| rng.random::<u8>()).collect());
            if let Ok(fragment) = Fragment::arbitrary(&mut Unstructured::new(&bytes)) {
                fragment.push(&mut recipe);
            }
        }

        let len = recipe.len().min(max_size - HEADER);
        data[HEADER..HEADER + len].copy_from_slice(&recipe.as_bytes()[..len]);
        HEADER + len
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

const LINE_KINDS: KindSet = KindSet::all()
    .difference(KindSet::INGREDIENT_NAME)
    .difference(KindSet::COOKWARE_NAME)
    .difference(KindSet::TIMER_NAME)
    .difference(KindSet::NOTE_CONTENT);

/// The acceptable set a grammar would offer after `prev`, perturbed by the
/// seeded RNG so unusual combinations are exercised too.
fn acceptable(prev: Option<char>, rng: &mut SmallRng) -> KindSet {
    let base = match prev {
        Some('@') => KindSet::INGREDIENT_NAME,
        Some('#') => KindSet::COOKWARE_NAME,
        Some('~') => KindSet::TIMER_NAME,
        Some('(') => KindSet::NOTE_CONTENT,
        _ => LINE_KINDS,
    };
    if rng.random_ratio(1, 8) {
        KindSet::from_bits_truncate(rng.random::<u16>())
    } else {
        base
    }
}

/// One run over `src`. Returns the pieces produced, or `None` on a scan
/// error (only possible with a token limit).
fn drive(
    src: &str,
    options: ScannerOptions,
    seed: u64,
    suspend_every: Option<usize>,
) -> Option<Vec<(usize, usize, TokenKind, String)>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut session = Session::new(src, options);
    let mut prev = None;
    let mut out = Vec::new();
    let mut steps = 0usize;

    while !session.at_end() {
        steps += 1;
        assert!(steps <= 2 * src.len() + 2, "no progress");
        if let Some(every) = suspend_every {
            if steps % every == 0 {
                let checkpoint = session.suspend();
                session = Session::resume(src, &checkpoint, options);
            }
        }

        let offset = session.offset();
        let state = session.state();
        let set = acceptable(prev, &mut rng);
        match session.next_token(set) {
            Ok(Some(lexeme)) => {
                let token = lexeme.token;
                assert!(set.accepts(token.kind), "{:?} not in {set:?}", token.kind);
                assert_eq!(lexeme.span.len(), token.len);
                assert!(token.len > 0 || token.kind == TokenKind::EndOfInput);
                assert!(lexeme.span.start >= offset);
                out.push((lexeme.span.start, lexeme.span.end, token.kind, token.text));
                prev = None;
            }
            Ok(None) => {
                assert_eq!(session.offset(), offset);
                assert_eq!(session.state().in_metadata, state.in_metadata);
                assert_eq!(session.state().paren_depth, state.paren_depth);
                prev = session.skip_literal();
            }
            Err(_) => return None,
        }
    }
    Some(out)
}

fn scanner(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let seed = u64::from(u32::from_le_bytes([data[1], data[2], data[3], data[4]]));
    let src = String::from_utf8_lossy(&data[HEADER..]).into_owned();

    let options = ScannerOptions {
        recipe_references: flags & 1 == 0,
        max_token_bytes: (flags & 2 != 0).then_some(64),
    };

    let one_pass = drive(&src, options, seed, None);
    let every = (seed % 7) as usize + 1;
    let resumed = drive(&src, options, seed, Some(every));
    assert_eq!(one_pass, resumed, "suspending every {every} steps changed the tokens");
}

fuzz_target!(|data: &[u8]| scanner(data));
