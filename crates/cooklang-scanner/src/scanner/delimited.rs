//! Constructs with a fixed terminator: comments, notes, metadata, section
//! headers and plain text.
//!
//! Each function scans one construct from the probe's current position into
//! the buffer and reports whether it matched. None of them touch scanner
//! state; the dispatcher applies state changes once a match is settled.

use super::probe::Probe;
use crate::{
    buffer::AccumulationBuffer,
    classify::{is_text_delimiter, is_whitespace},
    error::ScanError,
    lexer::Lexer,
};

/// `[- … -]`. Runs to the closing marker or end of input; may span lines.
pub(crate) fn scan_block_comment<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
) -> Result<bool, ScanError> {
    if probe.peek() != Some('[') {
        return Ok(false);
    }
    probe.advance();
    if probe.peek() != Some('-') {
        return Ok(false);
    }
    probe.advance();

    while let Some(ch) = probe.peek() {
        probe.advance();
        if ch == '-' && probe.peek() == Some(']') {
            probe.advance();
            break;
        }
        buffer.push_char(ch)?;
    }
    Ok(true)
}

/// A maximal run of spaces and tabs.
pub(crate) fn scan_whitespace<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
) -> Result<bool, ScanError> {
    push_while(probe, buffer, is_whitespace)?;
    Ok(!buffer.is_empty())
}

pub(crate) fn scan_newline<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
) -> Result<bool, ScanError> {
    if probe.peek() != Some('\n') {
        return Ok(false);
    }
    buffer.push(b'\n')?;
    probe.advance();
    Ok(true)
}

/// `> free text` at the start of a line. `>>` belongs to metadata.
pub(crate) fn scan_recipe_note<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
) -> Result<bool, ScanError> {
    if probe.peek() != Some('>') {
        return Ok(false);
    }
    probe.advance();
    if probe.peek() == Some('>') {
        return Ok(false);
    }
    skip_blanks(probe);
    push_rest_of_line(probe, buffer)?;
    Ok(true)
}

/// The key of `>> key: value`, trimmed. An empty key does not match.
pub(crate) fn scan_metadata_key<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
) -> Result<bool, ScanError> {
    for _ in 0..2 {
        if probe.peek() != Some('>') {
            return Ok(false);
        }
        probe.advance();
    }
    skip_blanks(probe);
    push_while(probe, buffer, |c| c != ':' && c != '\n')?;
    buffer.trim_trailing_whitespace();
    Ok(!buffer.is_empty())
}

/// The value after a metadata key: optional `:`, blanks, rest of the line.
/// An empty value does not match.
pub(crate) fn scan_metadata_value<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
) -> Result<bool, ScanError> {
    if probe.peek() == Some(':') {
        probe.advance();
    }
    skip_blanks(probe);
    push_rest_of_line(probe, buffer)?;
    Ok(!buffer.is_empty())
}

/// `= Name`, `== Name ==`, … The name is trimmed and may be empty; trailing
/// `=` runs and blanks are consumed up to the newline.
pub(crate) fn scan_section_header<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
) -> Result<bool, ScanError> {
    if probe.peek() != Some('=') {
        return Ok(false);
    }
    while probe.peek() == Some('=') {
        probe.advance();
    }
    skip_blanks(probe);
    push_while(probe, buffer, |c| c != '=' && c != '\n')?;
    buffer.trim_trailing_whitespace();
    while probe.peek_is(|c| c == '=' || is_whitespace(c)) {
        probe.advance();
    }
    Ok(true)
}

/// `-- text`. One blank after the marker is dropped from the payload.
pub(crate) fn scan_line_comment<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
) -> Result<bool, ScanError> {
    for _ in 0..2 {
        if probe.peek() != Some('-') {
            return Ok(false);
        }
        probe.advance();
    }
    if probe.peek_is(is_whitespace) {
        probe.advance();
    }
    push_rest_of_line(probe, buffer)?;
    Ok(true)
}

/// The inside of a `( … )` note.
///
/// Starts at nesting `depth`. A `)` at depth zero ends the note without being
/// consumed; a newline or end of input ends it unfinished. Returns the depth
/// left open, or `None` when nothing was scanned.
pub(crate) fn scan_note_content<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
    mut depth: u32,
) -> Result<Option<u32>, ScanError> {
    while let Some(ch) = probe.peek() {
        match ch {
            '\n' => break,
            ')' if depth == 0 => break,
            ')' => depth -= 1,
            '(' => depth = depth.saturating_add(1),
            _ => {}
        }
        buffer.push_char(ch)?;
        probe.advance();
    }
    Ok((!buffer.is_empty()).then_some(depth))
}

/// Plain step text up to a marker, brace, paren or newline.
///
/// `[-` and `--` end the text before their first character so the comment
/// scanners see them intact. At the start of a line, text may not begin with
/// `-`, `=`, `[` or a lone `>`; `>>` is accepted as text. Mid-line, a `[` that
/// does not open a block comment is ordinary text.
pub(crate) fn scan_text<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
    at_line_start: bool,
) -> Result<bool, ScanError> {
    if at_line_start {
        match probe.peek() {
            Some('-' | '=' | '[') => return Ok(false),
            Some('>') => {
                probe.advance();
                if probe.peek() != Some('>') {
                    return Ok(false);
                }
                buffer.push(b'>')?;
                probe.mark_end();
            }
            _ => {}
        }
    }

    while let Some(ch) = probe.peek() {
        if ch == '\n' || is_text_delimiter(ch) {
            break;
        }
        probe.advance();
        let opens_comment = match ch {
            '[' | '-' => probe.peek() == Some('-'),
            _ => false,
        };
        if opens_comment {
            break;
        }
        buffer.push_char(ch)?;
        probe.mark_end();
    }
    Ok(!buffer.is_empty())
}

fn push_while<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
    pred: impl Fn(char) -> bool,
) -> Result<(), ScanError> {
    while let Some(ch) = probe.peek().filter(|c| pred(*c)) {
        buffer.push_char(ch)?;
        probe.advance();
    }
    Ok(())
}

#[inline]
fn push_rest_of_line<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
) -> Result<(), ScanError> {
    push_while(probe, buffer, |c| c != '\n')
}

/// Consumes blanks as part of the token without recording them.
#[inline]
fn skip_blanks<L: Lexer + ?Sized>(probe: &mut Probe<'_, L>) {
    while probe.peek_is(is_whitespace) {
        probe.advance();
    }
}
