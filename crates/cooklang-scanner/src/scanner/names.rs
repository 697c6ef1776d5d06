//! Ingredient, cookware and timer names.
//!
//! A name is one word, or several space-separated words when the run is
//! directly followed by `{`:
//!
//! ```text
//! @flour and sugar{200%g}   -> "flour and sugar"
//! @flour and sugar          -> "flour"
//! ```
//!
//! The scan is a single forward pass. After the first word the end is
//! committed; further words are read speculatively and the commit only moves
//! forward when a `{` confirms them. The probe reports the span up to the last
//! commit, and the buffer is truncated to the matching length, so nothing is
//! re-read.

use super::probe::Probe;
use crate::{
    buffer::AccumulationBuffer,
    classify::{is_name_char, is_reference_terminator, is_whitespace},
    error::ScanError,
    lexer::Lexer,
};

/// Scans a possibly multiword name. Fails only when no name character is at
/// the cursor.
pub(crate) fn scan_name<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
) -> Result<bool, ScanError> {
    consume_word(probe, buffer)?;
    if buffer.is_empty() {
        return Ok(false);
    }
    probe.mark_end();
    if probe.peek() == Some('{') {
        return Ok(true);
    }

    let mut committed = buffer.len();
    while probe.peek_is(is_whitespace) {
        while let Some(ch) = probe.peek().filter(|c| is_whitespace(*c)) {
            buffer.push_char(ch)?;
            probe.advance();
        }
        if !probe.peek_is(is_name_char) {
            break;
        }
        consume_word(probe, buffer)?;
        if probe.peek() == Some('{') {
            probe.mark_end();
            committed = buffer.len();
            break;
        }
    }

    buffer.truncate(committed);
    Ok(true)
}

/// Scans a recipe reference (`./path` or `.\path`), verbatim up to the next
/// structural character.
pub(crate) fn scan_recipe_reference<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
) -> Result<bool, ScanError> {
    if probe.peek() != Some('.') {
        return Ok(false);
    }
    buffer.push(b'.')?;
    probe.advance();
    let Some(sep @ ('/' | '\\')) = probe.peek() else {
        return Ok(false);
    };
    buffer.push_char(sep)?;
    probe.advance();

    while let Some(ch) = probe.peek().filter(|c| !is_reference_terminator(*c)) {
        buffer.push_char(ch)?;
        probe.advance();
    }
    Ok(true)
}

fn consume_word<L: Lexer + ?Sized>(
    probe: &mut Probe<'_, L>,
    buffer: &mut AccumulationBuffer,
) -> Result<(), ScanError> {
    while let Some(ch) = probe.peek().filter(|c| is_name_char(*c)) {
        buffer.push_char(ch)?;
        probe.advance();
    }
    Ok(())
}
