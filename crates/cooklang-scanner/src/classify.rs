//! Character classes shared by every scanning strategy.
//!
//! All predicates are pure and operate on decoded scalars. Anything above the
//! 7-bit ASCII range counts as content so names written in non-Latin scripts
//! scan the same way as ASCII ones.

/// Letters, digits, `_`, `-`, `'`, `"`, or any non-ASCII scalar.
#[inline]
pub const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '\'' | '"') || !c.is_ascii()
}

/// Space or horizontal tab. A newline is never whitespace here: line breaks
/// are structural.
#[inline]
pub const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

/// Characters that may appear inside an ingredient, cookware or timer name.
#[inline]
pub const fn is_name_char(c: char) -> bool {
    is_word_char(c)
}

/// Characters that end a run of plain step text.
#[inline]
pub const fn is_text_delimiter(c: char) -> bool {
    matches!(c, '@' | '#' | '~' | '{' | '}' | '(' | ')')
}

/// Characters that end a recipe reference path (`@./sauces/pesto{}`).
#[inline]
pub const fn is_reference_terminator(c: char) -> bool {
    matches!(c, '{' | '(' | '\n' | '@' | '#' | '~')
}
