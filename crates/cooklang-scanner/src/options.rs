/// Configuration options for the scanner.
///
/// # Examples
///
/// ```rust
/// use cooklang_scanner::{Scanner, ScannerOptions};
///
/// let scanner = Scanner::with_options(ScannerOptions {
///     recipe_references: false,
///     ..Default::default()
/// });
/// assert!(!scanner.options().recipe_references);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerOptions {
    /// Whether an ingredient name starting with `./` or `.\` is scanned as a
    /// recipe reference path.
    ///
    /// References run verbatim (spaces included) up to the next `{`, `(`,
    /// newline, or marker character, so `@./sauces/basic pesto{}` yields the
    /// name `./sauces/basic pesto`.
    ///
    /// # Default
    ///
    /// `true`
    pub recipe_references: bool,

    /// Upper bound, in bytes, on the payload of a single token.
    ///
    /// Exceeding it aborts the scan with [`ScanError::TokenTooLong`]. Useful
    /// for hosts that feed untrusted documents and would rather fail than
    /// buffer an unterminated block comment spanning megabytes.
    ///
    /// # Default
    ///
    /// `None` (unbounded)
    ///
    /// [`ScanError::TokenTooLong`]: crate::ScanError::TokenTooLong
    pub max_token_bytes: Option<usize>,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            recipe_references: true,
            max_token_bytes: None,
        }
    }
}
