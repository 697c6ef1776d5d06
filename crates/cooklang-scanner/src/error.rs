use thiserror::Error;

/// Fatal scanning failures.
///
/// A kind that simply does not match is not an error: [`Scanner::scan`]
/// reports it as `Ok(None)`. These variants mean the scan cannot continue at
/// all and the host should abandon the parse.
///
/// [`Scanner::scan`]: crate::Scanner::scan
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The token buffer could not grow.
    #[error("token buffer could not grow to {requested} bytes")]
    CapacityExhausted {
        /// Capacity the buffer tried to reserve.
        requested: usize,
    },
    /// A single token exceeded [`ScannerOptions::max_token_bytes`].
    ///
    /// [`ScannerOptions::max_token_bytes`]: crate::ScannerOptions::max_token_bytes
    #[error("token exceeds the configured limit of {limit} bytes")]
    TokenTooLong {
        /// The configured ceiling.
        limit: usize,
    },
}
