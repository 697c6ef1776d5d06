//! Cross-call scanner state and its persisted form.
//!
//! An incremental parser tears the scanner down around every edit and
//! rebuilds it from the bytes written by [`ScannerState::serialize`]. The
//! encoding is three bytes, one per field:
//!
//! | byte | field           |
//! |------|-----------------|
//! | 0    | `in_metadata`   |
//! | 1    | `at_line_start` |
//! | 2    | `paren_depth`, saturated at 255 |
//!
//! Restoring from a buffer shorter than that yields the session-start state.

use tracing::debug;

/// Length of the persisted state in bytes.
pub const SERIALIZED_LEN: usize = 3;

/// State the scanner carries from one call to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScannerState {
    /// The next character begins a fresh line.
    pub at_line_start: bool,
    /// The previous token was a metadata key still waiting for its value.
    pub in_metadata: bool,
    /// Open `(` count carried into a note that stopped at end of input.
    pub paren_depth: u32,
}

impl Default for ScannerState {
    fn default() -> Self {
        Self {
            at_line_start: true,
            in_metadata: false,
            paren_depth: 0,
        }
    }
}

impl ScannerState {
    /// Encodes the state. Total: every state has an encoding.
    pub fn serialize(&self) -> [u8; SERIALIZED_LEN] {
        [
            u8::from(self.in_metadata),
            u8::from(self.at_line_start),
            u8::try_from(self.paren_depth).unwrap_or(u8::MAX),
        ]
    }

    /// Decodes a state written by [`serialize`](Self::serialize). Extra
    /// trailing bytes are ignored; a short buffer restores the default.
    pub fn restore(bytes: &[u8]) -> Self {
        match *bytes {
            [in_metadata, at_line_start, paren_depth, ..] => Self {
                at_line_start: at_line_start != 0,
                in_metadata: in_metadata != 0,
                paren_depth: u32::from(paren_depth),
            },
            _ => {
                debug!(len = bytes.len(), "short scanner state, resetting");
                Self::default()
            }
        }
    }
}
