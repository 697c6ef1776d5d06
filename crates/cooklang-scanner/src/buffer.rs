//! Token accumulation buffer.
//!
//! Holds the payload of the token currently being scanned. One buffer lives
//! for the whole scanner and is cleared, not reallocated, between attempts.
//! Growth is geometric and fallible: a failed reservation surfaces as
//! [`ScanError::CapacityExhausted`] instead of aborting the process.

use alloc::{string::String, vec::Vec};

use bstr::{BStr, ByteSlice};

use crate::{classify::is_whitespace, error::ScanError};

const INITIAL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Default)]
pub(crate) struct AccumulationBuffer {
    bytes: Vec<u8>,
    limit: Option<usize>,
}

impl AccumulationBuffer {
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self {
            bytes: Vec::new(),
            limit,
        }
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.bytes.clear();
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    pub(crate) fn content(&self) -> &BStr {
        self.bytes.as_bstr()
    }

    pub(crate) fn push(&mut self, byte: u8) -> Result<(), ScanError> {
        self.reserve_for(1)?;
        self.bytes.push(byte);
        Ok(())
    }

    pub(crate) fn push_char(&mut self, ch: char) -> Result<(), ScanError> {
        let mut tmp = [0u8; 4];
        let encoded = ch.encode_utf8(&mut tmp);
        self.reserve_for(encoded.len())?;
        self.bytes.extend_from_slice(encoded.as_bytes());
        Ok(())
    }

    /// Drops everything after the first `len` bytes.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.bytes.truncate(len);
    }

    pub(crate) fn trim_trailing_whitespace(&mut self) {
        while self
            .bytes
            .last()
            .is_some_and(|&b| is_whitespace(char::from(b)))
        {
            self.bytes.pop();
        }
    }

    /// Copies the payload out as text.
    pub(crate) fn to_text(&self) -> String {
        self.bytes.to_str_lossy().into_owned()
    }

    fn reserve_for(&mut self, additional: usize) -> Result<(), ScanError> {
        let needed = self
            .bytes
            .len()
            .checked_add(additional)
            .ok_or(ScanError::CapacityExhausted {
                requested: usize::MAX,
            })?;
        if let Some(limit) = self.limit {
            if needed > limit {
                return Err(ScanError::TokenTooLong { limit });
            }
        }
        if needed <= self.bytes.capacity() {
            return Ok(());
        }

        let mut capacity = self.bytes.capacity().max(INITIAL_CAPACITY);
        while capacity < needed {
            capacity = capacity
                .checked_mul(2)
                .ok_or(ScanError::CapacityExhausted { requested: needed })?;
        }
        self.bytes
            .try_reserve_exact(capacity - self.bytes.len())
            .map_err(|_| ScanError::CapacityExhausted {
                requested: capacity,
            })
    }
}
