//! Accumulator for streamed response chunks

use crate::error::{ResolveError, Result};

/// Growable byte accumulator fed by the fetch loop.
///
/// Only grows; the bytes are handed over once with [`ResponseBuffer::into_bytes`].
#[derive(Debug, Default)]
pub struct ResponseBuffer {
    data: Vec<u8>,
}

impl ResponseBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk, growing the backing storage to `len + chunk.len()`
    pub fn append(&mut self, chunk: &[u8]) -> Result<()> {
        self.grow(chunk.len())?;
        self.data.extend_from_slice(chunk);
        Ok(())
    }

    /// Reserve room for `additional` more bytes without aborting on failure
    pub(crate) fn grow(&mut self, additional: usize) -> Result<()> {
        self.data
            .try_reserve(additional)
            .map_err(|_| ResolveError::AllocationFailure {
                requested: self.data.len().saturating_add(additional),
            })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
