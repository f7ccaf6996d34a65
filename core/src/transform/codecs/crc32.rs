//! codecs/crc32.rs
//! CRC-32 trailer: append on encode, strip and verify on decode.
//!
//! Wire layout: `payload || crc32(payload)` with the checksum little-endian.

use crc32fast::Hasher;

use crate::constants::CRC32_TRAILER_LEN;
use crate::transform::types::{emit, BlockTransform, TransformError};

/// Passes data through and appends its CRC-32 on finalize.
pub struct Crc32Append {
    hasher: Hasher,
    finalized: bool,
}

impl Crc32Append {
    pub fn new() -> Self {
        Self { hasher: Hasher::new(), finalized: false }
    }
}

impl Default for Crc32Append {
    fn default() -> Self { Self::new() }
}

impl BlockTransform for Crc32Append {
    fn block_size(&self) -> usize {
        CRC32_TRAILER_LEN
    }

    fn transform(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TransformError> {
        if self.finalized {
            return Err(TransformError::Finalized);
        }
        let n = emit(input, output)?;
        self.hasher.update(input);
        Ok(n)
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<usize, TransformError> {
        if self.finalized {
            return Err(TransformError::Finalized);
        }
        self.finalized = true;
        let crc = self.hasher.clone().finalize();
        emit(&crc.to_le_bytes(), output)
    }
}

/// Strips the trailing CRC-32 and fails on finalize if it does not match.
///
/// The last four bytes seen are always held back, so the payload is
/// released with a lag of one trailer.
pub struct Crc32Verify {
    hasher: Hasher,
    tail: Vec<u8>,
    finalized: bool,
}

impl Crc32Verify {
    pub fn new() -> Self {
        Self {
            hasher: Hasher::new(),
            tail: Vec::with_capacity(2 * CRC32_TRAILER_LEN),
            finalized: false,
        }
    }
}

impl Default for Crc32Verify {
    fn default() -> Self { Self::new() }
}

impl BlockTransform for Crc32Verify {
    fn block_size(&self) -> usize {
        CRC32_TRAILER_LEN
    }

    fn transform(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TransformError> {
        if self.finalized {
            return Err(TransformError::Finalized);
        }

        let total = self.tail.len() + input.len();
        if total <= CRC32_TRAILER_LEN {
            self.tail.extend_from_slice(input);
            return Ok(0);
        }

        let release = total - CRC32_TRAILER_LEN;
        if release > output.len() {
            return Err(TransformError::OutputTooSmall { needed: release, available: output.len() });
        }

        // Held tail first, then input, minus the last four bytes overall.
        let from_tail = release.min(self.tail.len());
        output[..from_tail].copy_from_slice(&self.tail[..from_tail]);
        let from_input = release - from_tail;
        output[from_tail..release].copy_from_slice(&input[..from_input]);
        self.hasher.update(&output[..release]);

        self.tail.drain(..from_tail);
        self.tail.extend_from_slice(&input[from_input..]);
        debug_assert_eq!(self.tail.len(), CRC32_TRAILER_LEN);
        Ok(release)
    }

    fn finalize(&mut self, _output: &mut [u8]) -> Result<usize, TransformError> {
        if self.finalized {
            return Err(TransformError::Finalized);
        }
        self.finalized = true;

        if self.tail.len() < CRC32_TRAILER_LEN {
            return Err(TransformError::TruncatedTrailer {
                have: self.tail.len(),
                need: CRC32_TRAILER_LEN,
            });
        }
        let mut raw = [0u8; CRC32_TRAILER_LEN];
        raw.copy_from_slice(&self.tail);
        let expected = u32::from_le_bytes(raw);
        let actual = self.hasher.clone().finalize();
        if expected != actual {
            return Err(TransformError::ChecksumMismatch { expected, actual });
        }
        Ok(0)
    }
}
