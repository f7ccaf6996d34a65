//! codecs/zero_pad.rs
//! Aligns a byte stream to whole blocks, zero-filling the last one.
//!
//! Design notes:
//! - Full blocks are emitted as soon as they are complete.
//! - A trailing partial block is held until `finalize`, then padded with zeros.
//! - Padding is not self-describing, so there is no matching decoder.

use crate::transform::types::{BlockTransform, TransformError};

#[derive(Debug)]
pub struct ZeroPadTransform {
    block_size: usize,
    pending: Vec<u8>,
    finalized: bool,
}

impl ZeroPadTransform {
    pub fn new(block_size: usize) -> Result<Self, TransformError> {
        if block_size == 0 {
            return Err(TransformError::Failure("block size must be positive".into()));
        }
        Ok(Self {
            block_size,
            pending: Vec::with_capacity(block_size),
            finalized: false,
        })
    }
}

impl BlockTransform for ZeroPadTransform {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn transform(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TransformError> {
        if self.finalized {
            return Err(TransformError::Finalized);
        }

        let bs = self.block_size;
        let total = self.pending.len() + input.len();
        let aligned = total / bs * bs;
        if aligned > output.len() {
            return Err(TransformError::OutputTooSmall { needed: aligned, available: output.len() });
        }
        if aligned == 0 {
            self.pending.extend_from_slice(input);
            return Ok(0);
        }

        // Pending bytes go out first, followed by the aligned prefix of input.
        let held = self.pending.len();
        output[..held].copy_from_slice(&self.pending);
        let from_input = aligned - held;
        output[held..aligned].copy_from_slice(&input[..from_input]);

        self.pending.clear();
        self.pending.extend_from_slice(&input[from_input..]);
        Ok(aligned)
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<usize, TransformError> {
        if self.finalized {
            return Err(TransformError::Finalized);
        }
        self.finalized = true;

        if self.pending.is_empty() {
            return Ok(0);
        }

        let bs = self.block_size;
        if bs > output.len() {
            return Err(TransformError::OutputTooSmall { needed: bs, available: output.len() });
        }
        let held = self.pending.len();
        output[..held].copy_from_slice(&self.pending);
        output[held..bs].fill(0);
        self.pending.clear();
        Ok(bs)
    }
}
