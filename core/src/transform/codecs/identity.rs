//! codecs/identity.rs
//! Pass-through transform (block size 1, empty finalize).

use crate::transform::types::{emit, BlockTransform, TransformError};

#[derive(Debug, Default)]
pub struct IdentityTransform {
    finalized: bool,
}

impl IdentityTransform {
    pub fn new() -> Self { Self::default() }
}

impl BlockTransform for IdentityTransform {
    fn block_size(&self) -> usize {
        1
    }

    fn transform(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TransformError> {
        if self.finalized {
            return Err(TransformError::Finalized);
        }
        emit(input, output)
    }

    fn finalize(&mut self, _output: &mut [u8]) -> Result<usize, TransformError> {
        if self.finalized {
            return Err(TransformError::Finalized);
        }
        self.finalized = true;
        Ok(0)
    }
}
