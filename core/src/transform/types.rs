//! transform/types.rs
//! Block transform capability and its error type.
//!
//! Contract notes:
//! - `transform` consumes the whole input slice; the produced count may differ.
//! - Output never grows by more than one block per call; a transform that
//!   cannot fit its output reports `OutputTooSmall` instead of truncating.
//! - `finalize` runs at most once; later calls fail with `Finalized`.

use std::fmt;
use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::constants::transform_ids;

/// Registry identifiers as an enum (for display and validation).
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum TransformKind {
    Identity         = transform_ids::IDENTITY,
    ZeroPad          = transform_ids::ZERO_PAD,
    Crc32Append      = transform_ids::CRC32_APPEND,
    Crc32Verify      = transform_ids::CRC32_VERIFY,
    Aes256CbcEncrypt = transform_ids::AES256_CBC_ENCRYPT,
    Aes256CbcDecrypt = transform_ids::AES256_CBC_DECRYPT,
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransformKind::Identity         => "identity",
            TransformKind::ZeroPad          => "zero-pad",
            TransformKind::Crc32Append      => "crc32-append",
            TransformKind::Crc32Verify      => "crc32-verify",
            TransformKind::Aes256CbcEncrypt => "aes256-cbc-encrypt",
            TransformKind::Aes256CbcDecrypt => "aes256-cbc-decrypt",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("output buffer too small: needed {needed} bytes, available {available}")]
    OutputTooSmall { needed: usize, available: usize },

    #[error("transform already finalized")]
    Finalized,

    #[error("incomplete final block: {pending} bytes pending, block size {block_size}")]
    IncompleteBlock { pending: usize, block_size: usize },

    #[error("invalid padding")]
    InvalidPadding,

    #[error("checksum mismatch: expected=0x{expected:08x}, actual=0x{actual:08x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("truncated trailer: have {have} bytes, need {need}")]
    TruncatedTrailer { have: usize, need: usize },

    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    #[error("invalid IV length: expected={expected}, actual={actual}")]
    InvalidIvLen { expected: usize, actual: usize },

    #[error("transform failure: {0}")]
    Failure(String),
}

/// A block-granular reversible transform (cipher, codec, framer).
///
/// Implementations may keep partial blocks between calls. The stream
/// adapter only relies on the counts returned here.
pub trait BlockTransform {
    /// Natural alignment unit in bytes. Must be positive.
    fn block_size(&self) -> usize;

    /// Consume all of `input`, writing at most `output.len()` bytes.
    /// Returns the number of bytes written to `output`.
    fn transform(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TransformError>;

    /// Flush buffered state plus any padding/trailer into `output`.
    fn finalize(&mut self, output: &mut [u8]) -> Result<usize, TransformError>;
}

impl<T: BlockTransform + ?Sized> BlockTransform for Box<T> {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn transform(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TransformError> {
        (**self).transform(input, output)
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<usize, TransformError> {
        (**self).finalize(output)
    }
}

impl<T: BlockTransform + ?Sized> BlockTransform for &mut T {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn transform(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TransformError> {
        (**self).transform(input, output)
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<usize, TransformError> {
        (**self).finalize(output)
    }
}

/// Copy `bytes` into the front of `output`, failing if it does not fit.
#[inline]
pub(crate) fn emit(bytes: &[u8], output: &mut [u8]) -> Result<usize, TransformError> {
    if bytes.len() > output.len() {
        return Err(TransformError::OutputTooSmall {
            needed: bytes.len(),
            available: output.len(),
        });
    }
    output[..bytes.len()].copy_from_slice(bytes);
    Ok(bytes.len())
}
