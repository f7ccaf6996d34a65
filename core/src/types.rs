use std::io;
use thiserror::Error;

use crate::transform::{TransformError, TransformKind};
use crate::utils::{enum_name_or_hex, min_buffer_size};

fn required_size(block_size: &usize) -> usize {
    min_buffer_size(*block_size)
}

fn transform_name(transform_id: &u16) -> String {
    enum_name_or_hex::<TransformKind>(*transform_id)
}

/// Unified stream error covering construction, transform, and I/O failures.
/// - `From<T>` impls enable `?` across the adapter and facades.
/// - `From<StreamError> for io::Error` maps onto the std stream traits.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Scratch capacity below two blocks.
    #[error("buffer size {buffer_size} too small for block size {block_size} (need at least {})", required_size(.block_size))]
    BufferTooSmall { buffer_size: usize, block_size: usize },

    /// Transform reported a zero block size.
    #[error("transform block size must be positive")]
    InvalidBlockSize,

    /// Transform failure, propagated verbatim.
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    /// Sink write failed; `consumed` input bytes were already accepted.
    #[error("output stream failure after consuming {consumed} bytes: {source}")]
    Sink { consumed: usize, #[source] source: io::Error },

    /// Source read or sink flush failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unknown registry id.
    #[error("unsupported transform: {}", transform_name(.transform_id))]
    UnsupportedTransform { transform_id: u16 },

    /// Configuration document could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Generic high-level validation with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}

impl StreamError {
    /// Bytes accepted from the caller before a sink failure, if any.
    pub fn consumed(&self) -> Option<usize> {
        match self {
            StreamError::Sink { consumed, .. } => Some(*consumed),
            _ => None,
        }
    }
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Io(inner) => inner,
            StreamError::Sink { .. } => {
                let kind = match &e {
                    StreamError::Sink { source, .. } => source.kind(),
                    _ => io::ErrorKind::Other,
                };
                io::Error::new(kind, e)
            }
            StreamError::Transform(_) => io::Error::new(io::ErrorKind::InvalidData, e),
            StreamError::BufferTooSmall { .. }
            | StreamError::InvalidBlockSize
            | StreamError::UnsupportedTransform { .. }
            | StreamError::Config(_)
            | StreamError::Validation(_) => io::Error::new(io::ErrorKind::InvalidInput, e),
        }
    }
}
