//! config.rs
//! Construction options for stream adapters and facades.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE};
use crate::types::StreamError;
use crate::utils::min_buffer_size;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamConfig {
    /// Scratch capacity in bytes.
    /// - `None` → `DEFAULT_BUFFER_SIZE`.
    /// - Must be at least two transform blocks.
    pub buffer_size: Option<usize>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { buffer_size: None }
    }
}

impl StreamConfig {
    pub fn new(buffer_size: Option<usize>) -> Self {
        Self { buffer_size }
    }

    /// Parse a JSON config document, e.g. `{"buffer_size": 4096}`.
    pub fn from_json(json: &str) -> Result<Self, StreamError> {
        let cfg: StreamConfig = serde_json::from_str(json)
            .map_err(|e| StreamError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Transform-independent checks.
    pub fn validate(&self) -> Result<(), StreamError> {
        match self.buffer_size {
            Some(0) => Err(StreamError::Validation("buffer_size must be positive".into())),
            Some(n) if n > MAX_BUFFER_SIZE => Err(StreamError::Validation(format!(
                "buffer_size {} exceeds maximum {}", n, MAX_BUFFER_SIZE
            ))),
            _ => Ok(()),
        }
    }

    /// Resolve the effective scratch capacity for a transform.
    ///
    /// Never clamps: an explicit size below two blocks is an error.
    pub fn resolve_buffer_size(&self, block_size: usize) -> Result<usize, StreamError> {
        self.validate()?;
        if block_size == 0 {
            return Err(StreamError::InvalidBlockSize);
        }
        let buffer_size = self.buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE);
        if buffer_size < min_buffer_size(block_size) {
            return Err(StreamError::BufferTooSmall { buffer_size, block_size });
        }
        Ok(buffer_size)
    }
}
