//! cryptostream-core
//!
//! Exposes any block-oriented transform (cipher, codec, framer) as a
//! sequential byte stream in both directions.
//! No async, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;
pub mod utils;

pub mod telemetry;
pub mod transform;

// Stream layers
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::StreamConfig;
    pub use crate::stream::{StreamAdapter, TransformReader, TransformWriter};
    pub use crate::telemetry::StreamCounters;
    pub use crate::transform::{BlockTransform, TransformError};
    pub use crate::types::StreamError;
}
