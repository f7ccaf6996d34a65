//! transform/mod.rs
//! Block transform capability, reference codecs, and the id registry.
//!
//! Notes:
//! - The stream adapter depends only on `BlockTransform`.
//! - Codecs here are reference implementations used by the stream helpers and tests.
//! - Registry resolves transform IDs to boxed implementations.

pub mod types;
pub mod registry;
pub mod codecs;

pub use types::*;
pub use registry::*;
