//! transform/codecs/mod.rs
//! Reference block transforms.

pub mod aes_cbc;
pub mod crc32;
pub mod identity;
pub mod zero_pad;

pub use aes_cbc::*;
pub use crc32::*;
pub use identity::*;
pub use zero_pad::*;
