use std::fmt;
use num_enum::TryFromPrimitive;

use crate::constants::MIN_BUFFER_BLOCKS;

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

/// Smallest scratch capacity accepted for a transform with `block_size`.
#[inline]
pub fn min_buffer_size(block_size: usize) -> usize {
    block_size.saturating_mul(MIN_BUFFER_BLOCKS)
}

/// Largest input chunk that can be transformed into `room` bytes of output
/// without risking overflow, or `None` when not even one block fits.
///
/// One block minus one byte is held back for transforms that emit a
/// buffered partial block on the next call.
#[inline]
pub fn max_chunk_for(room: usize, block_size: usize) -> Option<usize> {
    let m = room.checked_sub(block_size - 1)?;
    if m < block_size {
        return None;
    }
    Some(m)
}
