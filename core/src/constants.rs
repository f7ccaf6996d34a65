/// Default scratch capacity when `StreamConfig::buffer_size` is `None`.
pub const DEFAULT_BUFFER_SIZE: usize = 8192; // 8 KiB

/// Scratch must hold at least this many blocks.
pub const MIN_BUFFER_BLOCKS: usize = 2;

/// Max scratch size sanity bound (32 MiB).
pub const MAX_BUFFER_SIZE: usize = 32 * 1024 * 1024;

/// Transform identifiers (stable, used by the registry).
pub mod transform_ids {
    pub const IDENTITY: u16           = 0x0000;
    pub const ZERO_PAD: u16           = 0x0001;
    pub const CRC32_APPEND: u16       = 0x0002;
    pub const CRC32_VERIFY: u16       = 0x0003;
    pub const AES256_CBC_ENCRYPT: u16 = 0x0010;
    pub const AES256_CBC_DECRYPT: u16 = 0x0011;
}

/// AES block length (bytes).
pub const AES_BLOCK_LEN: usize = 16;

/// AES-256 key length (bytes).
pub const KEY_LEN_32: usize = 32;

/// CBC initialization vector length (bytes).
pub const IV_LEN_16: usize = 16;

/// CRC-32 trailer length (bytes).
pub const CRC32_TRAILER_LEN: usize = 4;

/// Default block size for the zero-padding transform.
pub const DEFAULT_PAD_BLOCK: usize = 8;
