//! transform/registry.rs
//! Transform registry and factory functions.

use crate::constants::{transform_ids, AES_BLOCK_LEN, CRC32_TRAILER_LEN, DEFAULT_PAD_BLOCK};
use crate::transform::codecs::{
    Aes256CbcDecryptor, Aes256CbcEncryptor, Crc32Append, Crc32Verify, IdentityTransform, ZeroPadTransform,
};
use crate::transform::types::{BlockTransform, TransformKind};
use crate::types::StreamError;

pub struct TransformInfo {
    pub name: &'static str,
    pub needs_key: bool,
    pub block_size: usize,
}

/// Construction inputs for registry transforms. Unused fields are ignored.
#[derive(Clone, Debug, Default)]
pub struct TransformParams<'a> {
    pub key: Option<&'a [u8]>,
    pub iv: Option<&'a [u8]>,
    /// Block size for `ZERO_PAD` (defaults to `DEFAULT_PAD_BLOCK`).
    pub block_size: Option<usize>,
}

pub fn resolve(transform_id: u16) -> Result<TransformInfo, StreamError> {
    match transform_id {
        x if x == transform_ids::IDENTITY =>
            Ok(TransformInfo { name: "identity", needs_key: false, block_size: 1 }),
        x if x == transform_ids::ZERO_PAD =>
            Ok(TransformInfo { name: "zero-pad", needs_key: false, block_size: DEFAULT_PAD_BLOCK }),
        x if x == transform_ids::CRC32_APPEND =>
            Ok(TransformInfo { name: "crc32-append", needs_key: false, block_size: CRC32_TRAILER_LEN }),
        x if x == transform_ids::CRC32_VERIFY =>
            Ok(TransformInfo { name: "crc32-verify", needs_key: false, block_size: CRC32_TRAILER_LEN }),
        x if x == transform_ids::AES256_CBC_ENCRYPT =>
            Ok(TransformInfo { name: "aes256-cbc-encrypt", needs_key: true, block_size: AES_BLOCK_LEN }),
        x if x == transform_ids::AES256_CBC_DECRYPT =>
            Ok(TransformInfo { name: "aes256-cbc-decrypt", needs_key: true, block_size: AES_BLOCK_LEN }),
        other => Err(StreamError::UnsupportedTransform { transform_id: other }),
    }
}

pub fn create_transform(transform_id: u16, params: &TransformParams<'_>)
    -> Result<Box<dyn BlockTransform + Send>, StreamError>
{
    let kind = TransformKind::try_from(transform_id)
        .map_err(|_| StreamError::UnsupportedTransform { transform_id })?;
    log::debug!("creating transform {}", kind);

    let transform: Box<dyn BlockTransform + Send> = match kind {
        TransformKind::Identity => Box::new(IdentityTransform::new()),
        TransformKind::ZeroPad => {
            Box::new(ZeroPadTransform::new(params.block_size.unwrap_or(DEFAULT_PAD_BLOCK))?)
        }
        TransformKind::Crc32Append => Box::new(Crc32Append::new()),
        TransformKind::Crc32Verify => Box::new(Crc32Verify::new()),
        TransformKind::Aes256CbcEncrypt => {
            let (key, iv) = key_and_iv(kind, params)?;
            Box::new(Aes256CbcEncryptor::new(key, iv)?)
        }
        TransformKind::Aes256CbcDecrypt => {
            let (key, iv) = key_and_iv(kind, params)?;
            Box::new(Aes256CbcDecryptor::new(key, iv)?)
        }
    };
    Ok(transform)
}

fn key_and_iv<'a>(kind: TransformKind, params: &TransformParams<'a>) -> Result<(&'a [u8], &'a [u8]), StreamError> {
    let key = params.key
        .ok_or_else(|| StreamError::Validation(format!("{} requires a key", kind)))?;
    let iv = params.iv
        .ok_or_else(|| StreamError::Validation(format!("{} requires an IV", kind)))?;
    Ok((key, iv))
}
