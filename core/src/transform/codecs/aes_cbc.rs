//! src/transform/codecs/aes_cbc.rs
//! AES-256-CBC with PKCS#7 padding as a block transform.
//!
//! Design notes:
//! - The block primitive comes from the RustCrypto `aes` crate; only the CBC
//!   chaining and padding live here.
//! - Encrypt holds a partial block (< 16 bytes) between calls; finalize pads it
//!   to a full block (a whole padding block when already aligned).
//! - Decrypt always holds back the last full block so finalize can strip and
//!   check the padding.
//! - CBC provides no integrity. Pair it with a MAC or use an AEAD framing
//!   layer when the ciphertext can be tampered with.

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes256, Block};
use rand::RngCore;
use zeroize::Zeroize;

use crate::constants::{AES_BLOCK_LEN, IV_LEN_16, KEY_LEN_32};
use crate::transform::types::{BlockTransform, TransformError};

fn new_cipher(key: &[u8], iv: &[u8]) -> Result<(Aes256, [u8; IV_LEN_16]), TransformError> {
    if key.len() != KEY_LEN_32 {
        return Err(TransformError::InvalidKeyLen { expected: KEY_LEN_32, actual: key.len() });
    }
    if iv.len() != IV_LEN_16 {
        return Err(TransformError::InvalidIvLen { expected: IV_LEN_16, actual: iv.len() });
    }
    let cipher = Aes256::new_from_slice(key)
        .map_err(|_| TransformError::InvalidKeyLen { expected: KEY_LEN_32, actual: key.len() })?;
    let mut chain = [0u8; IV_LEN_16];
    chain.copy_from_slice(iv);
    Ok((cipher, chain))
}

#[inline]
fn encrypt_block(cipher: &Aes256, chain: &mut [u8; AES_BLOCK_LEN], src: &[u8], dst: &mut [u8]) {
    let mut block = Block::clone_from_slice(src);
    for (b, c) in block.iter_mut().zip(chain.iter()) {
        *b ^= c;
    }
    cipher.encrypt_block(&mut block);
    chain.copy_from_slice(&block);
    dst[..AES_BLOCK_LEN].copy_from_slice(&block);
}

#[inline]
fn decrypt_block(cipher: &Aes256, chain: &mut [u8; AES_BLOCK_LEN], src: &[u8], dst: &mut [u8]) {
    let mut block = Block::clone_from_slice(src);
    cipher.decrypt_block(&mut block);
    for (b, c) in block.iter_mut().zip(chain.iter()) {
        *b ^= c;
    }
    chain.copy_from_slice(src);
    dst[..AES_BLOCK_LEN].copy_from_slice(&block);
}

/// AES-256-CBC encryptor with PKCS#7 padding.
pub struct Aes256CbcEncryptor {
    cipher: Aes256,
    chain: [u8; AES_BLOCK_LEN],
    pending: Vec<u8>,
    finalized: bool,
}

impl Aes256CbcEncryptor {
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self, TransformError> {
        let (cipher, chain) = new_cipher(key, iv)?;
        Ok(Self {
            cipher,
            chain,
            pending: Vec::with_capacity(AES_BLOCK_LEN),
            finalized: false,
        })
    }

    /// Create an encryptor with a fresh random IV. The IV is returned so it
    /// can be transmitted alongside the ciphertext.
    pub fn with_random_iv(key: &[u8]) -> Result<(Self, [u8; IV_LEN_16]), TransformError> {
        let mut iv = [0u8; IV_LEN_16];
        rand::thread_rng().fill_bytes(&mut iv);
        Ok((Self::new(key, &iv)?, iv))
    }
}

impl BlockTransform for Aes256CbcEncryptor {
    fn block_size(&self) -> usize {
        AES_BLOCK_LEN
    }

    fn transform(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TransformError> {
        if self.finalized {
            return Err(TransformError::Finalized);
        }

        let total = self.pending.len() + input.len();
        let aligned = total / AES_BLOCK_LEN * AES_BLOCK_LEN;
        if aligned > output.len() {
            return Err(TransformError::OutputTooSmall { needed: aligned, available: output.len() });
        }

        let mut rest = input;
        let mut written = 0;

        if !self.pending.is_empty() {
            let need = AES_BLOCK_LEN - self.pending.len();
            if rest.len() < need {
                self.pending.extend_from_slice(rest);
                return Ok(0);
            }
            self.pending.extend_from_slice(&rest[..need]);
            rest = &rest[need..];
            encrypt_block(&self.cipher, &mut self.chain, &self.pending, &mut output[..AES_BLOCK_LEN]);
            self.pending.clear();
            written = AES_BLOCK_LEN;
        }

        let mut blocks = rest.chunks_exact(AES_BLOCK_LEN);
        for src in &mut blocks {
            encrypt_block(&self.cipher, &mut self.chain, src, &mut output[written..]);
            written += AES_BLOCK_LEN;
        }
        self.pending.extend_from_slice(blocks.remainder());

        debug_assert_eq!(written, aligned);
        Ok(written)
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<usize, TransformError> {
        if self.finalized {
            return Err(TransformError::Finalized);
        }
        self.finalized = true;

        if output.len() < AES_BLOCK_LEN {
            return Err(TransformError::OutputTooSmall { needed: AES_BLOCK_LEN, available: output.len() });
        }

        let pad = AES_BLOCK_LEN - self.pending.len();
        self.pending.resize(AES_BLOCK_LEN, pad as u8);
        encrypt_block(&self.cipher, &mut self.chain, &self.pending, output);
        self.pending.zeroize();
        Ok(AES_BLOCK_LEN)
    }
}

impl Drop for Aes256CbcEncryptor {
    fn drop(&mut self) {
        self.chain.zeroize();
        self.pending.zeroize();
    }
}

/// AES-256-CBC decryptor that strips and checks PKCS#7 padding.
pub struct Aes256CbcDecryptor {
    cipher: Aes256,
    chain: [u8; AES_BLOCK_LEN],
    pending: Vec<u8>,
    finalized: bool,
}

impl Aes256CbcDecryptor {
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self, TransformError> {
        let (cipher, chain) = new_cipher(key, iv)?;
        Ok(Self {
            cipher,
            chain,
            pending: Vec::with_capacity(2 * AES_BLOCK_LEN),
            finalized: false,
        })
    }
}

impl BlockTransform for Aes256CbcDecryptor {
    fn block_size(&self) -> usize {
        AES_BLOCK_LEN
    }

    fn transform(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TransformError> {
        if self.finalized {
            return Err(TransformError::Finalized);
        }

        let total = self.pending.len() + input.len();
        let hold = match total % AES_BLOCK_LEN {
            0 => total.min(AES_BLOCK_LEN),
            partial => partial,
        };
        let release = total - hold;
        if release > output.len() {
            return Err(TransformError::OutputTooSmall { needed: release, available: output.len() });
        }

        self.pending.extend_from_slice(input);
        for (i, src) in self.pending[..release].chunks_exact(AES_BLOCK_LEN).enumerate() {
            let at = i * AES_BLOCK_LEN;
            decrypt_block(&self.cipher, &mut self.chain, src, &mut output[at..]);
        }
        self.pending.drain(..release);
        Ok(release)
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<usize, TransformError> {
        if self.finalized {
            return Err(TransformError::Finalized);
        }
        self.finalized = true;

        if self.pending.len() != AES_BLOCK_LEN {
            return Err(TransformError::IncompleteBlock {
                pending: self.pending.len(),
                block_size: AES_BLOCK_LEN,
            });
        }

        let mut last = [0u8; AES_BLOCK_LEN];
        decrypt_block(&self.cipher, &mut self.chain, &self.pending, &mut last);
        self.pending.zeroize();

        let pad = last[AES_BLOCK_LEN - 1] as usize;
        if pad == 0 || pad > AES_BLOCK_LEN || last[AES_BLOCK_LEN - pad..].iter().any(|&b| b as usize != pad) {
            last.zeroize();
            return Err(TransformError::InvalidPadding);
        }

        let keep = AES_BLOCK_LEN - pad;
        if keep > output.len() {
            last.zeroize();
            return Err(TransformError::OutputTooSmall { needed: keep, available: output.len() });
        }
        output[..keep].copy_from_slice(&last[..keep]);
        last.zeroize();
        Ok(keep)
    }
}

impl Drop for Aes256CbcDecryptor {
    fn drop(&mut self) {
        self.chain.zeroize();
        self.pending.zeroize();
    }
}
