//! AES-256-CBC encryption of barcode payloads.
//!
//! Wire format: `percent-encode(base64(iv || ciphertext))` with a fresh
//! 16-byte IV per call and PKCS#7 padding.

use aes::Aes256;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use rand::rngs::OsRng;
use std::fmt;
use tracing::debug;

use super::payload::Hub3Payload;
use crate::core::EracunError;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// CBC initialization vector length (one AES block).
pub const IV_LEN: usize = 16;

const BLOCK_LEN: usize = 16;

/// A validated 32-byte AES-256 key.
///
/// The only constructor checks the length, so holding an `EncryptionKey`
/// means the cipher can be keyed. `Debug` never prints the key bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey([u8; KEY_LEN]);

impl EncryptionKey {
    pub fn new(bytes: &[u8]) -> Result<Self, EracunError> {
        let key: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            EracunError::Config(format!(
                "encryption key must be exactly {KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(key))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey(<redacted>)")
    }
}

/// Serialize and encrypt a payload for the `data` query parameter.
pub fn encrypt_payload(payload: &Hub3Payload, key: &EncryptionKey) -> Result<String, EracunError> {
    let json = payload.to_json()?;
    encrypt_bytes(json.as_bytes(), key)
}

/// Encrypt arbitrary bytes under a fresh random IV.
pub fn encrypt_bytes(plaintext: &[u8], key: &EncryptionKey) -> Result<String, EracunError> {
    let mut iv = [0u8; IV_LEN];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|e| EracunError::IvGeneration(e.to_string()))?;
    encrypt_with_iv(plaintext, key, &iv)
}

fn encrypt_with_iv(plaintext: &[u8], key: &EncryptionKey, iv: &[u8]) -> Result<String, EracunError> {
    let cipher =
        Aes256CbcEnc::new_from_slices(key.as_bytes(), iv).map_err(|_| EracunError::CipherLength)?;

    let len = plaintext.len();
    let padded_len = (len / BLOCK_LEN + 1) * BLOCK_LEN;
    let mut buf = vec![0u8; IV_LEN + padded_len];
    buf[..IV_LEN].copy_from_slice(iv);
    buf[IV_LEN..IV_LEN + len].copy_from_slice(plaintext);

    let ciphertext_len = cipher
        .encrypt_padded_mut::<Pkcs7>(&mut buf[IV_LEN..], len)
        .map_err(|_| EracunError::Encryption)?
        .len();
    buf.truncate(IV_LEN + ciphertext_len);

    debug!(bytes = buf.len(), "payload encrypted");
    Ok(urlencoding::encode(&STANDARD.encode(&buf)).into_owned())
}

/// Reverse [`encrypt_payload`]: percent-decode, base64-decode, split off the
/// IV and decrypt. Returns the plaintext JSON.
pub fn decrypt_payload(encoded: &str, key: &EncryptionKey) -> Result<String, EracunError> {
    let b64 = urlencoding::decode(encoded).map_err(|e| EracunError::Decryption(e.to_string()))?;
    let mut raw = STANDARD
        .decode(b64.as_bytes())
        .map_err(|e| EracunError::Decryption(e.to_string()))?;

    if raw.len() < IV_LEN + BLOCK_LEN || (raw.len() - IV_LEN) % BLOCK_LEN != 0 {
        return Err(EracunError::Decryption(format!(
            "payload of {} bytes is not an IV followed by whole cipher blocks",
            raw.len()
        )));
    }

    let (iv, ciphertext) = raw.split_at_mut(IV_LEN);
    let cipher =
        Aes256CbcDec::new_from_slices(key.as_bytes(), iv).map_err(|_| EracunError::CipherLength)?;
    let plaintext = cipher
        .decrypt_padded_mut::<Pkcs7>(ciphertext)
        .map_err(|_| EracunError::Decryption("bad padding or wrong key".into()))?;

    String::from_utf8(plaintext.to_vec()).map_err(|e| EracunError::Decryption(e.to_string()))
}
