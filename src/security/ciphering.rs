//! Ciphering: nea0..nea3 encryption (TS 33.501, Annex D.2).
//!
//! All NEA algorithms are keystream XORs, so encryption and decryption are
//! the same operation. nea0 passes plaintext through unchanged; nea3 has no
//! backend in this crate and is refused at configuration time.

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;

use super::snow3g;
use super::{CipheringAlgorithm, SecKey};
use crate::config::Direction;
use crate::error::SecurityError;
use crate::types::{BearerId, Count};

type Aes128Ctr = Ctr128BE<Aes128>;

/// Encrypts `msg` under the selected algorithm.
pub fn encrypt(
    algo: CipheringAlgorithm,
    key: &SecKey,
    count: Count,
    bearer: BearerId,
    direction: Direction,
    msg: &[u8],
) -> Result<Vec<u8>, SecurityError> {
    match algo {
        CipheringAlgorithm::Nea0 => Ok(msg.to_vec()),
        CipheringAlgorithm::Nea1 => Ok(nea1(key, count, bearer, direction, msg)),
        CipheringAlgorithm::Nea2 => Ok(nea2(key, count, bearer, direction, msg)),
        CipheringAlgorithm::Nea3 => Err(SecurityError::UnsupportedCiphering(algo)),
    }
}

/// 128-NEA1: SNOW 3G f8 with IV = (BEARER||DIRECTION, COUNT) repeated
/// (TS 35.215 mapping).
fn nea1(key: &SecKey, count: Count, bearer: BearerId, direction: Direction, msg: &[u8]) -> Vec<u8> {
    let count = count.value();
    let bearer_dir = ((bearer.value() as u32) << 27) | ((direction.bit() as u32) << 26);
    let iv = [bearer_dir, count, bearer_dir, count];
    snow3g::f8(key.as_bytes(), iv, msg)
}

/// 128-NEA2: AES-128 in counter mode. The initial counter block is
/// COUNT || BEARER || DIRECTION || zero padding.
fn nea2(key: &SecKey, count: Count, bearer: BearerId, direction: Direction, msg: &[u8]) -> Vec<u8> {
    let mut iv = [0u8; 16];
    iv[..4].copy_from_slice(&count.to_be_bytes());
    iv[4] = (bearer.value() << 3) | (direction.bit() << 2);

    let mut out = msg.to_vec();
    let mut cipher = Aes128Ctr::new(key.as_bytes().into(), &iv.into());
    cipher.apply_keystream(&mut out);
    out
}
