//! Integrity protection: MAC-I generation for nia0..nia3 (TS 33.501,
//! Annex D.3).
//!
//! Every algorithm is a pure function of
//! `(key, count, bearer, direction, message)`. nia0 is the explicit
//! all-zero transform; nia3 has no backend in this crate and is refused at
//! configuration time, so a running entity never reaches its arm here.

use aes::Aes128;
use cmac::{Cmac, Mac};

use super::snow3g;
use super::{IntegrityAlgorithm, MacI, SecKey};
use crate::config::Direction;
use crate::error::SecurityError;
use crate::types::{BearerId, Count};

/// Computes the MAC-I of `msg` under the selected algorithm.
pub fn generate_mac(
    algo: IntegrityAlgorithm,
    key: &SecKey,
    count: Count,
    bearer: BearerId,
    direction: Direction,
    msg: &[u8],
) -> Result<MacI, SecurityError> {
    match algo {
        IntegrityAlgorithm::Nia0 => Ok([0; 4]),
        IntegrityAlgorithm::Nia1 => Ok(nia1(key, count, bearer, direction, msg)),
        IntegrityAlgorithm::Nia2 => Ok(nia2(key, count, bearer, direction, msg)),
        IntegrityAlgorithm::Nia3 => Err(SecurityError::UnsupportedIntegrity(algo)),
    }
}

/// 128-NIA1: SNOW 3G f9 with FRESH = BEARER << 27 and the direction bit
/// folded into IV1 and IV0 (TS 35.215 mapping).
fn nia1(key: &SecKey, count: Count, bearer: BearerId, direction: Direction, msg: &[u8]) -> MacI {
    let count = count.value();
    let fresh = (bearer.value() as u32) << 27;
    let dir = direction.bit() as u32;
    let iv = [
        fresh ^ (dir << 15),
        count ^ (dir << 31),
        fresh,
        count,
    ];
    snow3g::f9(key.as_bytes(), iv, msg, (msg.len() as u64) * 8)
}

/// 128-NIA2: AES-128-CMAC over COUNT || BEARER || DIRECTION || padding ||
/// message, truncated to the 32 most significant bits.
fn nia2(key: &SecKey, count: Count, bearer: BearerId, direction: Direction, msg: &[u8]) -> MacI {
    let mut input = Vec::with_capacity(8 + msg.len());
    input.extend_from_slice(&count.to_be_bytes());
    input.push((bearer.value() << 3) | (direction.bit() << 2));
    input.extend_from_slice(&[0u8; 3]);
    input.extend_from_slice(msg);

    let mut mac = Cmac::<Aes128>::new(key.as_bytes().into());
    mac.update(&input);
    let tag = mac.finalize().into_bytes();
    [tag[0], tag[1], tag[2], tag[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: SecKey = SecKey::new([0x2B; 16]);

    fn mac(algo: IntegrityAlgorithm, count: u32, msg: &[u8]) -> MacI {
        generate_mac(
            algo,
            &KEY,
            Count::new(count),
            BearerId::new(3),
            Direction::Downlink,
            msg,
        )
        .unwrap()
    }

    #[test]
    fn nia0_yields_all_zero_mac() {
        assert_eq!(mac(IntegrityAlgorithm::Nia0, 42, b"anything"), [0; 4]);
    }

    #[test]
    fn nia3_is_refused() {
        let result = generate_mac(
            IntegrityAlgorithm::Nia3,
            &KEY,
            Count::new(0),
            BearerId::new(0),
            Direction::Uplink,
            b"",
        );
        assert_eq!(
            result,
            Err(SecurityError::UnsupportedIntegrity(IntegrityAlgorithm::Nia3))
        );
    }

    #[test]
    fn macs_are_count_sensitive() {
        for algo in [IntegrityAlgorithm::Nia1, IntegrityAlgorithm::Nia2] {
            let tag_a = mac(algo, 1, b"payload");
            let tag_b = mac(algo, 2, b"payload");
            assert_ne!(tag_a, tag_b, "{algo} must mix COUNT into the MAC");
        }
    }

    #[test]
    fn macs_are_message_sensitive() {
        for algo in [IntegrityAlgorithm::Nia1, IntegrityAlgorithm::Nia2] {
            let tag_a = mac(algo, 7, b"payload");
            let tag_b = mac(algo, 7, b"payloae");
            assert_ne!(tag_a, tag_b);
        }
    }

    #[test]
    fn cmac_backend_matches_rfc4493_vectors() {
        // RFC 4493, examples 1 and 2, pinning the AES-CMAC backend itself.
        let key: [u8; 16] = [
            0x2B, 0x7E, 0x15, 0x16, 0x28, 0xAE, 0xD2, 0xA6, 0xAB, 0xF7, 0x15, 0x88, 0x09, 0xCF,
            0x4F, 0x3C,
        ];
        let mut mac = Cmac::<Aes128>::new((&key).into());
        mac.update(b"");
        let tag = mac.finalize().into_bytes();
        assert_eq!(tag[..4], [0xBB, 0x1D, 0x69, 0x29]);

        let msg: [u8; 16] = [
            0x6B, 0xC1, 0xBE, 0xE2, 0x2E, 0x40, 0x9F, 0x96, 0xE9, 0x3D, 0x7E, 0x11, 0x73, 0x93,
            0x17, 0x2A,
        ];
        let mut mac = Cmac::<Aes128>::new((&key).into());
        mac.update(&msg);
        let tag = mac.finalize().into_bytes();
        assert_eq!(tag[..4], [0x07, 0x0A, 0x16, 0xB4]);
    }
}
