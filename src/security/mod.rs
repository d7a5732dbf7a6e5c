//! AS security configuration and the NIA/NEA transform dispatch.
//!
//! PDCP protects every data PDU under a per-bearer security configuration
//! (TS 33.501): one of four integrity algorithms and one of four ciphering
//! algorithms, each keyed from the RRC key pair for SRBs or the user-plane
//! key pair for DRBs. Index 0 of either family is an explicit identity
//! transform, not an absent one.
//!
//! Key material arrives fully derived; this module never performs key
//! derivation. Keys are wiped from memory when dropped.

pub mod ciphering;
pub mod integrity;
pub mod snow3g;

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::BearerKind;
use crate::constants::{PDCP_MAC_I_LEN, SEC_KEY_LEN};
use crate::error::SecurityError;

/// 4-byte message authentication code appended to integrity-protected PDUs.
pub type MacI = [u8; PDCP_MAC_I_LEN];

/// A 128-bit AS security key, zeroed on drop. The `Debug` representation
/// redacts the key material, and keys deliberately carry no equality.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecKey([u8; SEC_KEY_LEN]);

impl SecKey {
    pub const fn new(raw: [u8; SEC_KEY_LEN]) -> Self {
        Self(raw)
    }

    pub fn as_bytes(&self) -> &[u8; SEC_KEY_LEN] {
        &self.0
    }
}

impl From<[u8; SEC_KEY_LEN]> for SecKey {
    fn from(raw: [u8; SEC_KEY_LEN]) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for SecKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecKey(<redacted>)")
    }
}

/// 5G integrity algorithm identifiers (TS 33.501, Annex D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrityAlgorithm {
    /// Null integrity: all-zero MAC-I.
    Nia0,
    /// 128-NIA1, SNOW 3G based.
    Nia1,
    /// 128-NIA2, AES-128-CMAC based.
    Nia2,
    /// 128-NIA3, ZUC based.
    Nia3,
}

impl fmt::Display for IntegrityAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Nia0 => "nia0",
            Self::Nia1 => "nia1",
            Self::Nia2 => "nia2",
            Self::Nia3 => "nia3",
        };
        f.write_str(s)
    }
}

/// 5G ciphering algorithm identifiers (TS 33.501, Annex D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CipheringAlgorithm {
    /// Null ciphering: plaintext passes through.
    Nea0,
    /// 128-NEA1, SNOW 3G based.
    Nea1,
    /// 128-NEA2, AES-128-CTR based.
    Nea2,
    /// 128-NEA3, ZUC based.
    Nea3,
}

impl fmt::Display for CipheringAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Nea0 => "nea0",
            Self::Nea1 => "nea1",
            Self::Nea2 => "nea2",
            Self::Nea3 => "nea3",
        };
        f.write_str(s)
    }
}

/// Security configuration of one bearer: algorithm selection, the four
/// derived 128-bit keys, and the per-transform enable gates.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub integ_algo: IntegrityAlgorithm,
    pub cipher_algo: CipheringAlgorithm,
    pub k_rrc_int: SecKey,
    pub k_rrc_enc: SecKey,
    pub k_up_int: SecKey,
    pub k_up_enc: SecKey,
    /// Gates MAC-I generation; `false` means no MAC-I at all, which is
    /// distinct from nia0's all-zero MAC-I.
    pub integrity_enabled: bool,
    /// Gates the ciphering transform.
    pub ciphering_enabled: bool,
}

impl SecurityConfig {
    /// Rejects algorithm selections this crate has no backend for.
    ///
    /// A disabled transform may keep any algorithm configured, since it
    /// will never run.
    pub fn validate(&self) -> Result<(), SecurityError> {
        if self.integrity_enabled && self.integ_algo == IntegrityAlgorithm::Nia3 {
            return Err(SecurityError::UnsupportedIntegrity(self.integ_algo));
        }
        if self.ciphering_enabled && self.cipher_algo == CipheringAlgorithm::Nea3 {
            return Err(SecurityError::UnsupportedCiphering(self.cipher_algo));
        }
        Ok(())
    }

    /// Integrity key for the bearer's key domain: SRBs sign with the RRC
    /// key, DRBs with the user-plane key.
    pub fn integrity_key(&self, kind: BearerKind) -> &SecKey {
        match kind {
            BearerKind::Srb => &self.k_rrc_int,
            BearerKind::Drb => &self.k_up_int,
        }
    }

    /// Ciphering key for the bearer's key domain.
    pub fn ciphering_key(&self, kind: BearerKind) -> &SecKey {
        match kind {
            BearerKind::Srb => &self.k_rrc_enc,
            BearerKind::Drb => &self.k_up_enc,
        }
    }
}
