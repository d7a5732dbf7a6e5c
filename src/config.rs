//! PDCP bearer configuration.
//!
//! Everything in here is fixed at entity construction and never changes for
//! the lifetime of the bearer. [`PdcpTxConfig::validate`] rejects the
//! configurations TS 38.331 forbids; a constructed entity can rely on a
//! well-formed configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_BEARER_ID;
use crate::error::ConfigError;
use crate::types::{BearerId, Count};

/// Radio-bearer kind. Drives the security key domain, the D/C header bit
/// and whether a MAC-I is always carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BearerKind {
    /// Signalling radio bearer (RRC traffic).
    Srb,
    /// Data radio bearer (user-plane traffic).
    Drb,
}

/// RLC mode below this entity. Only AM DRBs cache protected PDUs for the
/// data-recovery procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RlcMode {
    /// Unacknowledged mode.
    Um,
    /// Acknowledged mode.
    Am,
}

/// Transmission direction, mixed into the security-algorithm inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Uplink,
    Downlink,
}

impl Direction {
    /// The DIRECTION bit fed to the NIA/NEA algorithms (TS 33.501).
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Direction::Uplink => 0,
            Direction::Downlink => 1,
        }
    }
}

/// Configured sequence-number length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnSize {
    /// 12-bit sequence numbers, 2-byte data-PDU header.
    Size12,
    /// 18-bit sequence numbers, 3-byte data-PDU header.
    Size18,
}

impl SnSize {
    /// Sequence-number width in bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        match self {
            SnSize::Size12 => 12,
            SnSize::Size18 => 18,
        }
    }

    /// Mask selecting the SN part of a COUNT.
    #[inline]
    pub const fn sn_mask(self) -> u32 {
        (1 << self.bits()) - 1
    }

    /// Data-PDU header length in bytes for this SN size.
    #[inline]
    pub const fn header_len(self) -> usize {
        match self {
            SnSize::Size12 => crate::constants::PDCP_HDR_LEN_SN12,
            SnSize::Size18 => crate::constants::PDCP_HDR_LEN_SN18,
        }
    }
}

/// COUNT thresholds guarding key reuse (TS 38.331, Section 5.3.1.2).
///
/// Crossing `notify` once asks the RRC for a key refresh; reaching `hard`
/// once latches the entity into refusing all further transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxCount {
    pub notify: Count,
    pub hard: Count,
}

impl Default for MaxCount {
    fn default() -> Self {
        // Leave the RRC a quarter of the COUNT space to negotiate new keys.
        Self {
            notify: Count::new(0xC000_0000),
            hard: Count::MAX,
        }
    }
}

/// Per-PDU discard timer (TS 38.331 `discardTimer` value set).
///
/// `NotConfigured` and `Infinity` both disable discard tracking entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscardTimer {
    NotConfigured,
    Ms10,
    Ms20,
    Ms30,
    Ms40,
    Ms50,
    Ms60,
    Ms75,
    Ms100,
    Ms150,
    Ms200,
    Ms250,
    Ms300,
    Ms500,
    Ms750,
    Ms1500,
    Infinity,
}

impl DiscardTimer {
    /// Timer duration, or `None` when discard tracking is disabled.
    pub const fn duration(self) -> Option<Duration> {
        let ms = match self {
            DiscardTimer::NotConfigured | DiscardTimer::Infinity => return None,
            DiscardTimer::Ms10 => 10,
            DiscardTimer::Ms20 => 20,
            DiscardTimer::Ms30 => 30,
            DiscardTimer::Ms40 => 40,
            DiscardTimer::Ms50 => 50,
            DiscardTimer::Ms60 => 60,
            DiscardTimer::Ms75 => 75,
            DiscardTimer::Ms100 => 100,
            DiscardTimer::Ms150 => 150,
            DiscardTimer::Ms200 => 200,
            DiscardTimer::Ms250 => 250,
            DiscardTimer::Ms300 => 300,
            DiscardTimer::Ms500 => 500,
            DiscardTimer::Ms750 => 750,
            DiscardTimer::Ms1500 => 1500,
        };
        Some(Duration::from_millis(ms))
    }
}

/// Static configuration of one PDCP transmit entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdcpTxConfig {
    pub bearer_kind: BearerKind,
    pub sn_size: SnSize,
    pub rlc_mode: RlcMode,
    pub direction: Direction,
    /// Logical channel id of the bearer; the crypto BEARER input is `lcid - 1`.
    pub lcid: u8,
    pub discard_timer: DiscardTimer,
    /// Enables status-report emission during data recovery.
    pub status_report_required: bool,
    pub max_count: MaxCount,
}

impl PdcpTxConfig {
    /// Checks the invariants TS 38.331 places on a bearer configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bearer_kind == BearerKind::Srb && self.sn_size == SnSize::Size18 {
            return Err(ConfigError::SrbSnSize {
                got: self.sn_size.bits(),
            });
        }
        if self.max_count.notify > self.max_count.hard {
            return Err(ConfigError::MaxCountOrder {
                notify: self.max_count.notify.value(),
                hard: self.max_count.hard.value(),
            });
        }
        if self.lcid == 0 || self.lcid - 1 > MAX_BEARER_ID {
            return Err(ConfigError::LcidOutOfRange { got: self.lcid });
        }
        Ok(())
    }

    /// Zero-based bearer identity fed to the security algorithms.
    #[inline]
    pub fn bearer_id(&self) -> BearerId {
        BearerId::new(self.lcid - 1)
    }

    #[inline]
    pub fn is_srb(&self) -> bool {
        self.bearer_kind == BearerKind::Srb
    }

    #[inline]
    pub fn is_drb(&self) -> bool {
        self.bearer_kind == BearerKind::Drb
    }
}
