//! PDCP wire-format constants and bitmasks.
//!
//! Defines constants for the PDCP data and control PDU layouts of
//! 3GPP TS 38.323, Section 6.2. Values that depend on the configured
//! sequence-number length live on [`SnSize`](crate::config::SnSize).

// --- Data PDU (TS 38.323, Section 6.2.2) ---

/// D/C flag in the first header octet: `1` marks a data PDU on a DRB.
/// SRB data PDUs and control PDUs keep the bit clear.
pub const PDCP_DC_BIT: u8 = 0x80;

/// Header length for 12-bit sequence numbers.
pub const PDCP_HDR_LEN_SN12: usize = 2;
/// Header length for 18-bit sequence numbers.
pub const PDCP_HDR_LEN_SN18: usize = 3;

/// Reserved bits of the first header octet with 12-bit sequence numbers.
pub const PDCP_HDR_SN12_RESERVED_MASK: u8 = 0x70;
/// Reserved bits of the first header octet with 18-bit sequence numbers.
pub const PDCP_HDR_SN18_RESERVED_MASK: u8 = 0x7C;

/// Length of the MAC-I integrity tag appended to protected PDUs.
pub const PDCP_MAC_I_LEN: usize = 4;

// --- Control PDU (TS 38.323, Section 6.2.3) ---

/// Control PDU type (CPT) value of a status report.
pub const PDCP_CPT_STATUS_REPORT: u8 = 0x00;

/// Smallest valid status report: one type octet plus the 32-bit FMC.
pub const PDCP_STATUS_REPORT_MIN_LEN: usize = 5;

// --- Security (TS 33.501) ---

/// Length of a 128-bit AS security key.
pub const SEC_KEY_LEN: usize = 16;

/// Highest BEARER input accepted by the NIA/NEA algorithms (5 bits).
pub const MAX_BEARER_ID: u8 = 31;
