//! PDCP error types and utilities.
//!
//! Distinguishes bearer configuration errors, malformed control PDUs, and
//! security-transform failures. The `thiserror` crate is used for ergonomic
//! error definitions.

use thiserror::Error;

use crate::security::{CipheringAlgorithm, IntegrityAlgorithm};

/// Errors raised while validating a bearer configuration.
///
/// All of these are caught at entity construction; a running entity never
/// observes an invalid configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// SRBs are fixed to 12-bit sequence numbers by TS 38.331.
    #[error("SRBs carry 12-bit sequence numbers, got {got} bits")]
    SrbSnSize { got: u8 },

    /// The soft COUNT threshold must not exceed the hard one.
    #[error("max_count.notify {notify} exceeds max_count.hard {hard}")]
    MaxCountOrder { notify: u32, hard: u32 },

    /// The crypto BEARER input is `lcid - 1` and must fit in 5 bits.
    #[error("logical channel id {got} maps outside the 5-bit bearer id space")]
    LcidOutOfRange { got: u8 },

    /// The selected security algorithm has no backend in this crate.
    #[error("security error: {0}")]
    Security(#[from] SecurityError),
}

/// Errors raised by the security-transform dispatch.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityError {
    /// Integrity algorithm without an available backend.
    #[error("integrity algorithm {0} is not supported")]
    UnsupportedIntegrity(IntegrityAlgorithm),

    /// Ciphering algorithm without an available backend.
    #[error("ciphering algorithm {0} is not supported")]
    UnsupportedCiphering(CipheringAlgorithm),
}

/// Errors raised while parsing a status-report control PDU.
///
/// A malformed report is logged and dropped by the entity; it never mutates
/// transmit state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusReportError {
    /// Insufficient data to parse a complete field or structure.
    #[error("incomplete status report: needed {needed} bytes, got {got}")]
    NotEnoughData { needed: usize, got: usize },

    /// The D/C bit marks the PDU as a data PDU.
    #[error("not a control PDU: D/C bit is set")]
    NotAControlPdu,

    /// Control PDU type other than *status report*.
    #[error("unexpected control PDU type: expected status report (0), got {got}")]
    UnexpectedCpt { got: u8 },

    /// The four reserved bits of the type octet must be zero.
    #[error("reserved bits set in type octet {got:#010b}")]
    ReservedBitsSet { got: u8 },
}

/// Errors raised while parsing a data-PDU header.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// Insufficient data for the configured header length.
    #[error("incomplete data PDU header: needed {needed} bytes, got {got}")]
    NotEnoughData { needed: usize, got: usize },

    /// Reserved header bits must be zero.
    #[error("reserved bits set in first header octet {got:#010b}")]
    ReservedBitsSet { got: u8 },
}
