//! PDCP PDU serialization (TS 38.323, Section 6.2).
//!
//! Split by PDU family: [`data_pdu`] carries the 12/18-bit data-PDU header
//! codec, [`control_pdu`] the status-report control PDU. Parsers are strict:
//! reserved bits must be zero and short buffers are reported with the exact
//! byte counts involved.

pub mod control_pdu;
pub mod data_pdu;
