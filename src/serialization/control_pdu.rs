//! PDCP control-PDU codec: status reports.
//!
//! Wire layout (TS 38.323, Section 6.2.3.1):
//! `[0|CPT=000|0000][FMC: 32 bits][bitmap: 0..N bytes]`. Bit *i* of the
//! bitmap, counted from the most significant bit of the first bitmap byte,
//! refers to COUNT (FMC + 1 + i) mod 2^32; a set bit means that SDU was
//! received.

use bytes::{BufMut, Bytes, BytesMut};

use crate::constants::{PDCP_CPT_STATUS_REPORT, PDCP_DC_BIT, PDCP_STATUS_REPORT_MIN_LEN};
use crate::error::StatusReportError;
use crate::types::Count;

/// Decoded form of a status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// First missing COUNT on the receive side.
    pub fmc: Count,
    /// Raw acknowledgement bitmap, possibly empty.
    pub bitmap: Bytes,
}

impl StatusReport {
    /// Iterates the bitmap bits most-significant first. The *n*-th yielded
    /// bit refers to COUNT `fmc + 1 + n`.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bitmap
            .iter()
            .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
    }
}

/// Parses a status-report control PDU.
///
/// # Errors
/// - [`StatusReportError::NotEnoughData`] - shorter than type octet + FMC
/// - [`StatusReportError::NotAControlPdu`] - D/C bit set
/// - [`StatusReportError::UnexpectedCpt`] - control PDU of another type
/// - [`StatusReportError::ReservedBitsSet`] - non-zero reserved nibble
pub fn parse_status_report(data: &[u8]) -> Result<StatusReport, StatusReportError> {
    if data.len() < PDCP_STATUS_REPORT_MIN_LEN {
        return Err(StatusReportError::NotEnoughData {
            needed: PDCP_STATUS_REPORT_MIN_LEN,
            got: data.len(),
        });
    }

    let first = data[0];
    if first & PDCP_DC_BIT != 0 {
        return Err(StatusReportError::NotAControlPdu);
    }
    let cpt = (first >> 4) & 0x07;
    if cpt != PDCP_CPT_STATUS_REPORT {
        return Err(StatusReportError::UnexpectedCpt { got: cpt });
    }
    if first & 0x0F != 0 {
        return Err(StatusReportError::ReservedBitsSet { got: first });
    }

    let fmc = u32::from_be_bytes([data[1], data[2], data[3], data[4]]);
    Ok(StatusReport {
        fmc: Count::new(fmc),
        bitmap: Bytes::copy_from_slice(&data[PDCP_STATUS_REPORT_MIN_LEN..]),
    })
}

/// Builds a status-report control PDU from an FMC and a raw bitmap.
pub fn build_status_report(fmc: Count, bitmap: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(PDCP_STATUS_REPORT_MIN_LEN + bitmap.len());
    buf.put_u8(0x00);
    buf.put_slice(&fmc.to_be_bytes());
    buf.put_slice(bitmap);
    buf.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fmc_and_bitmap() {
        let report =
            parse_status_report(&[0x00, 0x00, 0x00, 0x00, 0x05, 0b1010_0000]).unwrap();
        assert_eq!(report.fmc, Count::new(5));
        let bits: Vec<bool> = report.bits().collect();
        assert_eq!(bits.len(), 8);
        assert!(bits[0]);
        assert!(!bits[1]);
        assert!(bits[2]);
        assert!(bits[3..].iter().all(|&bit| !bit));
    }

    #[test]
    fn empty_bitmap_is_valid() {
        let report = parse_status_report(&[0x00, 0x12, 0x34, 0x56, 0x78]).unwrap();
        assert_eq!(report.fmc, Count::new(0x1234_5678));
        assert_eq!(report.bits().count(), 0);
    }

    #[test]
    fn truncated_report_rejected() {
        assert_eq!(
            parse_status_report(&[0x00, 0x00, 0x00]),
            Err(StatusReportError::NotEnoughData { needed: 5, got: 3 })
        );
    }

    #[test]
    fn data_pdu_rejected() {
        assert_eq!(
            parse_status_report(&[0x80, 0x00, 0x00, 0x00, 0x00]),
            Err(StatusReportError::NotAControlPdu)
        );
    }

    #[test]
    fn wrong_cpt_rejected() {
        // CPT 0b001 is an interspersed ROHC feedback PDU, not a status report.
        assert_eq!(
            parse_status_report(&[0x10, 0x00, 0x00, 0x00, 0x00]),
            Err(StatusReportError::UnexpectedCpt { got: 1 })
        );
    }

    #[test]
    fn reserved_bits_rejected() {
        assert_eq!(
            parse_status_report(&[0x03, 0x00, 0x00, 0x00, 0x00]),
            Err(StatusReportError::ReservedBitsSet { got: 0x03 })
        );
    }

    #[test]
    fn builder_output_parses_back() {
        let pdu = build_status_report(Count::new(0xDEAD_BEEF), &[0xFF, 0x01]);
        let report = parse_status_report(&pdu).unwrap();
        assert_eq!(report.fmc, Count::new(0xDEAD_BEEF));
        assert_eq!(&report.bitmap[..], &[0xFF, 0x01]);
    }
}
