//! Collaborator contracts of the PDCP transmit entity.
//!
//! The entity talks to the rest of the stack exclusively through these
//! traits, bound once at construction: the upper control plane (RRC), the
//! lower data plane (RLC) and the receive-side status-report provider.
//! Everything runs on the bearer's own executor, so implementations need no
//! internal synchronisation; they must not call back into the entity
//! synchronously.

use std::fmt::Debug;

use bytes::Bytes;

use crate::types::Count;

/// A protected PDU on its way down to RLC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdcpTxPdu {
    /// Header, ciphertext and MAC-I, exactly as they go on the air.
    pub buf: Bytes,
    /// COUNT of the PDU. Set only for data PDUs on DRBs; control PDUs and
    /// SRB traffic carry no COUNT towards RLC.
    pub pdcp_count: Option<Count>,
}

/// Upward notifications towards the control plane.
pub trait UpperControlNotifier: Debug {
    /// The COUNT crossed the soft threshold; the RRC should refresh keys.
    fn on_max_count_reached(&mut self);

    /// The COUNT reached the hard threshold; the bearer is unusable until
    /// it is re-established with fresh keys.
    fn on_protocol_failure(&mut self);
}

/// Downward notifications towards RLC.
pub trait LowerTxNotifier: Debug {
    /// A new protected PDU is ready for transmission.
    fn on_new_pdu(&mut self, pdu: PdcpTxPdu);

    /// The PDU with this COUNT is no longer worth transmitting; RLC may
    /// drop any segments it has not yet sent.
    fn on_discard_pdu(&mut self, count: Count);
}

/// Access to the receive side's compiled status report.
pub trait StatusReportProvider: Debug {
    /// Compiles a status-report control PDU describing the RX state.
    fn compile_status_report(&mut self) -> Bytes;
}
