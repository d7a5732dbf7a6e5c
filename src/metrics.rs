//! Transmit-side metrics counters.

/// Counters kept by one transmit entity. Snapshots are `Copy`; the live
/// counters are owned by the entity and survive until bearer teardown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TxMetrics {
    /// SDUs accepted from the upper layer, including ones later refused.
    pub num_sdus: u64,
    /// Bytes accepted from the upper layer.
    pub num_sdu_bytes: u64,
    /// PDUs handed to the lower layer, data and control alike.
    pub num_pdus: u64,
    /// Bytes handed to the lower layer.
    pub num_pdu_bytes: u64,
    /// Discard timers that fired before the PDU was acknowledged.
    pub num_discard_timeouts: u64,
}

impl TxMetrics {
    pub(crate) fn add_sdus(&mut self, num: u64, bytes: usize) {
        self.num_sdus += num;
        self.num_sdu_bytes += bytes as u64;
    }

    pub(crate) fn add_pdus(&mut self, num: u64, bytes: usize) {
        self.num_pdus += num;
        self.num_pdu_bytes += bytes as u64;
    }

    pub(crate) fn add_discard_timeouts(&mut self, num: u64) {
        self.num_discard_timeouts += num;
    }

    /// Zeroes all counters, e.g. after a reporting interval.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
