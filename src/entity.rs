//! The PDCP transmit entity.
//!
//! One [`PdcpTxEntity`] exists per radio bearer per user. It accepts SDUs
//! from the upper layer (TS 38.323, Section 5.2.1), protects them under the
//! bearer's security configuration, hands the resulting PDUs to RLC, and
//! tracks every in-flight PDU in a discard-timer map that is pruned by
//! timer expiry, peer status reports, or bearer teardown.
//!
//! All entrypoints, including [`run_expired_timers`](PdcpTxEntity::run_expired_timers),
//! must run on the bearer's own single-threaded executor. The entity
//! keeps no locks; the COUNT sequence it hands downward is strictly
//! increasing and gap-free for the lifetime of the bearer.

use std::collections::BTreeMap;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::{debug, error, info, warn};

use crate::config::{PdcpTxConfig, RlcMode};
use crate::constants::PDCP_MAC_I_LEN;
use crate::error::{ConfigError, SecurityError};
use crate::metrics::TxMetrics;
use crate::security::{ciphering, integrity, SecurityConfig};
use crate::serialization::{control_pdu, data_pdu};
use crate::timers::{TimerService, UniqueTimer};
use crate::traits::{LowerTxNotifier, PdcpTxPdu, StatusReportProvider, UpperControlNotifier};
use crate::types::Count;

/// Transmit-side protocol state (TS 38.323, Section 7.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PdcpTxState {
    /// COUNT of the next SDU to transmit.
    pub tx_next: Count,
}

#[derive(Debug)]
struct DiscardEntry {
    /// Protected PDU bytes, cached only on AM DRBs for data recovery.
    pdu: Option<Bytes>,
    /// Live discard timer; dropping the entry cancels it.
    timer: UniqueTimer,
}

/// A PDCP transmit entity bound to its collaborators.
///
/// Construction validates the bearer and security configuration; a
/// constructed entity never observes an invalid configuration. The entity
/// is torn down by dropping it, which cancels all timers and empties the
/// discard map.
#[derive(Debug)]
pub struct PdcpTxEntity {
    cfg: PdcpTxConfig,
    sec_cfg: SecurityConfig,
    st: PdcpTxState,
    /// Latched once the soft COUNT threshold notification went out.
    max_count_notified: bool,
    /// Latched once the hard COUNT threshold stopped the entity for good.
    max_count_overflow: bool,
    discard_map: BTreeMap<Count, DiscardEntry>,
    timers: TimerService,
    upper_cn: Box<dyn UpperControlNotifier>,
    lower_dn: Box<dyn LowerTxNotifier>,
    status_provider: Box<dyn StatusReportProvider>,
    metrics: TxMetrics,
}

impl PdcpTxEntity {
    /// Builds an entity from a validated configuration and its collaborators.
    ///
    /// # Errors
    /// - [`ConfigError`] - forbidden bearer configuration (SRB with 18-bit
    ///   SN, inverted COUNT thresholds, out-of-range lcid) or a security
    ///   algorithm without a backend
    pub fn new(
        cfg: PdcpTxConfig,
        sec_cfg: SecurityConfig,
        upper_cn: Box<dyn UpperControlNotifier>,
        lower_dn: Box<dyn LowerTxNotifier>,
        status_provider: Box<dyn StatusReportProvider>,
        timers: TimerService,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;
        sec_cfg.validate()?;
        Ok(Self {
            cfg,
            sec_cfg,
            st: PdcpTxState::default(),
            max_count_notified: false,
            max_count_overflow: false,
            discard_map: BTreeMap::new(),
            timers,
            upper_cn,
            lower_dn,
            status_provider,
            metrics: TxMetrics::default(),
        })
    }

    /// Receives an SDU from the upper layers, applies integrity protection
    /// and ciphering, and passes the resulting PDU to the lower layers
    /// (TS 38.323, Section 5.2.1).
    pub fn handle_sdu(&mut self, sdu: Bytes) {
        self.metrics.add_sdus(1, sdu.len());

        // The same COUNT must never be reused under one key (TS 38.331,
        // Section 5.3.1.2). Crossing `notify` asks the RRC once for fresh
        // keys; reaching `hard` refuses all further transmission.
        if self.st.tx_next >= self.cfg.max_count.hard {
            if !self.max_count_overflow {
                error!(
                    count = %self.st.tx_next,
                    "reached maximum COUNT, refusing to transmit further"
                );
                self.upper_cn.on_protocol_failure();
                self.max_count_overflow = true;
            }
            return;
        }
        if self.st.tx_next >= self.cfg.max_count.notify && !self.max_count_notified {
            warn!(
                count = %self.st.tx_next,
                "approaching COUNT wrap-around, notifying RRC"
            );
            self.upper_cn.on_max_count_reached();
            self.max_count_notified = true;
        }

        let count = self.st.tx_next;

        let mut header = BytesMut::with_capacity(self.cfg.sn_size.header_len());
        data_pdu::write_data_pdu_header(
            &mut header,
            self.cfg.bearer_kind,
            self.cfg.sn_size,
            count.sn(self.cfg.sn_size),
        );

        let protected = match self.apply_ciphering_and_integrity(&header, &sdu, count) {
            Ok(pdu) => pdu,
            Err(e) => {
                error!(count = %count, error = %e, "dropping SDU, security transform failed");
                return;
            }
        };

        // Arm the discard timer. On AM DRBs the protected PDU is cached so
        // the data-recovery procedure can retransmit it later.
        if let Some(timeout) = self.cfg.discard_timer.duration() {
            let mut timer = self.timers.create_timer();
            timer.set(timeout, count);
            timer.run();
            let cached = (self.cfg.is_drb() && self.cfg.rlc_mode == RlcMode::Am)
                .then(|| protected.clone());
            let previous = self.discard_map.insert(count, DiscardEntry { pdu: cached, timer });
            debug_assert!(previous.is_none(), "COUNT reused in discard map");
            debug!(
                count = %count,
                timeout_ms = timeout.as_millis() as u64,
                "discard timer started"
            );
        }

        self.write_data_pdu_to_lower_layers(count, protected);
        self.st.tx_next += 1;
    }

    /// Handles a status report from the peer receiving entity (TS 38.323,
    /// Section 5.4.2): every SDU the report acknowledges is dropped from
    /// the discard map and announced to RLC.
    ///
    /// Malformed reports are logged and ignored; they never mutate state.
    pub fn handle_status_report(&mut self, status: Bytes) {
        let report = match control_pdu::parse_status_report(&status) {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "ignoring status report");
                return;
            }
        };
        info!(fmc = %report.fmc, "received PDCP status report");

        // Everything below the first missing COUNT was delivered in order.
        while let Some((&count, _)) = self.discard_map.first_key_value() {
            if count >= report.fmc {
                break;
            }
            debug!(count = %count, "discarding SDU acknowledged by status report");
            self.discard_map.remove(&count);
            self.lower_dn.on_discard_pdu(count);
        }

        // Bit i of the bitmap addresses COUNT = FMC + 1 + i; a set bit
        // means the receiver already holds that SDU. RLC is told about
        // every set bit, whether or not the map still has the entry.
        let mut count = report.fmc;
        for received in report.bits() {
            count = count.wrapping_add(1);
            if received {
                debug!(count = %count, "discarding SDU acknowledged by status report");
                self.discard_map.remove(&count);
                self.lower_dn.on_discard_pdu(count);
            }
        }
    }

    /// Compiles and transmits a status report, if the bearer is configured
    /// for status reporting; a no-op otherwise.
    pub fn send_status_report(&mut self) {
        if self.cfg.status_report_required {
            info!("status report triggered");
            let report = self.status_provider.compile_status_report();
            self.write_control_pdu_to_lower_layers(report);
        } else {
            warn!("status report triggered but not configured");
        }
    }

    /// Executes the data-recovery procedure (TS 38.323, Section 5.5):
    /// optionally emits a status report, then retransmits every cached PDU
    /// in ascending COUNT order. Discard timers keep running untouched.
    ///
    /// # Panics
    /// Calling this on anything but an AM DRB is a wiring bug and panics.
    pub fn data_recovery(&mut self) {
        assert!(
            self.cfg.is_drb() && self.cfg.rlc_mode == RlcMode::Am,
            "data recovery is only defined for AM DRBs"
        );
        info!("data recovery requested");

        if self.cfg.status_report_required {
            self.send_status_report();
        }

        let cached: Vec<(Count, Bytes)> = self
            .discard_map
            .iter()
            .filter_map(|(&count, entry)| entry.pdu.clone().map(|pdu| (count, pdu)))
            .collect();
        for (count, pdu) in cached {
            self.write_data_pdu_to_lower_layers(count, pdu);
        }
    }

    /// Delivers every expired discard timer: RLC is told to give up on the
    /// PDU, the timeout is counted, and the map entry is erased.
    ///
    /// The bearer executor calls this whenever its timer wheel ticks.
    pub fn run_expired_timers(&mut self) {
        for count in self.timers.take_expired() {
            debug!(count = %count, "discard timer expired");
            // RLC only drops the PDU if no segment was transmitted yet.
            self.lower_dn.on_discard_pdu(count);
            self.metrics.add_discard_timeouts(1);
            // Erasing the entry releases the timer handle; keep it last.
            self.discard_map.remove(&count);
        }
    }

    /// Current transmit state.
    pub fn state(&self) -> PdcpTxState {
        self.st
    }

    /// Overwrites the transmit state, e.g. when re-establishing the bearer
    /// with a preserved COUNT. Not meant to be called mid-traffic.
    pub fn set_state(&mut self, st: PdcpTxState) {
        self.st = st;
    }

    /// Snapshot of the metrics counters.
    pub fn metrics(&self) -> TxMetrics {
        self.metrics
    }

    /// Zeroes the metrics counters, e.g. after a reporting interval.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// COUNTs currently tracked by the discard map, ascending.
    pub fn outstanding_counts(&self) -> impl Iterator<Item = Count> + '_ {
        self.discard_map.keys().copied()
    }

    /// Cached protected PDU for `count`, present only on AM DRBs.
    pub fn cached_pdu(&self, count: Count) -> Option<Bytes> {
        self.discard_map.get(&count).and_then(|entry| entry.pdu.clone())
    }

    /// Applies integrity protection and ciphering to one SDU
    /// (TS 38.323, Sections 5.8 and 5.9).
    ///
    /// The MAC-I covers header and SDU; the ciphered unit is the SDU plus
    /// the MAC-I while the header stays in the clear. SRBs always carry a
    /// MAC-I field, DRBs only when integrity protection is enabled.
    fn apply_ciphering_and_integrity(
        &self,
        header: &[u8],
        sdu: &[u8],
        count: Count,
    ) -> Result<Bytes, SecurityError> {
        let mut mac = [0u8; PDCP_MAC_I_LEN];
        if self.sec_cfg.integrity_enabled {
            let mut msg = Vec::with_capacity(header.len() + sdu.len());
            msg.extend_from_slice(header);
            msg.extend_from_slice(sdu);
            mac = integrity::generate_mac(
                self.sec_cfg.integ_algo,
                self.sec_cfg.integrity_key(self.cfg.bearer_kind),
                count,
                self.cfg.bearer_id(),
                self.cfg.direction,
                &msg,
            )?;
        }

        let attach_mac =
            self.cfg.is_srb() || (self.cfg.is_drb() && self.sec_cfg.integrity_enabled);
        let mut plain = Vec::with_capacity(sdu.len() + PDCP_MAC_I_LEN);
        plain.extend_from_slice(sdu);
        if attach_mac {
            plain.extend_from_slice(&mac);
        }

        let ciphered = if self.sec_cfg.ciphering_enabled {
            ciphering::encrypt(
                self.sec_cfg.cipher_algo,
                self.sec_cfg.ciphering_key(self.cfg.bearer_kind),
                count,
                self.cfg.bearer_id(),
                self.cfg.direction,
                &plain,
            )?
        } else {
            plain
        };

        let mut pdu = BytesMut::with_capacity(header.len() + ciphered.len());
        pdu.put_slice(header);
        pdu.put_slice(&ciphered);
        Ok(pdu.freeze())
    }

    fn write_data_pdu_to_lower_layers(&mut self, count: Count, buf: Bytes) {
        debug!(
            count = %count,
            hfn = count.hfn(self.cfg.sn_size),
            sn = %count.sn(self.cfg.sn_size),
            pdu_len = buf.len(),
            integrity = self.sec_cfg.integrity_enabled,
            ciphering = self.sec_cfg.ciphering_enabled,
            "TX data PDU"
        );
        self.metrics.add_pdus(1, buf.len());
        // The COUNT rides along to RLC only for data PDUs on DRBs.
        let pdcp_count = self.cfg.is_drb().then_some(count);
        self.lower_dn.on_new_pdu(PdcpTxPdu { buf, pdcp_count });
    }

    fn write_control_pdu_to_lower_layers(&mut self, buf: Bytes) {
        debug!(pdu_len = buf.len(), "TX control PDU");
        self.metrics.add_pdus(1, buf.len());
        self.lower_dn.on_new_pdu(PdcpTxPdu {
            buf,
            pdcp_count: None,
        });
    }
}
