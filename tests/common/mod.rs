//! Shared helpers for the transmit-entity integration tests.
//!
//! Provides recording collaborator mocks, canned configurations and a
//! harness that wires an entity to a mockable clock so tests can drive
//! discard timers deterministically.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use bytes::Bytes;
use pdcpstar::timers::mock_clock::MockClock;
use pdcpstar::{
    BearerKind, CipheringAlgorithm, Count, Direction, DiscardTimer, IntegrityAlgorithm,
    LowerTxNotifier, MaxCount, PdcpTxConfig, PdcpTxEntity, PdcpTxPdu, RlcMode, SecKey,
    SecurityConfig, SnSize, StatusReportProvider, TimerService, UpperControlNotifier,
};

/// The status report every harness provider serves.
pub const CANNED_STATUS_REPORT: [u8; 5] = [0x00, 0x00, 0x00, 0x00, 0x00];

/// Events recorded from the upper control-plane notifier.
#[derive(Debug, Default)]
pub struct ControlEvents {
    pub max_count_reached: u32,
    pub protocol_failures: u32,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingUpperCn(pub Rc<RefCell<ControlEvents>>);

impl UpperControlNotifier for RecordingUpperCn {
    fn on_max_count_reached(&mut self) {
        self.0.borrow_mut().max_count_reached += 1;
    }

    fn on_protocol_failure(&mut self) {
        self.0.borrow_mut().protocol_failures += 1;
    }
}

/// Events recorded from the lower data-plane notifier.
#[derive(Debug, Default)]
pub struct LowerEvents {
    pub pdus: Vec<PdcpTxPdu>,
    pub discarded: Vec<Count>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingLowerDn(pub Rc<RefCell<LowerEvents>>);

impl LowerTxNotifier for RecordingLowerDn {
    fn on_new_pdu(&mut self, pdu: PdcpTxPdu) {
        self.0.borrow_mut().pdus.push(pdu);
    }

    fn on_discard_pdu(&mut self, count: Count) {
        self.0.borrow_mut().discarded.push(count);
    }
}

/// Serves the canned status report and counts how often it was compiled.
#[derive(Debug, Clone, Default)]
pub struct FixedStatusProvider(pub Rc<RefCell<u32>>);

impl StatusReportProvider for FixedStatusProvider {
    fn compile_status_report(&mut self) -> Bytes {
        *self.0.borrow_mut() += 1;
        Bytes::from_static(&CANNED_STATUS_REPORT)
    }
}

/// Security configuration with null algorithms and both transforms gated off.
pub fn null_security() -> SecurityConfig {
    SecurityConfig {
        integ_algo: IntegrityAlgorithm::Nia0,
        cipher_algo: CipheringAlgorithm::Nea0,
        k_rrc_int: SecKey::new([0x11; 16]),
        k_rrc_enc: SecKey::new([0x22; 16]),
        k_up_int: SecKey::new([0x33; 16]),
        k_up_enc: SecKey::new([0x44; 16]),
        integrity_enabled: false,
        ciphering_enabled: false,
    }
}

/// Baseline bearer configuration; tests override individual fields.
pub fn config(kind: BearerKind, sn_size: SnSize, rlc_mode: RlcMode) -> PdcpTxConfig {
    PdcpTxConfig {
        bearer_kind: kind,
        sn_size,
        rlc_mode,
        direction: Direction::Downlink,
        lcid: 4,
        discard_timer: DiscardTimer::NotConfigured,
        status_report_required: false,
        max_count: MaxCount::default(),
    }
}

/// An entity wired to recording collaborators and a mock clock.
pub struct Harness {
    pub entity: PdcpTxEntity,
    pub upper: Rc<RefCell<ControlEvents>>,
    pub lower: Rc<RefCell<LowerEvents>>,
    pub compiled_reports: Rc<RefCell<u32>>,
    pub clock: Arc<MockClock>,
}

impl Harness {
    pub fn build(cfg: PdcpTxConfig, sec_cfg: SecurityConfig) -> Self {
        let clock = Arc::new(MockClock::default());
        let upper = RecordingUpperCn::default();
        let lower = RecordingLowerDn::default();
        let provider = FixedStatusProvider::default();
        let upper_events = upper.0.clone();
        let lower_events = lower.0.clone();
        let compiled_reports = provider.0.clone();

        let entity = PdcpTxEntity::new(
            cfg,
            sec_cfg,
            Box::new(upper),
            Box::new(lower),
            Box::new(provider),
            TimerService::new(clock.clone()),
        )
        .expect("test configuration must be valid");

        Self {
            entity,
            upper: upper_events,
            lower: lower_events,
            compiled_reports,
            clock,
        }
    }

    /// COUNTs of every data PDU delivered downward so far.
    pub fn delivered_counts(&self) -> Vec<Count> {
        self.lower
            .borrow()
            .pdus
            .iter()
            .filter_map(|pdu| pdu.pdcp_count)
            .collect()
    }

    /// Raw bytes of every PDU delivered downward so far.
    pub fn delivered_bufs(&self) -> Vec<Bytes> {
        self.lower.borrow().pdus.iter().map(|pdu| pdu.buf.clone()).collect()
    }

    /// Forgets all recorded lower-layer events.
    pub fn clear_lower_events(&self) {
        let mut events = self.lower.borrow_mut();
        events.pdus.clear();
        events.discarded.clear();
    }
}
