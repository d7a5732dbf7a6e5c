//! `pdcpstar`: a memory-safe 5G NR PDCP transmit entity in Rust.
//!
//! This library implements the transmit side of the Packet Data Convergence
//! Protocol of 3GPP TS 38.323: COUNT management, header encoding, integrity
//! protection and ciphering, discard timers, status-report handling and the
//! acknowledged-mode data-recovery procedure. The primary entry point is
//! the [`PdcpTxEntity`].
//!
//! ## Core concepts
//!
//! - **[`PdcpTxEntity`]**: one long-lived entity per radio bearer per user.
//!   It accepts SDUs from the upper layer and hands protected PDUs to RLC.
//! - **Collaborators**: the entity talks to the rest of the stack through
//!   the traits in [`traits`]: an upper control-plane notifier (RRC), a
//!   lower data-plane notifier (RLC) and a status-report provider, all
//!   bound once at construction.
//! - **COUNT discipline**: every PDU consumes one strictly increasing
//!   32-bit COUNT. Configurable thresholds notify the RRC before the
//!   counter space runs out and hard-stop the bearer when it does.
//! - **Discard timers**: every in-flight PDU is guarded by a single-shot
//!   timer from [`timers::TimerService`]; expiry, peer status reports and
//!   teardown all prune the same ordered map.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::sync::Arc;
//!
//! use bytes::Bytes;
//! use pdcpstar::{
//!     BearerKind, CipheringAlgorithm, Count, Direction, DiscardTimer, IntegrityAlgorithm,
//!     LowerTxNotifier, MaxCount, PdcpTxConfig, PdcpTxEntity, PdcpTxPdu, RlcMode, SecKey,
//!     SecurityConfig, SnSize, StatusReportProvider, SystemClock, TimerService,
//!     UpperControlNotifier,
//! };
//!
//! // Collect what the entity sends towards RLC.
//! #[derive(Debug)]
//! struct Sink(Rc<RefCell<Vec<PdcpTxPdu>>>);
//! impl LowerTxNotifier for Sink {
//!     fn on_new_pdu(&mut self, pdu: PdcpTxPdu) {
//!         self.0.borrow_mut().push(pdu);
//!     }
//!     fn on_discard_pdu(&mut self, _count: Count) {}
//! }
//!
//! #[derive(Debug)]
//! struct Rrc;
//! impl UpperControlNotifier for Rrc {
//!     fn on_max_count_reached(&mut self) {}
//!     fn on_protocol_failure(&mut self) {}
//! }
//!
//! #[derive(Debug)]
//! struct RxStatus;
//! impl StatusReportProvider for RxStatus {
//!     fn compile_status_report(&mut self) -> Bytes {
//!         Bytes::from_static(&[0x00, 0, 0, 0, 0])
//!     }
//! }
//!
//! fn main() -> Result<(), pdcpstar::ConfigError> {
//!     let cfg = PdcpTxConfig {
//!         bearer_kind: BearerKind::Drb,
//!         sn_size: SnSize::Size12,
//!         rlc_mode: RlcMode::Um,
//!         direction: Direction::Downlink,
//!         lcid: 4,
//!         discard_timer: DiscardTimer::NotConfigured,
//!         status_report_required: false,
//!         max_count: MaxCount::default(),
//!     };
//!     let sec_cfg = SecurityConfig {
//!         integ_algo: IntegrityAlgorithm::Nia0,
//!         cipher_algo: CipheringAlgorithm::Nea0,
//!         k_rrc_int: SecKey::new([0; 16]),
//!         k_rrc_enc: SecKey::new([0; 16]),
//!         k_up_int: SecKey::new([0; 16]),
//!         k_up_enc: SecKey::new([0; 16]),
//!         integrity_enabled: false,
//!         ciphering_enabled: false,
//!     };
//!
//!     let delivered = Rc::new(RefCell::new(Vec::new()));
//!     let mut entity = PdcpTxEntity::new(
//!         cfg,
//!         sec_cfg,
//!         Box::new(Rrc),
//!         Box::new(Sink(delivered.clone())),
//!         Box::new(RxStatus),
//!         TimerService::new(Arc::new(SystemClock)),
//!     )?;
//!
//!     entity.handle_sdu(Bytes::from_static(&[0xAA, 0xBB]));
//!
//!     let pdus = delivered.borrow();
//!     assert_eq!(pdus[0].buf.as_ref(), &[0x80, 0x00, 0xAA, 0xBB]);
//!     assert_eq!(pdus[0].pdcp_count, Some(Count::new(0)));
//!     Ok(())
//! }
//! ```
//!
//! ## Scope
//!
//! Receive-side PDCP (reordering, reassembly, integrity verification),
//! header compression, key derivation and everything below RLC are out of
//! scope. Keys arrive fully derived in the [`SecurityConfig`].

pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod metrics;
pub mod security;
pub mod serialization;
pub mod timers;
pub mod traits;
pub mod types;

pub use config::{
    BearerKind, Direction, DiscardTimer, MaxCount, PdcpTxConfig, RlcMode, SnSize,
};
pub use entity::{PdcpTxEntity, PdcpTxState};
pub use error::{ConfigError, HeaderError, SecurityError, StatusReportError};
pub use metrics::TxMetrics;
pub use security::{CipheringAlgorithm, IntegrityAlgorithm, SecKey, SecurityConfig};
pub use timers::{Clock, SystemClock, TimerService};
pub use traits::{LowerTxNotifier, PdcpTxPdu, StatusReportProvider, UpperControlNotifier};
pub use types::{BearerId, Count, Sn};
