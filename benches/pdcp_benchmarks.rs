use std::hint::black_box;
use std::sync::Arc;

use bytes::Bytes;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pdcpstar::{
    BearerKind, CipheringAlgorithm, Count, Direction, DiscardTimer, IntegrityAlgorithm,
    LowerTxNotifier, MaxCount, PdcpTxConfig, PdcpTxEntity, PdcpTxPdu, RlcMode, SecKey,
    SecurityConfig, SnSize, StatusReportProvider, SystemClock, TimerService,
    UpperControlNotifier,
};

#[derive(Debug)]
struct NullUpper;
impl UpperControlNotifier for NullUpper {
    fn on_max_count_reached(&mut self) {}
    fn on_protocol_failure(&mut self) {}
}

#[derive(Debug)]
struct NullLower;
impl LowerTxNotifier for NullLower {
    fn on_new_pdu(&mut self, pdu: PdcpTxPdu) {
        black_box(pdu);
    }
    fn on_discard_pdu(&mut self, _count: Count) {}
}

#[derive(Debug)]
struct NullProvider;
impl StatusReportProvider for NullProvider {
    fn compile_status_report(&mut self) -> Bytes {
        Bytes::from_static(&[0x00, 0, 0, 0, 0])
    }
}

fn entity(
    integ: IntegrityAlgorithm,
    cipher: CipheringAlgorithm,
    protect: bool,
) -> PdcpTxEntity {
    let cfg = PdcpTxConfig {
        bearer_kind: BearerKind::Drb,
        sn_size: SnSize::Size18,
        rlc_mode: RlcMode::Um,
        direction: Direction::Downlink,
        lcid: 4,
        discard_timer: DiscardTimer::NotConfigured,
        status_report_required: false,
        max_count: MaxCount::default(),
    };
    let sec_cfg = SecurityConfig {
        integ_algo: integ,
        cipher_algo: cipher,
        k_rrc_int: SecKey::new([0x11; 16]),
        k_rrc_enc: SecKey::new([0x22; 16]),
        k_up_int: SecKey::new([0x33; 16]),
        k_up_enc: SecKey::new([0x44; 16]),
        integrity_enabled: protect,
        ciphering_enabled: protect,
    };
    PdcpTxEntity::new(
        cfg,
        sec_cfg,
        Box::new(NullUpper),
        Box::new(NullLower),
        Box::new(NullProvider),
        TimerService::new(Arc::new(SystemClock)),
    )
    .expect("benchmark configuration is valid")
}

fn bench_handle_sdu(c: &mut Criterion) {
    const SDU_LEN: usize = 1400;
    let sdu = Bytes::from(vec![0xA5u8; SDU_LEN]);

    let mut group = c.benchmark_group("handle_sdu");
    group.throughput(Throughput::Bytes(SDU_LEN as u64));

    let cases = [
        ("nea0_nia0", IntegrityAlgorithm::Nia0, CipheringAlgorithm::Nea0),
        ("nea1_nia1", IntegrityAlgorithm::Nia1, CipheringAlgorithm::Nea1),
        ("nea2_nia2", IntegrityAlgorithm::Nia2, CipheringAlgorithm::Nea2),
    ];
    for (name, integ, cipher) in cases {
        let mut tx = entity(integ, cipher, integ != IntegrityAlgorithm::Nia0);
        group.bench_with_input(BenchmarkId::from_parameter(name), &sdu, |b, sdu| {
            b.iter(|| tx.handle_sdu(black_box(sdu.clone())));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_handle_sdu);
criterion_main!(benches);
