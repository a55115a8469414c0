use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use zkid_ledger::IdentityLedger;
use zkid_nullables::{NullClock, NullStore};
use zkid_types::{AccountAddress, AttributeType, FieldElement, Hash256, LedgerParams, Proof};

fn proof() -> Proof {
    let fe = FieldElement::from_u64;
    Proof {
        a: [fe(1), fe(2)],
        b: [[fe(3), fe(4)], [fe(5), fe(6)]],
        c: [fe(7), fe(8)],
        public_inputs: vec![fe(1)],
    }
}

fn address(i: u64) -> AccountAddress {
    let mut bytes = [0u8; 20];
    bytes[12..].copy_from_slice(&i.to_be_bytes());
    AccountAddress::new(bytes)
}

fn hash(i: u64) -> Hash256 {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&i.to_be_bytes());
    Hash256::new(bytes)
}

fn ready_ledger() -> IdentityLedger<NullStore> {
    let ledger = IdentityLedger::new(NullStore::new(), LedgerParams::default())
        .with_clock(NullClock::new(1_000));
    let owner = address(u64::MAX);
    ledger.initialize(&owner).unwrap();
    ledger.provision_verification_keys(&owner).unwrap();
    ledger
}

fn bench_register(c: &mut Criterion) {
    c.bench_function("register_identity", |b| {
        let ledger = ready_ledger();
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            black_box(
                ledger
                    .register_identity(&address(i), hash(i), proof(), hash(i))
                    .unwrap(),
            );
        });
    });
}

fn bench_certificates(c: &mut Criterion) {
    let mut group = c.benchmark_group("certificate");
    let ledger = ready_ledger();
    let user = address(1);
    ledger
        .register_identity(&user, hash(1), proof(), hash(1))
        .unwrap();
    for attr in AttributeType::ALL {
        ledger
            .verify_attribute(&user, attr, proof(), vec![FieldElement::from_u64(1)])
            .unwrap();
    }

    for count in [1usize, 4, 7] {
        let attrs = &AttributeType::ALL[..count];
        let cert = ledger.generate_certificate(&user, attrs).unwrap();
        let now = ledger.now();

        group.bench_with_input(BenchmarkId::new("generate", count), &count, |b, _| {
            b.iter(|| black_box(ledger.generate_certificate(black_box(&user), black_box(attrs))));
        });
        group.bench_with_input(BenchmarkId::new("verify", count), &count, |b, _| {
            b.iter(|| {
                black_box(ledger.verify_certificate(
                    black_box(&user),
                    black_box(attrs),
                    black_box(&cert),
                    now,
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_register, bench_certificates);
criterion_main!(benches);
