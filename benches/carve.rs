use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sobelseam::{EnergyUpdate, SeamCarver, TwoDimensionalMap};

// A deterministic, busy test card: 160x120 of xorshifted pixels.
fn test_card() -> TwoDimensionalMap<u32> {
    let mut state: u32 = 0x2545_f491;
    let rows = (0..120)
        .map(|_| {
            (0..160)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    state | 0xff00_0000
                })
                .collect()
        })
        .collect();
    TwoDimensionalMap::from_rows(rows).unwrap()
}

fn carve_with(update: EnergyUpdate) {
    let mut carver = SeamCarver::new(test_card())
        .unwrap()
        .with_energy_update(update);
    carver.carve(black_box(40)).unwrap();
    black_box(carver.finish());
}

fn incremental(c: &mut Criterion) {
    c.bench_function("carve 40 seams, incremental", |b| {
        b.iter(|| carve_with(EnergyUpdate::Incremental))
    });
}

fn full(c: &mut Criterion) {
    c.bench_function("carve 40 seams, full recompute", |b| {
        b.iter(|| carve_with(EnergyUpdate::Full))
    });
}

criterion_group!(benches, incremental, full);
criterion_main!(benches);
