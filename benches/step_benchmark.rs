use chip::{chip8::ChipSet, resources::Rom};
use criterion::{criterion_group, criterion_main, Criterion};

const ROM_NAME: &str = "BENCH";

/// counts `V0` up, draws the matching glyph and loops
const BENCH_ROM: [u8; 12] = [
    0x70, 0x01, // ADD V0, 0x01
    0xF0, 0x29, // LD F, V0
    0xD1, 0x25, // DRW V1, V2, 0x5
    0x81, 0x04, // ADD V1, V0
    0x62, 0x04, // LD V2, 0x04
    0x12, 0x00, // JP 0x200
];

static BASE_ROM: once_cell::sync::Lazy<Rom> = once_cell::sync::Lazy::new(|| {
    Rom::new(ROM_NAME, BENCH_ROM.to_vec()).expect("The bench rom fits into memory.")
});

/// will setup the default configured chip
fn get_default_chip() -> ChipSet {
    ChipSet::new(BASE_ROM.clone())
}

pub fn step_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    c.bench_function("step_bench", |b| {
        b.iter(|| chip.cycle().expect("The bench rom never faults."));
    });
}

pub fn print_bench(c: &mut Criterion) {
    let chip = get_default_chip();
    c.bench_function("print_bench", |b| {
        b.iter(|| format!("{}", chip));
    });
}

criterion_group!(benches, step_bench, print_bench);
criterion_main!(benches);
