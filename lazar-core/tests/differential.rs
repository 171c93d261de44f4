//! Seeded random differential run against the flat reference at a size
//! large enough to exercise long chain populations and many boundary
//! advances.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use lazar_core::{Block2Array, Block4Array, FlatArray, InitArray};

fn drive(dut: &mut impl InitArray, n: usize, seed: u64, ops: usize) {
    let mut reference = FlatArray::new(n).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    for step in 0..ops {
        match rng.gen_range(0..3) {
            0 => {
                let v = rng.gen_range(-1000i64..=1000);
                reference.init(v);
                dut.init(v);
            }
            1 => {
                let i = rng.gen_range(0..n);
                let want = reference.read(i).unwrap();
                let got = dut.read(i).unwrap();
                assert_eq!(got, want, "{}: read({i}) at step {step}", dut.name());
            }
            _ => {
                let i = rng.gen_range(0..n);
                let v = rng.gen_range(-1000i64..=1000);
                reference.write(i, v).unwrap();
                dut.write(i, v).unwrap();
            }
        }
    }

    for i in 0..n {
        assert_eq!(
            dut.read(i).unwrap(),
            reference.read(i).unwrap(),
            "{}: final sweep at {i}",
            dut.name()
        );
    }
    assert!(dut.audit_invariants());
}

#[test]
fn random_mix_block2_n10000() {
    let mut dut = Block2Array::new(10_000).unwrap();
    drive(&mut dut, 10_000, 42, 1000);
}

#[test]
fn random_mix_block4_n10000() {
    let mut dut = Block4Array::new(10_000).unwrap();
    drive(&mut dut, 10_000, 42, 1000);
}

#[test]
fn write_heavy_mix_small_arrays() {
    // Small arrays hit the direct-mode transition and chain recycling far
    // more often per op than large ones.
    for seed in [1u64, 7, 1234, 0xDEAD] {
        let mut dut = Block2Array::new(8).unwrap();
        drive(&mut dut, 8, seed, 500);
        let mut dut = Block4Array::new(8).unwrap();
        drive(&mut dut, 8, seed, 500);
    }
}
