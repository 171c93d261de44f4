//! Differential correctness verification.
//!
//! Drives a random stream of init/read/write operations against the device
//! under test while mirroring every mutation into an epoch-stamped shadow
//! model. Reads are compared on the fly; the run finishes with a full-array
//! sweep and the structural invariant audit. On the first mismatch the DUT's
//! buffer neighborhood around the failing index is dumped for diagnosis.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use lazar_core::{DynArray, InitArray, Word};

use crate::scenario::ImplKind;

/// Number of random operations per verification run.
const VERIFY_OPS: usize = 1000;

/// Epoch-stamped shadow of the DUT's logical state.
///
/// `init` bumps an epoch instead of rewriting the shadow; a cell's expected
/// value is its stored word only when its stamp matches the current epoch.
/// The epoch wrap (after ~4e9 inits) pays one full stamp clear.
struct ShadowModel {
    shadow: Vec<Word>,
    stamp: Vec<u32>,
    epoch: u32,
    initv: Word,
}

impl ShadowModel {
    fn new(n: usize) -> Self {
        Self {
            shadow: vec![0; n],
            stamp: vec![0; n],
            epoch: 1,
            initv: 0,
        }
    }

    fn on_init(&mut self, v: Word) {
        self.initv = v;
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            self.stamp.fill(0);
            self.epoch = 1;
        }
    }

    fn on_write(&mut self, i: usize, v: Word) {
        self.shadow[i] = v;
        self.stamp[i] = self.epoch;
    }

    fn expected(&self, i: usize) -> Word {
        if self.stamp[i] == self.epoch {
            self.shadow[i]
        } else {
            self.initv
        }
    }
}

/// Prints the buffer neighborhood around `focus` with block boundaries and
/// written/unwritten side labels.
fn dump_state(arr: &DynArray, focus: usize) {
    let (cells, boundary, block, extra) = match arr {
        DynArray::Block2(a) => (a.cells(), a.boundary(), 2, String::new()),
        DynArray::Block4(a) => (
            a.cells(),
            a.boundary(),
            4,
            format!(" direct={}", a.is_direct()),
        ),
        DynArray::Flat(_) => {
            eprintln!("[dump] flat reference, nothing structural to show");
            return;
        }
    };
    let n_blocks = cells.len() / block;
    eprintln!(
        "[dump] {} N={} blocks={} boundary={}{} focus={}",
        arr.name(),
        cells.len(),
        n_blocks,
        boundary,
        extra,
        focus
    );
    let fb = focus / block;
    let start = fb.saturating_sub(4);
    let end = n_blocks.min(fb + 5);
    for bi in start..end {
        let side = if bi < boundary { "WCA" } else { "UCA" };
        let first = bi * block;
        eprintln!("  B{bi} [{side}] : {:?}", &cells[first..first + block]);
    }
}

/// Runs the differential verification for one implementation.
///
/// Returns true when every read matched the shadow, the final sweep was
/// clean, and the structural audit passed.
pub fn verify_impl(kind: ImplKind, n: usize, seed: u64) -> bool {
    println!(
        "--- correctness verification: {} N={} seed={} ---",
        kind.label(),
        n,
        seed
    );

    let mut dut = match kind.build(n) {
        Ok(Some(arr)) => arr,
        Ok(None) => {
            eprintln!("{} has no contract surface to verify", kind.label());
            return false;
        }
        Err(e) => {
            eprintln!("cannot construct {} with N={}: {}", kind.label(), n, e);
            return false;
        }
    };
    let mut model = ShadowModel::new(n);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    for step in 0..VERIFY_OPS {
        match rng.gen_range(0..3) {
            0 => {
                let v = rng.gen_range(-1000i64..=1000);
                dut.init(v);
                model.on_init(v);
            }
            1 => {
                let i = rng.gen_range(0..n);
                let got = dut.read(i).expect("in-range read");
                let want = model.expected(i);
                if got != want {
                    eprintln!("MISMATCH at step {step}: read({i}) = {got}, expected {want}");
                    dump_state(&dut, i);
                    return false;
                }
            }
            _ => {
                let i = rng.gen_range(0..n);
                let v = rng.gen_range(-1000i64..=1000);
                dut.write(i, v).expect("in-range write");
                model.on_write(i, v);
            }
        }
    }

    for i in 0..n {
        let got = dut.read(i).expect("in-range sweep read");
        let want = model.expected(i);
        if got != want {
            eprintln!("MISMATCH in final sweep: read({i}) = {got}, expected {want}");
            dump_state(&dut, i);
            return false;
        }
    }

    if let Err(violation) = dut.audit() {
        eprintln!("INVARIANT FAILURE: {violation}");
        return false;
    }

    println!("--- verification PASSED ({VERIFY_OPS} ops + sweep + audit) ---");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_verifiable_impls_pass() {
        for kind in [ImplKind::Flat, ImplKind::Block2, ImplKind::Block4] {
            assert!(verify_impl(kind, 1000, 42), "{}", kind.label());
        }
    }

    #[test]
    fn shadow_model_epochs() {
        let mut m = ShadowModel::new(4);
        assert_eq!(m.expected(2), 0);
        m.on_write(2, 9);
        assert_eq!(m.expected(2), 9);
        m.on_init(-1);
        assert_eq!(m.expected(2), -1);
        m.on_write(0, 3);
        assert_eq!(m.expected(0), 3);
        assert_eq!(m.expected(1), -1);
    }
}
