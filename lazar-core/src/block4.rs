//! Block-size-4 constant-time-initializable array.
//!
//! [`Block4Array`] follows the same chain-pairing scheme as
//! [`Block2Array`](crate::Block2Array) with three differences:
//!
//! - Blocks hold 4 cells, so a chained unwritten-side block shelters three
//!   displaced words in its partner (offsets 1..4) while its own last cell
//!   stays in place. Chain pointers spend 2 low alignment bits instead of 1.
//! - The final block's cells at offsets 1 and 2 double as metadata slots
//!   mirroring `initv` and the boundary while the boundary has not swallowed
//!   the whole array. The final block sits on the unwritten side for that
//!   entire phase and its logical values at those offsets live elsewhere
//!   (either implicitly `initv` or sheltered in a partner), so the slots are
//!   never read as user data.
//! - Once the boundary reaches the block count, a `direct` flag short-
//!   circuits all bookkeeping: every block then stores its user data in
//!   place at every offset, and reads/writes index the buffer directly.
//!
//! Shelter mapping for a chained unwritten-side block `j` with written-side
//! partner `m`:
//!
//! ```text
//! offset of i in j :   0    1    2    3
//! stored at        : m+1  m+2  m+3  A[i]
//! ```

use alloc::vec;
use alloc::vec::Vec;

use crate::counters::Counters;
use crate::error::{ArrayError, InvariantViolation};
use crate::Word;

/// Number of cells per block.
const BLOCK: usize = 4;

/// Initializable array with block size 4 and a direct-mode fast path.
///
/// Construction requires a positive length divisible by 4.
#[derive(Debug, Clone)]
pub struct Block4Array {
    len: usize,
    n_blocks: usize,
    a: Vec<Word>,
    /// Boundary in blocks: blocks `< b` are written-side.
    b: usize,
    initv: Word,
    /// True once the boundary has absorbed every block; the buffer is a
    /// plain array from then on (until the next `init`).
    flag: bool,
    ctr: Counters,
}

impl Block4Array {
    /// Creates an array of `n` cells, all logically zero.
    ///
    /// # Errors
    ///
    /// [`ArrayError::BadShape`] if `n` is zero or not a multiple of 4.
    pub fn new(n: usize) -> Result<Self, ArrayError> {
        if n == 0 || n % BLOCK != 0 {
            return Err(ArrayError::BadShape { len: n, block: BLOCK });
        }
        Ok(Self {
            len: n,
            n_blocks: n / BLOCK,
            a: vec![0; n],
            b: 0,
            initv: 0,
            flag: false,
            ctr: Counters::default(),
        })
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; zero-length arrays cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current boundary, in blocks.
    #[must_use]
    pub fn boundary(&self) -> usize {
        self.b
    }

    /// Current logical initialization value.
    #[must_use]
    pub fn init_value(&self) -> Word {
        self.initv
    }

    /// True when every block has crossed the boundary and the buffer acts
    /// as a plain array.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.flag
    }

    /// Read-only view of the raw buffer, for audits and failure dumps.
    ///
    /// The physical cells do not equal the logical values; decode them
    /// through [`read`](Self::read).
    #[must_use]
    pub fn cells(&self) -> &[Word] {
        &self.a
    }

    /// Operation counters since the last reset.
    #[must_use]
    pub fn counters(&self) -> Counters {
        self.ctr
    }

    /// Zeroes the operation counters.
    pub fn reset_counters(&mut self) {
        self.ctr.reset();
    }

    /// Logically sets every cell to `v`.
    ///
    /// Touches at most the two final-block metadata slots; every other cell
    /// is reinterpreted, not rewritten.
    pub fn init(&mut self, v: Word) {
        self.ctr.inits += 1;
        self.initv = v;
        self.b = 0;
        self.sync_meta_to_buf();
    }

    /// Returns the logical value at `i`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] if `i >= len`; the container (counters
    /// included) is unchanged on failure.
    pub fn read(&mut self, i: usize) -> Result<Word, ArrayError> {
        if i >= self.len {
            return Err(ArrayError::OutOfRange { index: i, len: self.len });
        }
        self.ctr.reads += 1;
        Ok(self.read_at(i))
    }

    /// Sets the logical value at `i` to `v`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] if `i >= len`; the container (counters
    /// included) is unchanged on failure.
    pub fn write(&mut self, i: usize, v: Word) -> Result<(), ArrayError> {
        if i >= self.len {
            return Err(ArrayError::OutOfRange { index: i, len: self.len });
        }
        self.ctr.writes += 1;
        self.write_at(i, v);
        Ok(())
    }

    #[inline(always)]
    fn block_of(i: usize) -> usize {
        i >> 2
    }

    #[inline(always)]
    fn first_of(j: usize) -> usize {
        j << 2
    }

    /// Mirrors `initv` and the boundary into the final block's metadata
    /// slots, and recomputes the direct-mode flag. Skipped entirely once
    /// direct mode is reached (no slot exists then, and none is needed).
    fn sync_meta_to_buf(&mut self) {
        self.flag = self.b >= self.n_blocks;
        if !self.flag {
            let mb = Self::first_of(self.n_blocks - 1);
            self.a[mb + 1] = self.initv;
            self.a[mb + 2] = self.b as Word;
        }
    }

    /// Resolves the chain partner of block `j`, if any.
    ///
    /// Same conjunction as the block-2 variant, with a 2-bit alignment tag:
    /// {tag clear, in range, crosses the boundary, symmetric echo}.
    fn chained_to(&self, j: usize) -> Option<usize> {
        let x = self.a[Self::first_of(j)];
        if x & 3 != 0 || x < 0 {
            return None;
        }
        let tgt = x as usize;
        if tgt >= self.len {
            return None;
        }
        let k = tgt >> 2;
        if (j < self.b) == (k < self.b) {
            return None;
        }
        if self.a[tgt] != Self::first_of(j) as Word {
            return None;
        }
        Some(k)
    }

    /// Pairs blocks `u` and `v` by storing each other's first-cell index.
    fn make_chain(&mut self, u: usize, v: usize) {
        self.a[Self::first_of(u)] = Self::first_of(v) as Word;
        self.a[Self::first_of(v)] = Self::first_of(u) as Word;
        self.ctr.conversions += 1;
    }

    /// Dissolves block `j`'s chain by self-pointing the partner. No-op (and
    /// no counter bump) when `j` is unchained.
    fn break_chain(&mut self, j: usize) {
        if let Some(k) = self.chained_to(j) {
            self.a[Self::first_of(k)] = Self::first_of(k) as Word;
            self.ctr.conversions += 1;
        }
    }

    /// Fills all four cells of block `j` with the init value.
    fn init_block(&mut self, j: usize) {
        let f = Self::first_of(j);
        self.a[f] = self.initv;
        self.a[f + 1] = self.initv;
        self.a[f + 2] = self.initv;
        self.a[f + 3] = self.initv;
    }

    /// Advances the boundary by one block and returns a freed written-side
    /// block; relocates any data the consumed block was sheltering.
    fn extend(&mut self) -> usize {
        let s = self.b;
        let chained = self.chained_to(s);
        self.b += 1;
        let freed = match chained {
            None => {
                self.init_block(s);
                self.break_chain(s);
                s
            }
            Some(k) => {
                // s's displaced values at offsets 0..3 come home from k.
                let (fs, fk) = (Self::first_of(s), Self::first_of(k));
                self.a[fs] = self.a[fk + 1];
                self.a[fs + 1] = self.a[fk + 2];
                self.a[fs + 2] = self.a[fk + 3];
                self.break_chain(s);
                self.init_block(k);
                self.break_chain(k);
                self.ctr.relocations += 1;
                k
            }
        };
        self.sync_meta_to_buf();
        freed
    }

    fn read_at(&self, i: usize) -> Word {
        if self.flag {
            return self.a[i];
        }
        let j = Self::block_of(i);
        let k = self.chained_to(j);
        if i < BLOCK * self.b {
            match k {
                Some(_) => self.initv,
                None => self.a[i],
            }
        } else {
            match k {
                Some(m) => {
                    let fm = Self::first_of(m);
                    match i & 3 {
                        0 => self.a[fm + 1],
                        1 => self.a[fm + 2],
                        2 => self.a[fm + 3],
                        _ => self.a[i],
                    }
                }
                None => self.initv,
            }
        }
    }

    fn write_at(&mut self, i: usize, v: Word) {
        if self.flag {
            self.a[i] = v;
            return;
        }
        let j = Self::block_of(i);
        let k = self.chained_to(j);

        if j < self.b {
            match k {
                None => {
                    self.a[i] = v;
                    self.break_chain(j);
                }
                Some(partner) => {
                    let f = self.extend();
                    if f == j {
                        self.a[i] = v;
                        self.break_chain(j);
                    } else {
                        let (fj, ff) = (Self::first_of(j), Self::first_of(f));
                        for t in 0..BLOCK {
                            self.a.swap(fj + t, ff + t);
                        }
                        self.ctr.relocations += 1;
                        self.make_chain(f, partner);
                        self.init_block(j);
                        self.a[i] = v;
                        self.break_chain(j);
                    }
                }
            }
        } else {
            match k {
                Some(m) => {
                    let fm = Self::first_of(m);
                    match i & 3 {
                        0 => self.a[fm + 1] = v,
                        1 => self.a[fm + 2] = v,
                        2 => self.a[fm + 3] = v,
                        _ => self.a[i] = v,
                    }
                }
                None => {
                    let f = self.extend();
                    if f == j {
                        // extend initialized j's cells on its way to the
                        // written side; write directly.
                        self.a[i] = v;
                        self.break_chain(j);
                    } else {
                        self.init_block(j);
                        self.make_chain(f, j);
                        let ff = Self::first_of(f);
                        match i & 3 {
                            0 => self.a[ff + 1] = v,
                            1 => self.a[ff + 2] = v,
                            2 => self.a[ff + 3] = v,
                            _ => self.a[i] = v,
                        }
                        // init_block may have landed on the final block's
                        // metadata slots.
                        self.sync_meta_to_buf();
                    }
                }
            }
        }
    }

    /// Runs the O(N) structural audit: boundary range, flag coherence,
    /// final-block metadata slots, and the chain symmetry scan.
    ///
    /// # Errors
    ///
    /// The first [`InvariantViolation`] found.
    pub fn audit(&self) -> Result<(), InvariantViolation> {
        if self.b > self.n_blocks {
            return Err(InvariantViolation::BoundaryOutOfRange {
                boundary: self.b,
                n_blocks: self.n_blocks,
            });
        }
        if self.flag != (self.b >= self.n_blocks) {
            return Err(InvariantViolation::FlagMismatch {
                flag: self.flag,
                boundary: self.b,
                n_blocks: self.n_blocks,
            });
        }
        if !self.flag {
            let mb = Self::first_of(self.n_blocks - 1);
            if self.a[mb + 1] != self.initv {
                return Err(InvariantViolation::MetadataMismatch {
                    slot: mb + 1,
                    expected: self.initv,
                    found: self.a[mb + 1],
                });
            }
            if self.a[mb + 2] != self.b as Word {
                return Err(InvariantViolation::MetadataMismatch {
                    slot: mb + 2,
                    expected: self.b as Word,
                    found: self.a[mb + 2],
                });
            }
        }
        for u in 0..self.n_blocks {
            if let Some(v) = self.chained_to(u) {
                if self.chained_to(v) != Some(u) {
                    return Err(InvariantViolation::AsymmetricChain { u, v });
                }
                if (u < self.b) == (v < self.b) {
                    return Err(InvariantViolation::NonCrossingChain { u, v });
                }
            }
        }
        Ok(())
    }

    /// Boolean audit surface for harnesses that only need pass/fail.
    #[must_use]
    pub fn audit_invariants(&self) -> bool {
        self.audit().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_shapes() {
        assert!(matches!(
            Block4Array::new(0),
            Err(ArrayError::BadShape { len: 0, block: 4 })
        ));
        assert!(matches!(
            Block4Array::new(6),
            Err(ArrayError::BadShape { len: 6, block: 4 })
        ));
        assert!(Block4Array::new(16).is_ok());
    }

    #[test]
    fn metadata_slots_track_init_and_boundary() {
        let mut arr = Block4Array::new(16).unwrap();
        arr.init(7);
        let mb = 12;
        assert_eq!(arr.cells()[mb + 1], 7);
        assert_eq!(arr.cells()[mb + 2], 0);
        arr.write(0, 1).unwrap();
        assert_eq!(arr.cells()[mb + 2], arr.boundary() as i64);
        assert!(arr.audit_invariants());
    }

    #[test]
    fn shelter_mapping_covers_all_offsets() {
        let mut arr = Block4Array::new(16).unwrap();
        arr.init(0);
        // Writes into block 2 while the boundary is behind it.
        for (off, v) in [(8, 10), (9, 11), (10, 12), (11, 13)] {
            arr.write(off, v).unwrap();
        }
        for (off, v) in [(8, 10), (9, 11), (10, 12), (11, 13)] {
            assert_eq!(arr.read(off).unwrap(), v);
        }
        assert!(arr.audit_invariants());
    }

    #[test]
    fn direct_mode_after_full_sweep() {
        let mut arr = Block4Array::new(8).unwrap();
        arr.init(0);
        for i in 0..8 {
            arr.write(i, i as i64 + 1).unwrap();
        }
        assert!(arr.is_direct());
        for i in 0..8 {
            assert_eq!(arr.read(i).unwrap(), i as i64 + 1);
        }
        // init drops back out of direct mode.
        arr.init(-3);
        assert!(!arr.is_direct());
        assert_eq!(arr.read(5).unwrap(), -3);
    }
}
