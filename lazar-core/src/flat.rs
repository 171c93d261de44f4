//! Plain-buffer reference implementation.
//!
//! [`FlatArray`] fills the whole buffer on `init` (O(N)) and indexes it
//! directly otherwise. It is the correctness oracle for the differential
//! verifier and the speed baseline for the benchmark suite.

use alloc::vec;
use alloc::vec::Vec;

use crate::counters::Counters;
use crate::error::{ArrayError, InvariantViolation};
use crate::Word;

/// Reference array: O(N) init, direct indexing.
#[derive(Debug, Clone)]
pub struct FlatArray {
    a: Vec<Word>,
    ctr: Counters,
}

impl FlatArray {
    /// Creates an array of `n` cells, all zero.
    ///
    /// # Errors
    ///
    /// [`ArrayError::BadShape`] if `n` is zero.
    pub fn new(n: usize) -> Result<Self, ArrayError> {
        if n == 0 {
            return Err(ArrayError::BadShape { len: n, block: 1 });
        }
        Ok(Self {
            a: vec![0; n],
            ctr: Counters::default(),
        })
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.a.len()
    }

    /// Always false; zero-length arrays cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
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

    /// Sets every cell to `v` by filling the buffer.
    pub fn init(&mut self, v: Word) {
        self.ctr.inits += 1;
        self.a.fill(v);
    }

    /// Returns the value at `i`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] if `i >= len`.
    pub fn read(&mut self, i: usize) -> Result<Word, ArrayError> {
        if i >= self.a.len() {
            return Err(ArrayError::OutOfRange {
                index: i,
                len: self.a.len(),
            });
        }
        self.ctr.reads += 1;
        Ok(self.a[i])
    }

    /// Sets the value at `i` to `v`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] if `i >= len`.
    pub fn write(&mut self, i: usize, v: Word) -> Result<(), ArrayError> {
        if i >= self.a.len() {
            return Err(ArrayError::OutOfRange {
                index: i,
                len: self.a.len(),
            });
        }
        self.ctr.writes += 1;
        self.a[i] = v;
        Ok(())
    }

    /// Trivially succeeds; a flat buffer has no structure to violate.
    pub fn audit(&self) -> Result<(), InvariantViolation> {
        Ok(())
    }

    /// Boolean audit surface.
    #[must_use]
    pub fn audit_invariants(&self) -> bool {
        true
    }
}
