//! Operation counters shared by every array implementation.
//!
//! Counters are plain scalars mutated on the operating thread. They exist so
//! benchmarks and tests can observe *how* an implementation serviced a
//! workload (how many blocks were relocated, how many chain conversions
//! happened) without instrumenting the buffer itself.

/// Per-container operation counters.
///
/// All counters are non-decreasing between [`reset`](Counters::reset) calls.
/// Increment sites:
///
/// | Counter | Incremented by |
/// |---------|----------------|
/// | `reads` | every successful `read` |
/// | `writes` | every successful `write` |
/// | `inits` | every `init` (exactly once per call) |
/// | `relocations` | block moves during `extend` and written-side swaps |
/// | `conversions` | `make_chain`, and `break_chain` when a chain existed |
///
/// `break_chain` on an already-unchained block does **not** increment
/// `conversions`; counter-based tests rely on that guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Successful `read` calls.
    pub reads: u64,
    /// Successful `write` calls.
    pub writes: u64,
    /// `init` calls.
    pub inits: u64,
    /// Block relocations (boundary advancement and written-side swaps).
    pub relocations: u64,
    /// Chain conversions (chains made or broken).
    pub conversions: u64,
}

impl Counters {
    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_zeroes_everything() {
        let mut c = Counters {
            reads: 3,
            writes: 1,
            inits: 2,
            relocations: 7,
            conversions: 9,
        };
        c.reset();
        assert_eq!(c, Counters::default());
    }
}
