//! The shared container contract and runtime dispatch.
//!
//! [`InitArray`] is the capability surface every implementation exposes to
//! clients (benchmarks, verifiers): `init`/`read`/`write` plus counters and
//! the audit hook. [`DynArray`] is a tagged sum over the concrete
//! implementations so a driver can select one at runtime without boxing.

use crate::counters::Counters;
use crate::error::{ArrayError, InvariantViolation};
use crate::{Block2Array, Block4Array, FlatArray, Word};

/// Contract shared by every initializable-array implementation.
///
/// `read` takes `&mut self`: implementations keep operation counters as
/// plain fields and bump them on every successful call. Logical state is
/// only changed by `init` and `write`.
pub trait InitArray {
    /// Number of cells.
    fn len(&self) -> usize;

    /// True when the container holds no cells (never, for the provided
    /// implementations).
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short static name identifying the implementation.
    fn name(&self) -> &'static str;

    /// Logically sets every cell to `v`.
    fn init(&mut self, v: Word);

    /// Returns the logical value at `i`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] if `i` is out of bounds.
    fn read(&mut self, i: usize) -> Result<Word, ArrayError>;

    /// Sets the logical value at `i` to `v`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] if `i` is out of bounds.
    fn write(&mut self, i: usize, v: Word) -> Result<(), ArrayError>;

    /// Operation counters since the last reset.
    fn counters(&self) -> Counters;

    /// Zeroes the operation counters.
    fn reset_counters(&mut self);

    /// O(N) read-only structural audit; true when all invariants hold.
    fn audit_invariants(&self) -> bool;
}

macro_rules! impl_init_array {
    ($ty:ty, $name:literal) => {
        impl InitArray for $ty {
            fn len(&self) -> usize {
                Self::len(self)
            }
            fn name(&self) -> &'static str {
                $name
            }
            fn init(&mut self, v: Word) {
                Self::init(self, v);
            }
            fn read(&mut self, i: usize) -> Result<Word, ArrayError> {
                Self::read(self, i)
            }
            fn write(&mut self, i: usize, v: Word) -> Result<(), ArrayError> {
                Self::write(self, i, v)
            }
            fn counters(&self) -> Counters {
                Self::counters(self)
            }
            fn reset_counters(&mut self) {
                Self::reset_counters(self);
            }
            fn audit_invariants(&self) -> bool {
                Self::audit_invariants(self)
            }
        }
    };
}

impl_init_array!(Block2Array, "block2");
impl_init_array!(Block4Array, "block4");
impl_init_array!(FlatArray, "flat");

/// Runtime-selected array implementation.
///
/// The benchmark driver and verifier pick an implementation by name; this
/// enum gives them one concrete type to hold it in, dispatching each call
/// with a match instead of a vtable.
#[derive(Debug, Clone)]
pub enum DynArray {
    /// Block-size-2 in-place variant.
    Block2(Block2Array),
    /// Block-size-4 in-place variant.
    Block4(Block4Array),
    /// O(N)-init reference.
    Flat(FlatArray),
}

impl DynArray {
    /// Detailed audit across all variants.
    ///
    /// # Errors
    ///
    /// The first [`InvariantViolation`] found.
    pub fn audit(&self) -> Result<(), InvariantViolation> {
        match self {
            Self::Block2(a) => a.audit(),
            Self::Block4(a) => a.audit(),
            Self::Flat(a) => a.audit(),
        }
    }
}

impl InitArray for DynArray {
    fn len(&self) -> usize {
        match self {
            Self::Block2(a) => a.len(),
            Self::Block4(a) => a.len(),
            Self::Flat(a) => a.len(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Block2(a) => InitArray::name(a),
            Self::Block4(a) => InitArray::name(a),
            Self::Flat(a) => InitArray::name(a),
        }
    }

    fn init(&mut self, v: Word) {
        match self {
            Self::Block2(a) => a.init(v),
            Self::Block4(a) => a.init(v),
            Self::Flat(a) => a.init(v),
        }
    }

    fn read(&mut self, i: usize) -> Result<Word, ArrayError> {
        match self {
            Self::Block2(a) => a.read(i),
            Self::Block4(a) => a.read(i),
            Self::Flat(a) => a.read(i),
        }
    }

    fn write(&mut self, i: usize, v: Word) -> Result<(), ArrayError> {
        match self {
            Self::Block2(a) => a.write(i, v),
            Self::Block4(a) => a.write(i, v),
            Self::Flat(a) => a.write(i, v),
        }
    }

    fn counters(&self) -> Counters {
        match self {
            Self::Block2(a) => a.counters(),
            Self::Block4(a) => a.counters(),
            Self::Flat(a) => a.counters(),
        }
    }

    fn reset_counters(&mut self) {
        match self {
            Self::Block2(a) => a.reset_counters(),
            Self::Block4(a) => a.reset_counters(),
            Self::Flat(a) => a.reset_counters(),
        }
    }

    fn audit_invariants(&self) -> bool {
        self.audit().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dyn_array_dispatches_by_variant() {
        let mut arr = DynArray::Block2(Block2Array::new(8).unwrap());
        assert_eq!(arr.name(), "block2");
        arr.init(4);
        assert_eq!(arr.read(3).unwrap(), 4);
        arr.write(3, 9).unwrap();
        assert_eq!(arr.read(3).unwrap(), 9);
        assert!(arr.audit_invariants());
    }
}
