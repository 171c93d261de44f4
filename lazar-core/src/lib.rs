//! # lazar-core: Constant-Time-Initializable Arrays
//!
//! `lazar-core` is a `no_std` library of indexable integer containers whose
//! `init(v)`, which logically sets *every* cell to `v`, runs in O(1) time
//! and O(1) auxiliary space, while `read` and `write` stay O(1) worst-case. The
//! memory footprint is one buffer of exactly N words plus a handful of
//! scalars: no shadow bitmap, no per-cell stamps.
//!
//! ## How it works
//!
//! The buffer doubles as its own bookkeeping. Cells are grouped in aligned
//! blocks; a boundary counter splits blocks into a written side and an
//! unwritten side, and symmetric cross-boundary *chains* pair a logically
//! empty written-side block with an unwritten-side block holding displaced
//! user data. Chain pointers are told apart from arbitrary user words by a
//! conjunction of alignment, range, crossing, and echo checks, so no extra
//! tag storage is needed. Each write advances the boundary by at most one
//! block; `init` just resets the boundary and the implicit value.
//!
//! ## Implementations
//!
//! - [`Block2Array`]: block size 2; one alignment bit per chain endpoint.
//! - [`Block4Array`]: block size 4; two alignment bits, a direct-mode flag
//!   once the boundary swallows the array, and final-block metadata slots.
//! - [`FlatArray`]: O(N)-init reference used as oracle and baseline.
//!
//! All three implement the [`InitArray`] contract; [`DynArray`] packs them
//! into one runtime-selectable type for drivers.
//!
//! ## Quick start
//!
//! ```
//! use lazar_core::Block4Array;
//!
//! let mut arr = Block4Array::new(16)?;
//! arr.init(7);
//! assert_eq!(arr.read(11)?, 7);
//! arr.write(11, 42)?;
//! assert_eq!(arr.read(11)?, 42);
//! arr.init(0); // O(1): the 16 cells are not touched
//! assert_eq!(arr.read(11)?, 0);
//! # Ok::<(), lazar_core::ArrayError>(())
//! ```
//!
//! ## Module organization
//!
//! - [`contract`] - the `InitArray` trait and `DynArray` dispatch.
//! - [`block2`] / [`block4`] - the two in-place variants.
//! - [`flat`] - the reference implementation.
//! - [`counters`] - operation counters.
//! - [`error`] - access and audit error types.

#![no_std]
#![deny(missing_docs)]

extern crate alloc;

/// Block-size-2 in-place variant.
pub mod block2;

/// Block-size-4 in-place variant with direct-mode fast path.
pub mod block4;

/// Shared contract and runtime dispatch.
pub mod contract;

/// Operation counters.
pub mod counters;

/// Error types.
pub mod error;

/// Plain-buffer reference implementation.
pub mod flat;

pub use block2::Block2Array;
pub use block4::Block4Array;
pub use contract::{DynArray, InitArray};
pub use counters::Counters;
pub use error::{ArrayError, InvariantViolation};
pub use flat::FlatArray;

/// Cell value type: one signed machine word.
pub type Word = i64;
