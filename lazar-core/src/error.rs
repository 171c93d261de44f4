//! Error types for construction, access, and invariant audits.

use core::fmt;

/// Errors surfaced by container construction and per-cell access.
///
/// Every failure is a programmer error reported synchronously to the caller;
/// nothing is retried and a failed call leaves the container untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// Construction-time shape violation: the length is zero or not a
    /// multiple of the implementation's block size.
    BadShape {
        /// Requested length.
        len: usize,
        /// Block size the length must be a positive multiple of.
        block: usize,
    },
    /// `read`/`write` index out of bounds.
    OutOfRange {
        /// Offending index.
        index: usize,
        /// Container length.
        len: usize,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadShape { len, block } => {
                write!(f, "length {len} is not a positive multiple of {block}")
            }
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
        }
    }
}

impl core::error::Error for ArrayError {}

/// Structural invariant violations detected by an O(N) audit.
///
/// Audits are read-only and intended for tests; `read`/`write` never raise
/// these. Each variant names the blocks or slots involved so a failing test
/// can point at the broken structure directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Block `u` resolves a chain to `v`, but `v` does not resolve back to `u`.
    AsymmetricChain {
        /// Chain origin block.
        u: usize,
        /// Claimed partner block.
        v: usize,
    },
    /// A chain pair sits entirely on one side of the boundary.
    NonCrossingChain {
        /// Chain origin block.
        u: usize,
        /// Partner block on the same side.
        v: usize,
    },
    /// The boundary exceeds the block count.
    BoundaryOutOfRange {
        /// Boundary in blocks.
        boundary: usize,
        /// Total number of blocks.
        n_blocks: usize,
    },
    /// The direct-mode flag disagrees with the boundary position.
    FlagMismatch {
        /// Flag value.
        flag: bool,
        /// Boundary in blocks.
        boundary: usize,
        /// Total number of blocks.
        n_blocks: usize,
    },
    /// A final-block metadata slot holds a stale value.
    MetadataMismatch {
        /// Cell index of the metadata slot.
        slot: usize,
        /// Value the slot must hold.
        expected: i64,
        /// Value actually stored.
        found: i64,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AsymmetricChain { u, v } => {
                write!(f, "chain asymmetry: block {u} -> {v} without echo")
            }
            Self::NonCrossingChain { u, v } => {
                write!(f, "chain {u} <-> {v} does not cross the boundary")
            }
            Self::BoundaryOutOfRange { boundary, n_blocks } => {
                write!(f, "boundary {boundary} exceeds block count {n_blocks}")
            }
            Self::FlagMismatch {
                flag,
                boundary,
                n_blocks,
            } => {
                write!(
                    f,
                    "direct flag {flag} inconsistent with boundary {boundary}/{n_blocks}"
                )
            }
            Self::MetadataMismatch {
                slot,
                expected,
                found,
            } => {
                write!(f, "metadata slot {slot}: expected {expected}, found {found}")
            }
        }
    }
}

impl core::error::Error for InvariantViolation {}
