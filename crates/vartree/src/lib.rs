//! vartree is a segment tree that answers range sum, mean and variance queries over a fixed-length sequence
//!
//! Every node of the tree stores the [Moments] (sum, sum of squares and count) of the range it covers.
//! Since moments combine through plain addition, any range can be answered by merging the
//! `O(log n)` nodes that tile it, and point updates only touch the nodes on a single root-to-leaf path.
//!
//! # Example
//!
//! ```
//! use vartree::SegmentTree;
//!
//! let mut tree = SegmentTree::new(vec![4.0, 8.0, 6.0, 2.0, 10.0, 12.0, 14.0, 16.0]);
//! assert_eq!(tree.range_mean(0, 3), Ok(5.0));
//! assert_eq!(tree.range_variance(0, 3), Ok(5.0));
//!
//! tree.update(1, 4.0).unwrap();
//! assert_eq!(tree.range_sum(0, 3), Ok(16.0));
//! assert!(tree.update(8, 1.0).is_err());
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(nonstandard_style, missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

use core::{fmt, fmt::Display};

/// Aggregate of sum, sum of squares and count
pub mod moments;
/// Array-backed segment tree over [Moments]
pub mod tree;

pub use moments::Moments;
pub use tree::{Node, Nodes, SegmentTree};

/// Error variants that may arise when accessing a [SegmentTree]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A point update addressed an index outside of `[0, len)`
    IndexOutOfRange {
        /// The rejected index
        index: usize,
        /// Number of elements in the tree
        len: usize,
    },
    /// A range query with `start > end` or `end >= len`
    InvalidRange {
        /// Inclusive start of the rejected range
        start: usize,
        /// Inclusive end of the rejected range
        end: usize,
        /// Number of elements in the tree
        len: usize,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfRange { index, len: 0 } => {
                write!(f, "index {index} out of range for empty tree")
            }
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range [0, {}]", len - 1)
            }
            Error::InvalidRange { start, end, len: 0 } => {
                write!(f, "invalid range [{start}, {end}] for empty tree")
            }
            Error::InvalidRange { start, end, len } => {
                write!(f, "invalid range [{start}, {end}], expected bounds within [0, {}]", len - 1)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Returns `true` if the error represents [Error::IndexOutOfRange]
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Error::IndexOutOfRange { .. })
    }
    /// Returns `true` if the error represents [Error::InvalidRange]
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Error::InvalidRange { .. })
    }
}

/// Result type returned by fallible [SegmentTree] operations
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::IndexOutOfRange { index: 5, len: 5 };
        assert_eq!(err.to_string(), "index 5 out of range [0, 4]");
        assert!(err.is_index_out_of_range());
        assert!(!err.is_invalid_range());

        let err = Error::InvalidRange {
            start: 3,
            end: 2,
            len: 8,
        };
        assert_eq!(
            err.to_string(),
            "invalid range [3, 2], expected bounds within [0, 7]"
        );
        assert!(err.is_invalid_range());

        let err = Error::InvalidRange {
            start: 0,
            end: 0,
            len: 0,
        };
        assert_eq!(err.to_string(), "invalid range [0, 0] for empty tree");
    }
}
