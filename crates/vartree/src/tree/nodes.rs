#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use super::{children, midpoint};
use crate::Moments;

/// A read-only view of one node in a [SegmentTree](crate::SegmentTree)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Position of the node in the heap-ordered slot array
    pub slot: usize,
    /// Distance from the root
    pub depth: usize,
    /// Inclusive start of the covered range
    pub start: usize,
    /// Inclusive end of the covered range
    pub end: usize,
    /// Aggregate of the covered range
    pub moments: Moments,
}

impl Node {
    /// Returns `true` if the node covers a single element
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.start == self.end
    }
    /// Number of elements covered by the node
    #[inline]
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Pre-order iterator over the nodes of a [SegmentTree](crate::SegmentTree)
///
/// Created by [SegmentTree::nodes](crate::SegmentTree::nodes).
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    slots: &'a [Moments],
    // (slot, depth, start, end) of nodes still to visit
    stack: Vec<(usize, usize, usize, usize)>,
}

impl<'a> Nodes<'a> {
    pub(super) fn new(slots: &'a [Moments], len: usize) -> Self {
        let stack = if len == 0 {
            Vec::new()
        } else {
            vec![(0, 0, 0, len - 1)]
        };
        Self { slots, stack }
    }
}

impl Iterator for Nodes<'_> {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        let (slot, depth, start, end) = self.stack.pop()?;
        if start < end {
            let mid = midpoint(start, end);
            let (left, right) = children(slot);
            self.stack.push((right, depth + 1, mid + 1, end));
            self.stack.push((left, depth + 1, start, mid));
        }
        Some(Node {
            slot,
            depth,
            start,
            end,
            moments: self.slots[slot],
        })
    }
}
