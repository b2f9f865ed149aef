mod nodes;

#[cfg(feature = "profiler")]
mod stats;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::{Error, Moments, Result};

pub use nodes::{Node, Nodes};

#[cfg(feature = "profiler")]
pub use stats::Stats;

#[cfg(feature = "profiler")]
use vartree_stats::profile_scope;

/// Returns the left and right child slots of `slot`
#[inline]
pub(crate) const fn children(slot: usize) -> (usize, usize) {
    (2 * slot + 1, 2 * slot + 2)
}

/// Split point of the inclusive range `[start, end]`, the left half being `[start, mid]`
#[inline]
pub(crate) const fn midpoint(start: usize, end: usize) -> usize {
    start + (end - start) / 2
}

/// A static-size segment tree answering range sum, mean and variance queries
///
/// # How it works
///
/// The tree keeps `4 * n` [Moments] slots in binary-heap layout: the root lives at slot `0` and the
/// children of slot `i` at `2i + 1` and `2i + 2`. A node covering `[start, end]` splits at
/// `mid = (start + end) / 2` into `[start, mid]` and `[mid + 1, end]`, so node ranges are implicit
/// and never stored.
///
/// A range query returns a node's aggregate as-is whenever the node lies fully inside the query,
/// skips nodes outside of it, and only recurses where the two partially overlap. This visits
/// `O(log n)` nodes. A point update rewrites one leaf and re-merges its ancestors.
///
/// The tree also owns a copy of the input sequence that is kept in sync with every update,
/// see [SegmentTree::current_sequence].
///
/// ## Example
///
/// ```
/// use vartree::SegmentTree;
///
/// let mut tree = SegmentTree::new(vec![10.0, 20.0, 30.0, 40.0, 50.0]);
/// let before = tree.range_variance(0, 4).unwrap();
///
/// tree.update(0, 30.0).unwrap();
/// tree.update(4, 30.0).unwrap();
///
/// assert_eq!(tree.current_sequence(), vec![30.0, 20.0, 30.0, 40.0, 30.0]);
/// assert!(tree.range_variance(0, 4).unwrap() < before);
/// ```
#[derive(Debug, Default)]
pub struct SegmentTree {
    /// Source of truth for individual element values
    values: Vec<f64>,
    /// Heap-ordered node aggregates
    slots: Vec<Moments>,
    #[cfg(feature = "profiler")]
    stats: Stats,
}

impl SegmentTree {
    /// Builds a tree over the given values in `O(n)` time
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        #[cfg(feature = "profiler")]
        let stats = Stats::default();
        #[cfg(feature = "profiler")]
        profile_scope!(&stats.build);

        let values = values.into();
        let len = values.len();
        let mut tree = Self {
            slots: vec![Moments::IDENTITY; 4 * len],
            values,
            #[cfg(feature = "profiler")]
            stats: stats.clone(),
        };
        if len > 0 {
            tree.build_slot(0, 0, len - 1);
        }
        log::debug!(
            "built segment tree over {} values using {} slots",
            len,
            tree.slots.len()
        );
        tree
    }

    /// Builds a tree over a copy of the given slice
    ///
    /// See [SegmentTree::new].
    pub fn build(values: &[f64]) -> Self {
        Self::new(values.to_vec())
    }

    fn build_slot(&mut self, slot: usize, start: usize, end: usize) {
        if start == end {
            self.slots[slot] = Moments::leaf(self.values[start]);
            return;
        }
        let mid = midpoint(start, end);
        let (left, right) = children(slot);
        self.build_slot(left, start, mid);
        self.build_slot(right, mid + 1, end);
        self.slots[slot] = Moments::merge(self.slots[left], self.slots[right]);
    }

    /// Sets the element at `index` to `value` in `O(log n)` time
    ///
    /// Returns [Error::IndexOutOfRange] and leaves the tree untouched if `index >= len`.
    ///
    /// # Example
    ///
    /// ```
    /// use vartree::SegmentTree;
    ///
    /// let mut tree = SegmentTree::new(vec![1.0, 2.0, 3.0]);
    /// tree.update(2, 6.0).unwrap();
    /// assert_eq!(tree.range_sum(0, 2), Ok(9.0));
    /// assert!(tree.update(3, 0.0).unwrap_err().is_index_out_of_range());
    /// ```
    pub fn update(&mut self, index: usize, value: f64) -> Result<()> {
        let len = self.len();
        if index >= len {
            log::trace!("rejected update at index {} for tree of length {}", index, len);
            return Err(Error::IndexOutOfRange { index, len });
        }

        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        self.values[index] = value;
        self.update_slot(0, 0, len - 1, index, value);
        Ok(())
    }

    fn update_slot(&mut self, slot: usize, start: usize, end: usize, index: usize, value: f64) {
        if start == end {
            self.slots[slot] = Moments::leaf(value);
            return;
        }
        let mid = midpoint(start, end);
        let (left, right) = children(slot);
        if index <= mid {
            self.update_slot(left, start, mid, index, value);
        } else {
            self.update_slot(right, mid + 1, end, index, value);
        }
        self.slots[slot] = Moments::merge(self.slots[left], self.slots[right]);
    }

    /// Returns the [Moments] of the inclusive range `[start, end]` in `O(log n)` time
    ///
    /// Returns [Error::InvalidRange] if `start > end` or `end >= len`, which includes every range of
    /// an empty tree.
    pub fn range_moments(&self, start: usize, end: usize) -> Result<Moments> {
        let len = self.len();
        if start > end || end >= len {
            log::trace!("rejected range [{}, {}] for tree of length {}", start, end, len);
            return Err(Error::InvalidRange { start, end, len });
        }

        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        Ok(self.query_slot(0, 0, len - 1, start, end))
    }

    fn query_slot(&self, slot: usize, start: usize, end: usize, lo: usize, hi: usize) -> Moments {
        // no overlap
        if hi < start || lo > end {
            return Moments::IDENTITY;
        }
        // node lies fully inside the query
        if lo <= start && end <= hi {
            return self.slots[slot];
        }
        let mid = midpoint(start, end);
        let (left, right) = children(slot);
        Moments::merge(
            self.query_slot(left, start, mid, lo, hi),
            self.query_slot(right, mid + 1, end, lo, hi),
        )
    }

    /// Sum of the inclusive range `[start, end]`
    #[inline]
    pub fn range_sum(&self, start: usize, end: usize) -> Result<f64> {
        self.range_moments(start, end).map(|m| m.sum())
    }

    /// Mean of the inclusive range `[start, end]`
    #[inline]
    pub fn range_mean(&self, start: usize, end: usize) -> Result<f64> {
        self.range_moments(start, end).map(|m| m.mean())
    }

    /// Population variance of the inclusive range `[start, end]`
    ///
    /// Never negative, see [Moments::variance].
    #[inline]
    pub fn range_variance(&self, start: usize, end: usize) -> Result<f64> {
        self.range_moments(start, end).map(|m| m.variance())
    }

    /// Population standard deviation of the inclusive range `[start, end]`
    #[cfg(feature = "std")]
    #[inline]
    pub fn range_stddev(&self, start: usize, end: usize) -> Result<f64> {
        self.range_moments(start, end).map(|m| m.stddev())
    }

    /// Returns a copy of the current sequence including all applied updates
    pub fn current_sequence(&self) -> Vec<f64> {
        self.values.clone()
    }

    /// Returns the current value at `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Number of elements in the tree
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the tree holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Moments of the whole sequence, or the identity if the tree is empty
    #[inline]
    pub fn total(&self) -> Moments {
        self.slots.first().copied().unwrap_or_default()
    }

    /// The heap-ordered slot array
    ///
    /// Slots that do not cover any range hold [Moments::IDENTITY].
    #[inline]
    pub fn slots(&self) -> &[Moments] {
        &self.slots
    }

    /// Returns a pre-order iterator over every node together with the range it covers
    ///
    /// # Example
    ///
    /// ```
    /// use vartree::SegmentTree;
    ///
    /// let tree = SegmentTree::new(vec![1.0, 2.0, 3.0, 4.0]);
    /// for node in tree.nodes() {
    ///     println!("{:indent$}[{}, {}]: {}", "", node.start, node.end, node.moments, indent = node.depth * 2);
    /// }
    /// assert_eq!(tree.nodes().filter(|n| n.is_leaf()).count(), 4);
    /// ```
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes::new(&self.slots, self.len())
    }

    /// Returns latency stats of this tree
    ///
    /// A cloned tree starts with empty stats and records its own operations.
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

// Sketches sit behind `Rc`, so a derived `Clone` would share them with the original.
impl Clone for SegmentTree {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            slots: self.slots.clone(),
            #[cfg(feature = "profiler")]
            stats: Stats::default(),
        }
    }
}

impl From<Vec<f64>> for SegmentTree {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<f64> for SegmentTree {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}
