use core::{fmt, ops::Add};

/// Sum, sum of squares and count over a contiguous range of values
///
/// Moments form a commutative monoid under [Moments::merge] with [Moments::IDENTITY] as the identity,
/// which is what lets a [SegmentTree](crate::SegmentTree) answer a range by merging whichever nodes tile it.
/// Mean and variance are derived on demand and never stored.
///
/// # Example
///
/// ```
/// use vartree::Moments;
///
/// let a = Moments::leaf(2.0);
/// let b = Moments::leaf(4.0);
/// let m = Moments::merge(a, b);
/// assert_eq!(m.count(), 2);
/// assert_eq!(m.mean(), 3.0);
/// assert_eq!(m.variance(), 1.0);
/// assert_eq!(Moments::merge(Moments::empty(), m), m);
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    sum: f64,
    sum_sq: f64,
    count: u64,
}

impl Default for Moments {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Moments {
    /// Identity value for [Moments::merge]
    pub const IDENTITY: Moments = Moments::new(0.0, 0.0, 0);

    /// Creates moments from raw parts
    #[inline]
    pub const fn new(sum: f64, sum_sq: f64, count: u64) -> Self {
        Self { sum, sum_sq, count }
    }
    /// Returns the identity aggregate, the contribution of an empty range
    #[inline]
    pub const fn empty() -> Self {
        Self::IDENTITY
    }
    /// Lifts a single value into moments
    #[inline]
    pub fn leaf(value: f64) -> Self {
        Self::new(value, value * value, 1)
    }
    /// Combines the moments of two disjoint ranges into the moments of their union
    #[inline]
    pub fn merge(a: Self, b: Self) -> Self {
        Self::new(a.sum + b.sum, a.sum_sq + b.sum_sq, a.count + b.count)
    }
    /// Builds moments by merging the leaf of every value
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        values
            .into_iter()
            .map(Self::leaf)
            .fold(Self::IDENTITY, Self::merge)
    }

    /// Sum of all values
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }
    /// Sum of the squared values
    #[inline]
    pub fn sum_sq(&self) -> f64 {
        self.sum_sq
    }
    /// Number of values
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }
    /// Returns `true` if no values are covered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Arithmetic mean, or `0.0` when empty
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Population variance `E[X²] - (E[X])²`, or `0.0` when empty
    ///
    /// The result is clamped at zero since cancellation may otherwise produce a tiny negative value
    /// for a range of identical values.
    #[inline]
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let mean_sq = self.sum_sq / self.count as f64;
        f64::max(0.0, mean_sq - mean * mean)
    }

    /// Population standard deviation
    #[cfg(feature = "std")]
    #[inline]
    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }
}

impl Add for Moments {
    type Output = Moments;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Moments::merge(self, rhs)
    }
}

impl FromIterator<f64> for Moments {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl fmt::Display for Moments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(sum: {}, sum_sq: {}, count: {}, var: {:.4})",
            self.sum,
            self.sum_sq,
            self.count,
            self.variance()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Moments, b: Moments) -> bool {
        (a.sum - b.sum).abs() < 1e-9 && (a.sum_sq - b.sum_sq).abs() < 1e-9 && a.count == b.count
    }

    #[test]
    fn identity_test() {
        let x = Moments::new(7.5, 40.25, 3);
        assert_eq!(Moments::merge(Moments::empty(), x), x);
        assert_eq!(Moments::merge(x, Moments::empty()), x);
        assert_eq!(Moments::default(), Moments::IDENTITY);
        assert!(Moments::empty().is_empty());
    }

    #[test]
    fn associativity_test() {
        let a = Moments::from_values([0.1, 0.2]);
        let b = Moments::from_values([1e3, -4.5, 3.3]);
        let c = Moments::leaf(0.7);
        let left = Moments::merge(Moments::merge(a, b), c);
        let right = Moments::merge(a, Moments::merge(b, c));
        assert!(close(left, right));
        assert!(close(a + b, b + a));
    }

    #[test]
    fn leaf_test() {
        let leaf = Moments::leaf(-3.0);
        assert_eq!(leaf.sum(), -3.0);
        assert_eq!(leaf.sum_sq(), 9.0);
        assert_eq!(leaf.count(), 1);
        assert_eq!(leaf.mean(), -3.0);
        assert_eq!(leaf.variance(), 0.0);
    }

    #[test]
    fn empty_statistics_test() {
        let empty = Moments::empty();
        assert_eq!(empty.mean(), 0.0);
        assert_eq!(empty.variance(), 0.0);
    }

    #[test]
    fn variance_test() {
        let m: Moments = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().collect();
        assert_eq!(m.count(), 8);
        assert_eq!(m.mean(), 5.0);
        assert_eq!(m.variance(), 4.0);
        assert_eq!(m.stddev(), 2.0);
    }

    #[test]
    fn variance_never_negative() {
        let m = Moments::from_values([0.1; 7]);
        assert!(m.variance() >= 0.0);
        let m = Moments::from_values([5.0, 5.0, 5.0, 5.0]);
        assert_eq!(m.variance(), 0.0);
    }

    #[test]
    fn display_test() {
        let m = Moments::from_values([1.0, 3.0]);
        assert_eq!(m.to_string(), "(sum: 4, sum_sq: 10, count: 2, var: 1.0000)");
    }
}
