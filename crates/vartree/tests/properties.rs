use proptest::prelude::*;
use vartree::{Moments, SegmentTree};

const EPS: f64 = 1e-9;

fn values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000i32..1000, 1..200)
        .prop_map(|v| v.into_iter().map(|x| f64::from(x) / 4.0).collect())
}

fn moments() -> impl Strategy<Value = Moments> {
    prop::collection::vec(-1000i32..1000, 0..20)
        .prop_map(|v| Moments::from_values(v.into_iter().map(f64::from)))
}

fn population_variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n
}

/// Relative tolerance for sums of squares that grow with the input magnitude
fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS * f64::max(1.0, f64::max(a.abs(), b.abs()))
}

proptest! {
    #[test]
    fn merge_identity(x in moments()) {
        prop_assert_eq!(Moments::merge(Moments::empty(), x), x);
        prop_assert_eq!(Moments::merge(x, Moments::empty()), x);
    }

    #[test]
    fn merge_associativity(a in moments(), b in moments(), c in moments()) {
        let left = Moments::merge(Moments::merge(a, b), c);
        let right = Moments::merge(a, Moments::merge(b, c));
        prop_assert_eq!(left.count(), right.count());
        prop_assert!(approx(left.sum(), right.sum()));
        prop_assert!(approx(left.sum_sq(), right.sum_sq()));
    }

    #[test]
    fn build_matches_direct_computation(values in values()) {
        let tree = SegmentTree::build(&values);
        let n = values.len();
        let sum: f64 = values.iter().sum();
        prop_assert!(approx(tree.range_sum(0, n - 1).unwrap(), sum));
        let variance = tree.range_variance(0, n - 1).unwrap();
        prop_assert!((variance - population_variance(&values)).abs() < EPS);
        prop_assert!(variance >= 0.0);
    }

    #[test]
    fn ranges_match_direct_computation(values in values(), a in any::<prop::sample::Index>(), b in any::<prop::sample::Index>()) {
        let tree = SegmentTree::build(&values);
        let (start, end) = {
            let (x, y) = (a.index(values.len()), b.index(values.len()));
            (x.min(y), x.max(y))
        };
        let range = &values[start..=end];
        prop_assert!(approx(tree.range_sum(start, end).unwrap(), range.iter().sum()));
        prop_assert!((tree.range_variance(start, end).unwrap() - population_variance(range)).abs() < EPS);
        prop_assert!(tree.range_sum(end + 1, end).is_err());
        prop_assert!(tree.range_sum(start, values.len()).is_err());
    }

    #[test]
    fn update_consistency(
        values in values(),
        i in any::<prop::sample::Index>(),
        v in -1000i32..1000,
        r in any::<prop::sample::Index>(),
    ) {
        let mut tree = SegmentTree::build(&values);
        let n = values.len();
        let index = i.index(n);
        let value = f64::from(v);

        // a range that excludes `index`, answered before the update
        let other = r.index(n);
        let excluded = if other < index {
            Some((other, index - 1))
        } else if other > index {
            Some((index + 1, other))
        } else {
            None
        };
        let before = excluded.map(|(s, e)| tree.range_moments(s, e).unwrap());

        tree.update(index, value).unwrap();

        let mut expected = values.clone();
        expected[index] = value;
        prop_assert_eq!(tree.current_sequence(), expected.clone());
        prop_assert!(approx(tree.range_sum(0, n - 1).unwrap(), expected.iter().sum()));
        prop_assert_eq!(tree.range_sum(index, index).unwrap(), value);
        if let (Some((s, e)), Some(before)) = (excluded, before) {
            prop_assert_eq!(tree.range_moments(s, e).unwrap(), before);
        }
    }

    #[test]
    fn rejected_requests_leave_tree_unchanged(values in values(), v in -1000i32..1000) {
        let mut tree = SegmentTree::build(&values);
        let n = values.len();
        let slots = tree.slots().to_vec();

        prop_assert!(tree.update(n, f64::from(v)).unwrap_err().is_index_out_of_range());
        prop_assert!(tree.range_variance(0, n).unwrap_err().is_invalid_range());
        prop_assert_eq!(tree.slots(), &slots[..]);
        prop_assert_eq!(tree.current_sequence(), values);
    }
}

#[test]
fn negative_indices_are_rejected_at_conversion() {
    let mut tree = SegmentTree::new(vec![1.0, 2.0, 3.0]);
    let index: i64 = -1;
    assert!(usize::try_from(index).is_err());
    // a wrapped negative index lands far out of range
    assert!(tree.update(index as usize, 0.0).is_err());
    assert_eq!(tree.current_sequence(), vec![1.0, 2.0, 3.0]);
}
