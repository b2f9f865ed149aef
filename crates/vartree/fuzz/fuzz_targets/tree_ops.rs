#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vartree::SegmentTree;

#[derive(Debug, Arbitrary)]
enum Op {
    Update(u8, i16),
    Query(u8, u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    values: Vec<i16>,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let mut model: Vec<f64> = input.values.iter().copied().map(f64::from).collect();
    let mut tree = SegmentTree::new(model.clone());

    for op in input.ops {
        match op {
            Op::Update(index, value) => {
                let index = usize::from(index);
                let result = tree.update(index, f64::from(value));
                if index < model.len() {
                    assert!(result.is_ok());
                    model[index] = f64::from(value);
                } else {
                    assert!(result.unwrap_err().is_index_out_of_range());
                }
            }
            Op::Query(start, end) => {
                let (start, end) = (usize::from(start), usize::from(end));
                match tree.range_moments(start, end) {
                    Ok(moments) => {
                        let range = &model[start..=end];
                        let sum: f64 = range.iter().sum();
                        assert_eq!(moments.count() as usize, range.len());
                        assert_eq!(moments.sum(), sum);
                        assert!(moments.variance() >= 0.0);
                    }
                    Err(err) => {
                        assert!(err.is_invalid_range());
                        assert!(start > end || end >= model.len());
                    }
                }
            }
        }
    }
    assert_eq!(tree.current_sequence(), model);
});
