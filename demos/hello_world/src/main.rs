use vartree::SegmentTree;

fn main() {
    // Log to stdout (if you run with `RUST_LOG=debug`).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Build a tree over eight values
    let mut tree = SegmentTree::new(vec![4.0, 8.0, 6.0, 2.0, 10.0, 12.0, 14.0, 16.0]);

    // query the first four elements: 4, 8, 6, 2
    assert_eq!(tree.range_sum(0, 3), Ok(20.0));
    assert_eq!(tree.range_mean(0, 3), Ok(5.0));
    assert_eq!(tree.range_variance(0, 3), Ok(5.0));

    for (start, end) in [(0, 3), (2, 5), (0, 7), (4, 7)] {
        let moments = tree.range_moments(start, end).unwrap();
        println!(
            "[{start}, {end}] sum={:.2} mean={:.2} variance={:.4}",
            moments.sum(),
            moments.mean(),
            moments.variance()
        );
    }

    // replace 8 with 4 and watch the variance of the first half shrink
    tree.update(1, 4.0).unwrap();
    assert_eq!(tree.current_sequence()[1], 4.0);
    assert_eq!(tree.range_variance(0, 3), Ok(2.0));
    log::info!("variance after update: {:?}", tree.range_variance(0, 3));

    // out of range requests are rejected and leave the tree untouched
    assert!(tree.update(8, 1.0).is_err());
    assert!(tree.range_sum(3, 2).is_err());
    assert!(tree.range_sum(0, 8).is_err());

    // a single element has no variance
    let single = SegmentTree::new(vec![42.0]);
    assert_eq!(single.range_variance(0, 0), Ok(0.0));
    assert_eq!(single.range_mean(0, 0), Ok(42.0));

    // pulling both ends towards the mean reduces variability
    let mut tree = SegmentTree::new(vec![10.0, 20.0, 30.0, 40.0, 50.0]);
    let before = tree.range_variance(0, 4).unwrap();
    tree.update(0, 30.0).unwrap();
    tree.update(4, 30.0).unwrap();
    let after = tree.range_variance(0, 4).unwrap();
    println!("variance [0, 4]: {before:.4} -> {after:.4}");
    assert!(after < before);

    for node in tree.nodes() {
        println!(
            "{:indent$}[{}, {}]: {}",
            "",
            node.start,
            node.end,
            node.moments,
            indent = node.depth * 2
        );
    }
}
