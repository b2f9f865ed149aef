//! Console reports over a [SegmentTree]

use vartree::{Moments, SegmentTree};

pub fn sequence(tree: &SegmentTree) {
    println!("sequence ({} values): {:?}", tree.len(), tree.current_sequence());
}

pub fn range(tree: &SegmentTree, start: usize, end: usize) -> vartree::Result<()> {
    let moments = tree.range_moments(start, end)?;
    println!(
        "[{start}, {end}]: sum={:.2} mean={:.2} variance={:.4} stddev={:.4}",
        moments.sum(),
        moments.mean(),
        moments.variance(),
        moments.stddev()
    );
    Ok(())
}

/// Reports consecutive windows of `width` values, the last one possibly shorter, followed by the
/// most stable and most variable window and the change in variance from the first to the last
pub fn windows(tree: &SegmentTree, width: usize) -> vartree::Result<()> {
    let windows = window_moments(tree, width)?;
    for (i, (start, end, moments)) in windows.iter().enumerate() {
        println!(
            "window {} [{start}, {end}]: mean={:.2} variance={:.4} cv={}",
            i + 1,
            moments.mean(),
            moments.variance(),
            coefficient_of_variation(moments.stddev(), moments.mean())
        );
    }

    let Some((stable, variable)) = extremes(&windows) else {
        return Ok(());
    };
    let (start, end, moments) = windows[stable];
    println!(
        "most stable: window {} [{start}, {end}] variance={:.4}",
        stable + 1,
        moments.variance()
    );
    let (start, end, moments) = windows[variable];
    println!(
        "most variable: window {} [{start}, {end}] variance={:.4}",
        variable + 1,
        moments.variance()
    );

    if let [(_, _, first), .., (_, _, last)] = windows.as_slice() {
        println!(
            "variance change from first to last window: {:.4} -> {:.4} ({})",
            first.variance(),
            last.variance(),
            relative_change(first.variance(), last.variance())
        );
    }
    Ok(())
}

/// Moments of consecutive windows of `width` values as `(start, end, moments)`
fn window_moments(
    tree: &SegmentTree,
    width: usize,
) -> vartree::Result<Vec<(usize, usize, Moments)>> {
    (0..tree.len())
        .step_by(width)
        .map(|start| {
            let end = usize::min(start + width - 1, tree.len() - 1);
            tree.range_moments(start, end).map(|moments| (start, end, moments))
        })
        .collect()
}

/// Indices of the lowest and highest variance window, the earliest one on ties
fn extremes(windows: &[(usize, usize, Moments)]) -> Option<(usize, usize)> {
    let variances = || windows.iter().map(|(_, _, moments)| moments.variance()).enumerate();
    let (min, _) = variances().min_by(|(_, a), (_, b)| a.total_cmp(b))?;
    let (max, _) = variances().rev().max_by(|(_, a), (_, b)| a.total_cmp(b))?;
    Some((min, max))
}

fn relative_change(from: f64, to: f64) -> String {
    if from == 0.0 {
        "n/a".to_string()
    } else {
        format!("{:+.2}%", (to - from) / from * 100.0)
    }
}

fn coefficient_of_variation(stddev: f64, mean: f64) -> String {
    if mean == 0.0 {
        "n/a".to_string()
    } else {
        format!("{:.2}%", stddev / mean.abs() * 100.0)
    }
}

pub fn dump(tree: &SegmentTree) {
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
