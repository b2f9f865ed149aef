//! Latency profiling utilities for vartree
//!
//! Operations are timed with [Measure] guards (usually through [profile_scope]) and recorded
//! as nanoseconds into a [Sketch] from which [Percentiles] can be read.

use core::cell::RefCell;
use minstant::Instant;
use sketches_ddsketch::{Config, DDSketch};
use std::rc::Rc;

/// Creates a [Measure] that records the latency of the enclosing scope into the given [Sketch]
#[macro_export]
macro_rules! profile_scope {
    ($sketch:expr) => {
        let _measure = $crate::Measure::new($sketch);
    };
}

/// Reads a fixed set of percentiles out of a DDSketch
pub fn sketch_percentiles(sketch: &DDSketch) -> Percentiles {
    let quantile = |q: f64| sketch.quantile(q).ok().flatten().unwrap_or(0.0);
    Percentiles {
        count: sketch.count(),
        min: sketch.min().unwrap_or(0.0),
        p50: quantile(0.5),
        p99: quantile(0.99),
        p99_9: quantile(0.999),
        p99_99: quantile(0.9999),
        p99_999: quantile(0.99999),
        max: sketch.max().unwrap_or(0.0),
    }
}

/// Latency percentiles in nanoseconds
#[derive(Default, Clone, Copy)]
pub struct Percentiles {
    /// Number of recorded samples
    pub count: usize,
    /// Smallest recorded latency
    pub min: f64,
    /// Median latency
    pub p50: f64,
    /// 99th percentile
    pub p99: f64,
    /// 99.9th percentile
    pub p99_9: f64,
    /// 99.99th percentile
    pub p99_99: f64,
    /// 99.999th percentile
    pub p99_999: f64,
    /// Largest recorded latency
    pub max: f64,
}

impl std::fmt::Debug for Percentiles {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Percentiles")
            .field("count", &self.count)
            .field("min", &format_args!("{:.2}ns", self.min))
            .field("p50", &format_args!("{:.2}ns", self.p50))
            .field("p99", &format_args!("{:.2}ns", self.p99))
            .field("p99.9", &format_args!("{:.2}ns", self.p99_9))
            .field("p99.99", &format_args!("{:.2}ns", self.p99_99))
            .field("p99.999", &format_args!("{:.2}ns", self.p99_999))
            .field("max", &format_args!("{:.2}ns", self.max))
            .finish()
    }
}

/// A shared latency sketch
///
/// Clones share the same underlying [DDSketch].
#[derive(Clone)]
pub struct Sketch {
    inner: Rc<RefCell<DDSketch>>,
}

impl Default for Sketch {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(DDSketch::new(Config::new(0.01, 2048, 1.0e-9)))),
        }
    }
}

impl Sketch {
    /// Records a sample
    #[inline]
    pub fn add(&self, data: f64) {
        self.inner.borrow_mut().add(data)
    }
    /// Number of recorded samples
    pub fn count(&self) -> usize {
        self.inner.borrow().count()
    }
    /// Returns the current percentiles of this sketch
    pub fn percentiles(&self) -> Percentiles {
        sketch_percentiles(&self.inner.borrow())
    }
}

/// Scope guard that records its lifetime into a [Sketch] when dropped
// Inspired by https://github.com/spacejam/sled/blob/main/src/metrics.rs
pub struct Measure {
    start: Instant,
    sketch: Sketch,
}

impl Measure {
    /// Starts measuring against the given sketch
    #[inline]
    pub fn new(sketch: &Sketch) -> Measure {
        Measure {
            sketch: sketch.clone(), // clones Rc
            start: Instant::now(),
        }
    }
}

impl Drop for Measure {
    #[inline]
    fn drop(&mut self) {
        self.sketch.add(self.start.elapsed().as_nanos() as f64);
    }
}
