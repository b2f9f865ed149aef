use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vartree_stats::Sketch;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");
    group.bench_function("profile_scope", |b| {
        let sketch = Sketch::default();
        b.iter(|| {
            vartree_stats::profile_scope!(&sketch);
        })
    });
    group.bench_function("percentiles", |b| {
        let sketch = Sketch::default();
        for i in 0..10_000 {
            sketch.add(i as f64);
        }
        b.iter(|| black_box(sketch.percentiles()))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
