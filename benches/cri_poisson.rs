use criterion::{criterion_group, criterion_main, Criterion};

use scorecast::factorial::{Calculator, Lookup};
use scorecast::poisson;

fn criterion_benchmark(c: &mut Criterion) {
    // sanity check
    assert_eq!(1.0, poisson::pmf(0, 0.0));

    c.bench_function("cri_poisson_calculator", |b| {
        b.iter(|| (0..=10).map(|k| poisson::univariate(k, 1.8, &Calculator)).sum::<f64>());
    });

    c.bench_function("cri_poisson_lookup", |b| {
        let lookup = Lookup::default();
        b.iter(|| (0..=10).map(|k| poisson::univariate(k, 1.8, &lookup)).sum::<f64>());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
