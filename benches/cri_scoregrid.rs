use criterion::{criterion_group, criterion_main, Criterion};

use scorecast::domain::{Outcome, Over};
use scorecast::linear::Matrix;
use scorecast::scoregrid;
use scorecast::scoregrid::GridConfig;

fn criterion_benchmark(c: &mut Criterion) {
    fn run(home_rate: f64, away_rate: f64, config: &GridConfig) -> f64 {
        scoregrid::compute_with(home_rate, away_rate, config).home_win
    }

    // sanity check
    assert!(run(1.8, 1.2, &GridConfig::default()) > 50.0);

    c.bench_function("cri_scoregrid_compute_6x6", |b| {
        let config = GridConfig::default();
        b.iter(|| run(1.8, 1.2, &config));
    });

    c.bench_function("cri_scoregrid_compute_11x11", |b| {
        let config = GridConfig {
            max_goals: 10,
            goals_line: Over(2),
        };
        b.iter(|| run(1.8, 1.2, &config));
    });

    c.bench_function("cri_scoregrid_gather_6x6", |b| {
        let mut grid = Matrix::allocate(6, 6);
        scoregrid::from_univariate_poisson(1.8, 1.2, &mut grid);
        let outcomes = [Outcome::Draw, Outcome::GoalsOver(2), Outcome::GoalsUnder(3)];
        b.iter(|| outcomes.iter().map(|outcome| outcome.gather(&grid)).sum::<f64>());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
