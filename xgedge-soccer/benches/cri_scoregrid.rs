use criterion::{criterion_group, criterion_main, Criterion};

use xgedge_soccer::domain::Outcome;
use xgedge_soccer::goal_rate::GoalRates;
use xgedge_soccer::scoregrid;

fn criterion_benchmark(c: &mut Criterion) {
    let goal_rates = GoalRates {
        home: 1.75,
        away: 1.15,
    };
    c.bench_function("cri_scoregrid_build_11x11", |b| {
        b.iter(|| scoregrid::build(&goal_rates, 10, None));
    });
    c.bench_function("cri_scoregrid_build_dixon_coles_11x11", |b| {
        b.iter(|| scoregrid::build(&goal_rates, 10, Some(-0.08)));
    });
    c.bench_function("cri_scoregrid_gather_h2h_11x11", |b| {
        let scoregrid = scoregrid::build(&goal_rates, 10, None);
        b.iter(|| Outcome::Home.gather(&scoregrid) + Outcome::Draw.gather(&scoregrid));
    });
    c.bench_function("cri_scoregrid_most_likely_11x11", |b| {
        let scoregrid = scoregrid::build(&goal_rates, 10, None);
        b.iter(|| scoregrid::most_likely(5, &scoregrid));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
