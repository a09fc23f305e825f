use criterion::{criterion_group, criterion_main, Criterion};

use xgedge_soccer::domain::{ByOutcome, TeamAttributes};
use xgedge_soccer::model::{Config, Model};
use xgedge_soccer::strength::{AttackDefenceConfig, StrengthModel};

const LEAGUE: &str = "Premier League";

fn criterion_benchmark(c: &mut Criterion) {
    let home = TeamAttributes {
        xg_for: 2.0,
        xg_against: 1.0,
        pitch_rank: 1.5,
        squad_rating: 70.0,
        manager_rating: 7.0,
    };
    let away = TeamAttributes {
        xg_for: 1.0,
        xg_against: 1.5,
        pitch_rank: 1.0,
        squad_rating: 40.0,
        manager_rating: 5.0,
    };

    c.bench_function("cri_model_project_scalar", |b| {
        let model = Model::try_from(Config::default()).unwrap();
        b.iter(|| model.project(&home, &away, LEAGUE).unwrap());
    });
    c.bench_function("cri_model_project_attack_defence", |b| {
        let model = Model::try_from(Config {
            strength: StrengthModel::AttackDefence(AttackDefenceConfig::default()),
            dixon_coles: true,
            ..Config::default()
        })
        .unwrap();
        b.iter(|| model.project(&home, &away, LEAGUE).unwrap());
    });
    c.bench_function("cri_model_value", |b| {
        let model = Model::try_from(Config::default()).unwrap();
        let prices = ByOutcome::new(1.80, 3.90, 5.50);
        b.iter(|| model.value(&home, &away, LEAGUE, &prices).unwrap());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
