use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use sc_core::{
    ControlAlgorithm, MeshType, Pitch, PositionSeries, SpaceControlConfig, SpaceControlModel,
    Template,
};

const FRAMES: usize = 50;
const PLAYERS: usize = 11;

/// Random walk of `PLAYERS` agents on a 105x68 pitch centred on the origin.
fn random_team(rng: &mut ChaCha8Rng) -> PositionSeries {
    let mut current: Vec<(f64, f64)> = (0..PLAYERS)
        .map(|_| (rng.gen_range(-52.5..52.5), rng.gen_range(-34.0..34.0)))
        .collect();
    let mut frames = Vec::with_capacity(FRAMES);
    for _ in 0..FRAMES {
        for p in current.iter_mut() {
            p.0 = (p.0 + rng.gen_range(-0.3..0.3)).clamp(-52.5, 52.5);
            p.1 = (p.1 + rng.gen_range(-0.3..0.3)).clamp(-34.0, 34.0);
        }
        frames.push(current.clone());
    }
    PositionSeries::from_points(&frames, Some(25)).expect("rectangular frames")
}

fn bench_fit(c: &mut Criterion) {
    let pitch = Pitch::from_template(Template::Dfl, Some(105.0), Some(68.0)).expect("dfl pitch");
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let home = random_team(&mut rng);
    let away = random_team(&mut rng);

    let mut group = c.benchmark_group("space_control_fit");
    group.sample_size(10);

    for algorithm in [ControlAlgorithm::Euclidean, ControlAlgorithm::KinematicPursuit] {
        for mesh in [MeshType::Square, MeshType::Hexagonal] {
            let config = SpaceControlConfig::default()
                .with_algorithm(algorithm)
                .with_mesh(mesh)
                .with_xpoints(50);
            let mut model = SpaceControlModel::new(pitch.clone(), config).expect("valid config");
            group.bench_with_input(
                BenchmarkId::new(algorithm.as_str(), mesh.as_str()),
                &(),
                |b, _| b.iter(|| black_box(model.fit(&home, &away).expect("fit"))),
            );
        }
    }
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let pitch = Pitch::from_template(Template::Dfl, Some(105.0), Some(68.0)).expect("dfl pitch");
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let home = random_team(&mut rng);
    let away = random_team(&mut rng);
    let mut model =
        SpaceControlModel::new(pitch, SpaceControlConfig::default()).expect("valid config");
    model.fit(&home, &away).expect("fit");

    c.bench_function("space_control_team_controls", |b| {
        b.iter(|| black_box(model.team_controls().expect("fitted")))
    });
}

criterion_group!(benches, bench_fit, bench_aggregate);
criterion_main!(benches);
