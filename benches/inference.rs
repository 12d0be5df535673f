use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fuzzy_production::{EngineConfig, Inputs, MamdaniInference};

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    for resolution in [100, 1000, 10_000] {
        let config = EngineConfig {
            resolution,
            ..Default::default()
        };
        let model = MamdaniInference::new(&config).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(resolution), &model, |b, model| {
            b.iter(|| model.eval(black_box(3000.), black_box(500.)))
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let model = MamdaniInference::new(&EngineConfig::default()).unwrap();
    let inputs: Vec<Inputs> = (0..1000)
        .map(|i| Inputs::new((i * 7) as f64, ((i * 13) % 1000) as f64))
        .collect();

    c.bench_function("eval_batch_1000", |b| b.iter(|| model.eval_batch(black_box(&inputs))));
}

criterion_group!(benches, bench_eval, bench_batch);
criterion_main!(benches);
