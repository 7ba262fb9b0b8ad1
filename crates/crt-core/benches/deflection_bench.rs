use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crt_core::shape::{QuadraticBezierCurve, Shape};
use crt_core::{DeflectionModel, SimulationParameters};
use glam::DVec2;

fn bench_manual_position_1000(c: &mut Criterion) {
    let model = DeflectionModel::default();
    let params = SimulationParameters::manual(50.0, -20.0);
    c.bench_function("manual_position_1000", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(model.compute_position(&params, i as f64 * 0.002));
            }
        });
    });
}

fn bench_sinusoidal_position_1000(c: &mut Criterion) {
    let model = DeflectionModel::default();
    let params = SimulationParameters::sinusoidal(3.0, 2.0, 0.5);
    c.bench_function("sinusoidal_position_1000", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(model.compute_position(&params, i as f64 * 0.002));
            }
        });
    });
}

fn bench_beam_path_sample_1000(c: &mut Criterion) {
    let curve = QuadraticBezierCurve::new(
        DVec2::new(165.0, 100.0),
        DVec2::new(200.0, 100.0),
        DVec2::new(350.0, 40.0),
    );
    c.bench_function("beam_path_sample_1000", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(curve.next_vector(i as f64 / 1000.0));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_manual_position_1000,
    bench_sinusoidal_position_1000,
    bench_beam_path_sample_1000,
);
criterion_main!(benches);
