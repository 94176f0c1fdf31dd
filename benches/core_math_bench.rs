use chart_select::api::{ChartEngine, ChartEngineConfig};
use chart_select::core::{DataPoint, LinearScale, Range, Scalable, SeriesKind, TimeScale, Viewport};
use chart_select::interaction::{IndexRange, ValueBand, search_intervals};
use chart_select::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::horizontal(Range::new(0.0, 10_000.0), 1920.0);

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.to_pixel(black_box(4_321.123));
            let _ = scale.to_data(px);
        })
    });
}

fn bench_time_scale_ticks(c: &mut Criterion) {
    let day = 86_400_000.0;
    let scale = TimeScale::new(Range::new(0.0, 400.0 * day), 1920.0);

    c.bench_function("time_scale_ticks_400d", |b| {
        b.iter(|| {
            let _ = black_box(scale).ticks();
        })
    });
}

fn bench_search_intervals_100k(c: &mut Criterion) {
    let points: Vec<DataPoint> = (0..100_000)
        .map(|i| {
            let x = f64::from(i);
            DataPoint::new(x, (x * 0.01).sin() * 10.0)
        })
        .collect();
    let band = ValueBand::new(-2.0, 8.0);

    c.bench_function("search_intervals_100k", |b| {
        b.iter(|| {
            let _ = search_intervals(
                black_box(IndexRange::new(0, 99_999)),
                black_box(&points),
                |point| band.contains_strict(point.y),
            );
        })
    });
}

fn bench_engine_render_10k(c: &mut Criterion) {
    let config = ChartEngineConfig::new(Viewport::new(1920, 1080))
        .with_x_range(0.0, 10_000.0)
        .with_y_range(-10.0, 10.0);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let points: Vec<DataPoint> = (0..10_000)
        .map(|i| {
            let x = f64::from(i);
            DataPoint::new(x, (x * 0.01).cos() * 5.0)
        })
        .collect();
    engine
        .add_series("wave", SeriesKind::Line, points)
        .expect("series accepted");

    c.bench_function("engine_render_10k", |b| {
        b.iter(|| {
            engine.render().expect("render");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_time_scale_ticks,
    bench_search_intervals_100k,
    bench_engine_render_10k
);
criterion_main!(benches);
