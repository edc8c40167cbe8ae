use graph_rs::api::{GraphConfig, GraphEngine};
use graph_rs::core::{
    Annotation, Dataset, PlotRect, PlotScales, Point, Viewport, plan_time_ticks, value_ticks,
};
use graph_rs::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

fn sample_points(count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            Point::new(1_262_304_000 + (i as i64) * 3_600, 50.0 + (t / 9.0).sin() * 20.0)
        })
        .collect()
}

fn bench_plot_scale_mapping(c: &mut Criterion) {
    let points = sample_points(10_000);
    let scales = PlotScales::build(&points, None, PlotRect::new(40.0, 40.0, 1_840.0, 985.0))
        .expect("valid scales");

    c.bench_function("plot_scale_mapping_10k", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for point in black_box(&points) {
                acc += scales.time_to_x(point.time) + scales.value_to_y(point.value);
            }
            acc
        })
    });
}

fn bench_tick_planning(c: &mut Criterion) {
    c.bench_function("time_ticks_century", |b| {
        b.iter(|| plan_time_ticks(black_box(-631_152_000), black_box(2_524_608_000)))
    });
    c.bench_function("value_ticks_ten", |b| {
        b.iter(|| value_ticks(black_box(-12.5), black_box(987.25), black_box(10)))
    });
}

fn bench_frame_build_2k(c: &mut Criterion) {
    let notes = (0..50)
        .map(|i| Annotation::new(1_262_304_000 + i * 140_000, format!("note {i}")))
        .collect();
    let dataset = Dataset::new("bench", sample_points(2_000)).with_notes(notes);
    let engine = GraphEngine::new(
        NullRenderer::default(),
        dataset,
        Viewport::new(1_600, 900),
        GraphConfig::default(),
    )
    .expect("engine init");

    c.bench_function("frame_build_2k", |b| {
        b.iter(|| {
            engine
                .build_render_frame(black_box(Duration::from_millis(75)))
                .expect("frame")
        })
    });
}

criterion_group!(
    benches,
    bench_plot_scale_mapping,
    bench_tick_planning,
    bench_frame_build_2k
);
criterion_main!(benches);
