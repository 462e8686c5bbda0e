use bridge_line_placer::core::{
    compute_tiling_into, PieceMetrics, PieceSlot, PlaceableDefinition, TilingLayout,
    TilingMetrics, TilingParams,
};
use bridge_line_placer::{
    HeadlessScene, HorizontalSurface, PlacementController, PlacementOptions, PointerEventKind,
    PointerInputRouterBuilder, PointerRay, PointerSample,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use std::hint::black_box;

fn bridge() -> PlaceableDefinition {
    PlaceableDefinition {
        name: "Holzbrücke".into(),
        primary: PieceSlot::new("bridge/ramp_start", PieceMetrics::new(1.0)),
        secondary: PieceSlot::new("bridge/ramp_end", PieceMetrics::new(1.0)),
        tertiary: PieceSlot::new("bridge/span", PieceMetrics::new(2.0)),
        filler: PieceSlot::new("bridge/plank", PieceMetrics::new(0.5)),
    }
}

fn bench_compute_tiling(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_tiling");
    let metrics = TilingMetrics {
        primary_x_size: 1.0,
        anchor: PieceMetrics::new(1.0),
        mobile: PieceMetrics::new(1.0),
        tertiary: PieceMetrics::new(2.0),
        filler: PieceMetrics::new(0.5),
    };
    let params = TilingParams {
        min_drag_distance: 0.01,
        look_correction_yaw: (-90.0f32).to_radians(),
    };

    for &length in &[10.0f32, 100.0, 1000.0] {
        let mut layout = TilingLayout::default();
        group.bench_with_input(BenchmarkId::new("into_reused", length), &length, |b, &len| {
            b.iter(|| {
                compute_tiling_into(
                    &mut layout,
                    black_box(Vec3::ZERO),
                    black_box(Vec3::new(len, 0.0, len * 0.5)),
                    &metrics,
                    &params,
                );
                black_box(layout.tertiary_count())
            })
        });
    }

    group.finish();
}

fn bench_drag_samples(c: &mut Criterion) {
    let controller =
        PlacementController::new(HeadlessScene::new(), bridge(), PlacementOptions::default())
            .expect("Controller erwartet");
    let mut router = PointerInputRouterBuilder::new(HorizontalSurface::new(0.0))
        .listener(controller)
        .build()
        .expect("Router erwartet");
    router.dispatch(PointerSample::new(
        PointerEventKind::Down,
        PointerRay::straight_down(Vec3::ZERO),
    ));

    let samples: Vec<_> = (0..256)
        .map(|i| {
            let x = 5.0 + (i % 64) as f32 * 0.75;
            PointerSample::new(
                PointerEventKind::Drag,
                PointerRay::straight_down(Vec3::new(x, 0.0, 0.0)),
            )
        })
        .collect();

    c.bench_function("drag_sample_batch", |b| {
        b.iter(|| {
            let mut dispatched = 0usize;
            for sample in &samples {
                if router.dispatch(black_box(*sample)) {
                    dispatched += 1;
                }
            }
            black_box(dispatched)
        })
    });
}

criterion_group!(tiling_benches, bench_compute_tiling, bench_drag_samples);
criterion_main!(tiling_benches);
