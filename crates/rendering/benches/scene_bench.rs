//! Benchmarks for per-frame card work: path descriptors, scene building
//! (including tessellation) and SVG export.
//!
//! Run with: cargo bench -p rendering

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use parcels::shape::{generate, ShapeRng};
use parcels::Coordinate;
use rendering::path::to_path;
use rendering::reveal::RevealPhase;
use rendering::scene::render;
use rendering::svg_export::parcel_svg;

fn outlines(count: usize) -> Vec<Vec<Coordinate>> {
    let mut rng = ShapeRng::from_seed_u64(7);
    (0..count).map(|_| generate(&mut rng.0)).collect()
}

fn bench_to_path(c: &mut Criterion) {
    let shapes = outlines(10);
    c.bench_function("to_path_10_cards", |b| {
        b.iter(|| {
            for shape in &shapes {
                black_box(to_path(black_box(shape)));
            }
        })
    });
}

fn bench_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_build");
    for cards in [1usize, 10, 50] {
        let shapes = outlines(cards);
        group.bench_with_input(BenchmarkId::from_parameter(cards), &shapes, |b, shapes| {
            b.iter(|| {
                for (i, shape) in shapes.iter().enumerate() {
                    let phase = if i == 0 {
                        RevealPhase::Revealing { elapsed: 0.7 }
                    } else {
                        RevealPhase::Static
                    };
                    black_box(render(black_box(shape), phase));
                }
            })
        });
    }
    group.finish();
}

fn bench_svg_export(c: &mut Criterion) {
    let shapes = outlines(1);
    let scene = render(&shapes[0], RevealPhase::Static);
    c.bench_function("parcel_svg", |b| b.iter(|| black_box(parcel_svg(black_box(&scene)))));
}

criterion_group!(benches, bench_to_path, bench_scene, bench_svg_export);
criterion_main!(benches);
