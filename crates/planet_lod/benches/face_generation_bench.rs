//! Benchmarks for quadtree subdivision, seam templates and full face
//! generation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;
use planet_lod::{
  CubeFace, FaceChunk, FaceTree, PlanetContext, PlanetSettings, QuadPresets, ViewerState,
};

fn settings(density: usize) -> PlanetSettings {
  PlanetSettings {
    radius: 10_000.0,
    chunk_density: density,
    seed: Some(1),
    ..Default::default()
  }
}

/// Viewer hovering just above the Up face center.
fn near_surface_viewer() -> ViewerState {
  ViewerState {
    viewer_position: DVec3::new(0.0, 10_050.0, 0.0),
    planet_position: DVec3::ZERO,
  }
}

fn bench_presets(c: &mut Criterion) {
  let mut group = c.benchmark_group("presets_instantiate");

  for density in [4, 8, 16, 32] {
    group.bench_with_input(BenchmarkId::from_parameter(density), &density, |b, &density| {
      b.iter(|| QuadPresets::instantiate(black_box(density)))
    });
  }

  group.finish();
}

fn bench_subdivide(c: &mut Criterion) {
  let settings = settings(8);
  let viewer = near_surface_viewer();

  c.bench_function("face_tree::subdivide (Up, near surface)", |b| {
    b.iter(|| {
      let mut tree = FaceTree::new(CubeFace::Up, settings.radius);
      tree.subdivide(black_box(&settings), black_box(&viewer));
      black_box(tree.len())
    })
  });
}

fn bench_generate(c: &mut Criterion) {
  let mut group = c.benchmark_group("face_generate");
  group.sample_size(20);

  for density in [4, 8, 16] {
    let context = PlanetContext::new(settings(density));
    let viewer = near_surface_viewer();

    group.bench_with_input(BenchmarkId::new("Up", density), &density, |b, _| {
      b.iter(|| FaceChunk::generate(CubeFace::Up, black_box(&context), &viewer, 1))
    });
  }

  group.finish();
}

criterion_group!(benches, bench_presets, bench_subdivide, bench_generate);
criterion_main!(benches);
