//! Tests for the water clamp, normalization and color lookup.

use glam::DVec3;

use super::TerrainHeightField;
use crate::settings::{NoiseLayerSettings, PlanetSettings};
use crate::types::{Color, ColorGradient};

fn sphere_points() -> Vec<DVec3> {
  let mut points = Vec::new();
  for i in 0..32 {
    for j in 0..16 {
      let theta = i as f64 / 32.0 * std::f64::consts::TAU;
      let phi = (j as f64 + 0.5) / 16.0 * std::f64::consts::PI;
      points.push(DVec3::new(
        phi.sin() * theta.cos(),
        phi.cos(),
        phi.sin() * theta.sin(),
      ));
    }
  }
  points
}

fn settings(water_level: f64, terrain_height: f64) -> PlanetSettings {
  PlanetSettings {
    water_level,
    terrain_height,
    noise_layers: vec![
      NoiseLayerSettings {
        octaves: 4,
        strength: 1.0,
        ..Default::default()
      },
      NoiseLayerSettings {
        octaves: 2,
        strength: 0.5,
        base_lacunarity: 3.0,
        ..Default::default()
      },
    ],
    ..Default::default()
  }
}

/// Below the water level altitude is 0, above it scales linearly.
#[test]
fn test_altitude_water_clamp() {
  // Water at the median sample so both sides of the clamp are exercised
  let probe = TerrainHeightField::new(&settings(0.0, 1.0), 31);
  let mut noise: Vec<f64> = sphere_points()
    .into_iter()
    .map(|p| probe.normalized_noise(p))
    .collect();
  noise.sort_by(f64::total_cmp);
  let water = noise[noise.len() / 2];

  let height = 1000.0;
  let field = TerrainHeightField::new(&settings(water, height), 31);

  let mut saw_water = false;
  let mut saw_land = false;
  for p in sphere_points() {
    let n = field.normalized_noise(p);
    let altitude = field.altitude_at(p);
    if n < water {
      assert_eq!(altitude, 0.0, "noise {} below water must be flat", n);
      saw_water = true;
    } else {
      assert!((altitude - (n - water) * height).abs() < 1e-9);
      saw_land |= altitude > 0.0;
    }
  }
  assert!(saw_water && saw_land, "sample set should cover both cases");
}

#[test]
fn test_altitude_scales_with_terrain_height() {
  let low = TerrainHeightField::new(&settings(0.1, 100.0), 8);
  let high = TerrainHeightField::new(&settings(0.1, 300.0), 8);

  for p in sphere_points() {
    let a = low.altitude_at(p);
    let b = high.altitude_at(p);
    assert!((b - 3.0 * a).abs() < 1e-9);
  }
}

/// Division by the strongest activated layer keeps the normalized value in
/// the octave-sum range.
#[test]
fn test_normalized_noise_ignores_deactivated_layers() {
  let mut with_disabled = settings(0.0, 1.0);
  with_disabled.noise_layers.push(NoiseLayerSettings {
    strength: 100.0,
    activated: false,
    ..Default::default()
  });
  let a = TerrainHeightField::new(&settings(0.0, 1.0), 3);
  let b = TerrainHeightField::new(&with_disabled, 3);

  for p in sphere_points() {
    assert_eq!(a.normalized_noise(p), b.normalized_noise(p));
  }
}

#[test]
fn test_no_activated_layers_is_flat() {
  let mut flat = settings(0.0, 1000.0);
  for layer in &mut flat.noise_layers {
    layer.activated = false;
  }
  let field = TerrainHeightField::new(&flat, 1);

  for p in sphere_points() {
    assert_eq!(field.altitude_at(p), 0.0);
  }
}

#[test]
fn test_altitude_updates_extremum() {
  let field = TerrainHeightField::new(&settings(0.1, 500.0), 77);
  let mut lo = f64::INFINITY;
  let mut hi = f64::NEG_INFINITY;
  for p in sphere_points() {
    let a = field.altitude_at(p);
    lo = lo.min(a);
    hi = hi.max(a);
  }

  assert_eq!(field.extremum().min(), lo);
  assert_eq!(field.extremum().max(), hi);
}

#[test]
fn test_color_normalization_boundaries() {
  let start = Color::rgb(0.1, 0.2, 0.9);
  let end = Color::rgb(0.9, 0.9, 0.9);
  let field = TerrainHeightField::from_layers(
    Vec::new(),
    0.0,
    1.0,
    ColorGradient::linear(start, end),
  );
  field.extremum().record(0.0);
  field.extremum().record(100.0);

  assert_eq!(field.color_at_altitude(0.0), start);
  assert_eq!(field.color_at_altitude(100.0), end);
  // Clamped outside the observed range
  assert_eq!(field.color_at_altitude(-50.0), start);
  assert_eq!(field.color_at_altitude(250.0), end);
}

/// min == max falls back to white instead of producing NaN colors.
#[test]
fn test_degenerate_extremum_fallback() {
  let field = TerrainHeightField::from_layers(
    Vec::new(),
    0.0,
    1.0,
    ColorGradient::linear(Color::BLACK, Color::BLACK),
  );
  assert_eq!(field.color_at_altitude(0.0), Color::WHITE);

  field.extremum().record(42.0);
  assert_eq!(field.color_at_altitude(42.0), Color::WHITE);
}

/// Changing a strength yields a field with fresh extrema and the same offsets.
#[test]
fn test_with_layer_strength_resets_extremum() {
  let field = TerrainHeightField::new(&settings(0.1, 500.0), 12);
  for p in sphere_points() {
    field.altitude_at(p);
  }
  assert!(field.extremum().max().is_finite());

  let changed = field.with_layer_strength(1, 0.25).expect("layer 1 exists");
  assert_eq!(changed.layers()[1].strength(), 0.25);
  assert_eq!(
    changed.layers()[0].octave_offsets(),
    field.layers()[0].octave_offsets()
  );
  assert_eq!(changed.extremum().max(), f64::NEG_INFINITY);

  assert!(field.with_layer_strength(5, 1.0).is_none());
}
