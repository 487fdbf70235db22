//! Tests for the planet tick, regeneration modes and terrain queries.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use glam::DVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use web_time::Instant;

use super::*;
use crate::chunk::MeshStore;

/// Highest altitude: three octaves sum to at most 1.75 before scaling.
const MAX_ALTITUDE: f64 = 1.75 * 50.0;

fn small_settings(background: bool) -> PlanetSettings {
  PlanetSettings {
    radius: 1000.0,
    chunk_density: 4,
    lod_enabled: false,
    non_lod_levels: 2,
    horizon_culling: false,
    terrain_height: 50.0,
    update_interval: 0.5,
    use_background_threads: background,
    seed: Some(7),
    ..Default::default()
  }
}

/// Planet whose face sinks are kept for inspection, in `CubeFace::ALL` order.
fn planet_with_stores(settings: PlanetSettings) -> (Planet, Vec<Arc<Mutex<MeshStore>>>) {
  let mut stores = Vec::new();
  let planet = Planet::new(settings, |_face| {
    let store = MeshStore::shared();
    let sink: SharedSink = store.clone();
    stores.push(store);
    sink
  });
  (planet, stores)
}

fn commits(stores: &[Arc<Mutex<MeshStore>>]) -> Vec<u64> {
  stores.iter().map(|s| s.lock().unwrap().commits).collect()
}

// =========================================================================
// Construction and regeneration
// =========================================================================

#[test]
fn test_new_planet_commits_every_face() {
  let (planet, stores) = planet_with_stores(small_settings(false));

  assert_eq!(planet.faces().len(), 6);
  assert_eq!(commits(&stores), vec![1; 6]);
  for (face, chunk) in CubeFace::ALL.iter().zip(planet.faces()) {
    assert_eq!(chunk.face(), *face);
    assert_eq!(chunk.committed_generation(), 1);
  }

  // density 4: 25 vertices and 32 triangles per leaf, 4 leaves per face
  let store = stores[0].lock().unwrap();
  assert_eq!(store.meshes.render.vertices.len(), 4 * 25);
  assert_eq!(store.meshes.render.triangle_count(), 4 * 32);
}

#[test]
fn test_update_waits_for_interval() {
  let (mut planet, stores) = planet_with_stores(small_settings(false));

  assert_eq!(planet.update(0.2), 0);
  assert_eq!(commits(&stores), vec![1; 6]);

  // 0.2 + 0.4 crosses the 0.5 s interval
  planet.update(0.4);
  assert_eq!(commits(&stores), vec![2; 6]);
  assert!(planet.faces().iter().all(|f| f.committed_generation() == 2));

  // Timer restarted
  planet.update(0.3);
  assert_eq!(commits(&stores), vec![2; 6]);
}

/// Background results are committed by the drain at the start of a later
/// update, never by the update that issued them.
#[test]
fn test_update_background_commits_on_later_ticks() {
  let (mut planet, stores) = planet_with_stores(small_settings(true));
  assert_eq!(planet.generation_mode(), GenerationMode::Background);

  assert_eq!(planet.update(1.0), 0);
  assert!(planet.faces().iter().all(|f| f.issued_generation() == 2));

  let deadline = Instant::now() + Duration::from_secs(30);
  let mut committed = 0;
  while committed < 6 {
    assert!(Instant::now() < deadline, "background faces never landed");
    committed += planet.update(0.0);
    std::thread::sleep(Duration::from_millis(1));
  }

  assert_eq!(committed, 6);
  assert_eq!(commits(&stores), vec![2; 6]);
  assert!(planet.faces().iter().all(|f| f.committed_generation() == 2));
}

#[test]
fn test_explicit_sync_regenerate_returns_stats() {
  let (mut planet, _stores) = planet_with_stores(small_settings(true));

  let stats = planet.regenerate(GenerationMode::Sync);
  assert_eq!(stats.len(), 6);
  assert!(stats.iter().all(|s| s.generation == 2 && s.render_leaves == 4));

  assert!(planet.regenerate(GenerationMode::Background).is_empty());
}

// =========================================================================
// Terrain queries
// =========================================================================

#[test]
fn test_surface_position_follows_direction() {
  let (mut planet, _stores) = planet_with_stores(small_settings(false));
  let center = DVec3::new(100.0, -50.0, 25.0);
  planet.set_viewer(DVec3::ZERO, center);

  let direction = DVec3::new(1.0, 2.0, -2.0);
  let position = planet.surface_position(direction, 5.0);
  let offset = position - center;

  assert!(offset.normalize().abs_diff_eq(direction.normalize(), 1e-12));
  let distance = offset.length();
  assert!(distance >= 1005.0 && distance <= 1005.0 + MAX_ALTITUDE);

  // Zero direction falls back to +Y
  let up = planet.surface_position(DVec3::ZERO, 0.0) - center;
  assert!(up.normalize().abs_diff_eq(DVec3::Y, 1e-12));
}

#[test]
fn test_launch_pad_above_positive_octant() {
  let (planet, _stores) = planet_with_stores(small_settings(false));
  let mut rng = ChaCha8Rng::seed_from_u64(11);

  for _ in 0..16 {
    let pad = planet.launch_pad_position(&mut rng);
    assert!(pad.x >= 0.0 && pad.y >= 0.0 && pad.z >= 0.0);
    assert!(pad.length() >= 1000.0 + LAUNCH_PAD_CLEARANCE);
  }
}

#[test]
fn test_shading_params_track_generated_range() {
  let (planet, _stores) = planet_with_stores(small_settings(false));
  let params = planet.shading_params();

  assert_eq!(params.radius, 1000.0);
  assert!(params.min_height >= 0.0);
  assert!(params.max_height >= params.min_height);
  assert!(params.max_height <= MAX_ALTITUDE);
}

// =========================================================================
// Live edits
// =========================================================================

#[test]
fn test_set_layer_strength() {
  let (mut planet, _stores) = planet_with_stores(small_settings(false));
  let presets = Arc::clone(&planet.context().presets);

  assert!(planet.set_layer_strength(0, 0.25));
  assert_eq!(planet.settings().noise_layers[0].strength, 0.25);
  assert_eq!(planet.context().terrain.layers()[0].strength(), 0.25);
  assert!(Arc::ptr_eq(&presets, &planet.context().presets));

  // Fresh extremum until the next regeneration samples it
  let params = planet.shading_params();
  assert_eq!((params.min_height, params.max_height), (0.0, 0.0));

  planet.regenerate(GenerationMode::Sync);
  assert!(planet.context().terrain.extremum().max().is_finite());

  assert!(!planet.set_layer_strength(3, 1.0));
  assert_eq!(planet.settings().noise_layers[0].strength, 0.25);
}

#[test]
fn test_reseed_rebuilds_noise_and_keeps_presets() {
  let (mut planet, _stores) = planet_with_stores(small_settings(false));
  let presets = Arc::clone(&planet.context().presets);
  let offsets = planet.context().terrain.layers()[0].octave_offsets().to_vec();

  planet.reseed(8);

  assert_eq!(planet.seed(), 8);
  assert_eq!(planet.settings().seed, Some(8));
  assert!(Arc::ptr_eq(&presets, &planet.context().presets));
  assert_ne!(planet.context().terrain.layers()[0].octave_offsets(), offsets.as_slice());

  // Same seed again reproduces the offsets
  planet.reseed(7);
  assert_eq!(planet.context().terrain.layers()[0].octave_offsets(), offsets.as_slice());
}

/// Running generations keep their context across an edit.
#[test]
fn test_context_swap_leaves_old_context_intact() {
  let (mut planet, _stores) = planet_with_stores(small_settings(false));
  let before = Arc::clone(planet.context());

  planet.reseed(1234);

  assert_eq!(before.seed, 7);
  assert!(!Arc::ptr_eq(&before, planet.context()));
}

#[cfg(feature = "metrics")]
#[test]
fn test_metrics_count_commits() {
  let (mut planet, _stores) = planet_with_stores(small_settings(false));
  planet.regenerate(GenerationMode::Sync);

  let metrics = planet.metrics();
  assert_eq!(metrics.total_commits, 12);
  assert_eq!(metrics.stale_commits, 0);
  assert_eq!(metrics.total_leaves(), 6 * 4);
  assert_eq!(metrics.leaves_per_depth()[1], 24);
}
