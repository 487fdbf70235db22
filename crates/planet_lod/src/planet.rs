//! Planet - the six faces, their shared context, and the regeneration tick.
//!
//! # Usage
//!
//! ```ignore
//! let store = MeshStore::shared();
//! let mut planet = Planet::new(settings, |_face| -> SharedSink { store.clone() });
//!
//! // Each frame on the owning thread
//! planet.set_viewer(camera_position, planet_position);
//! planet.update(dt);
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use glam::DVec3;
use rand::Rng;

use crate::chunk::{FaceChunk, GenerationMode, GenerationStats, SharedSink};
use crate::completion_queue::CompletionQueue;
use crate::metrics::PlanetMetrics;
use crate::presets::QuadPresets;
use crate::quadtree::CubeFace;
use crate::settings::PlanetSettings;
use crate::terrain::TerrainHeightField;

/// Clearance above the terrain for [`Planet::launch_pad_position`].
const LAUNCH_PAD_CLEARANCE: f64 = 20.0;

/// Where the planet and its viewer are, refreshed by the host every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewerState {
  pub viewer_position: DVec3,
  pub planet_position: DVec3,
}

/// Immutable per-planet state shared with every generation task.
///
/// Replaced wholesale (never mutated) when the seed or a layer strength
/// changes; tasks already running keep the context they started with.
pub struct PlanetContext {
  pub settings: PlanetSettings,
  /// Seed the noise layers were built from.
  pub seed: u64,
  pub terrain: TerrainHeightField,
  /// Built once per planet, kept across reseeds.
  pub presets: Arc<QuadPresets>,
}

impl PlanetContext {
  /// Sanitize `settings` (logging every issue), resolve the seed and build
  /// the height field and seam templates.
  pub fn new(settings: PlanetSettings) -> Self {
    let settings = settings.sanitized_and_reported();
    let presets = Arc::new(QuadPresets::instantiate(settings.chunk_density));
    Self::with_presets(settings, presets)
  }

  fn with_presets(settings: PlanetSettings, presets: Arc<QuadPresets>) -> Self {
    let seed = settings.resolved_seed();
    let terrain = TerrainHeightField::new(&settings, seed);
    tracing::debug!(seed, density = settings.chunk_density, "planet context built");
    Self {
      settings,
      seed,
      terrain,
      presets,
    }
  }
}

/// Inputs for an external terrain material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingParams {
  /// Lowest altitude sampled so far (0 before any sample).
  pub min_height: f64,
  /// Highest altitude sampled so far (0 before any sample).
  pub max_height: f64,
  pub radius: f64,
}

/// A cube-sphere planet: six faces regenerated on a timer.
pub struct Planet {
  context: Arc<PlanetContext>,
  faces: Vec<FaceChunk>,
  queue: Arc<CompletionQueue>,
  viewer: ViewerState,
  /// Seconds since the last regeneration.
  timer: f64,
  metrics: Arc<Mutex<PlanetMetrics>>,
}

impl Planet {
  /// Build a planet with the viewer at the origin and generate it once,
  /// synchronously. `sink_for` provides the mesh sink of each face.
  pub fn new<F>(settings: PlanetSettings, sink_for: F) -> Self
  where
    F: FnMut(CubeFace) -> SharedSink,
  {
    Self::with_viewer(settings, ViewerState::default(), sink_for)
  }

  pub fn with_viewer<F>(settings: PlanetSettings, viewer: ViewerState, mut sink_for: F) -> Self
  where
    F: FnMut(CubeFace) -> SharedSink,
  {
    let context = Arc::new(PlanetContext::new(settings));
    let metrics = Arc::new(Mutex::new(PlanetMetrics::new()));
    let faces = CubeFace::ALL
      .into_iter()
      .map(|face| FaceChunk::new(face, sink_for(face), Arc::clone(&metrics)))
      .collect();

    let mut planet = Self {
      context,
      faces,
      queue: Arc::new(CompletionQueue::new()),
      viewer,
      timer: 0.0,
      metrics,
    };
    planet.regenerate(GenerationMode::Sync);
    planet
  }

  pub fn context(&self) -> &Arc<PlanetContext> {
    &self.context
  }

  pub fn settings(&self) -> &PlanetSettings {
    &self.context.settings
  }

  pub fn seed(&self) -> u64 {
    self.context.seed
  }

  pub fn faces(&self) -> &[FaceChunk] {
    &self.faces
  }

  pub fn queue(&self) -> &Arc<CompletionQueue> {
    &self.queue
  }

  pub fn viewer(&self) -> ViewerState {
    self.viewer
  }

  pub fn set_viewer(&mut self, viewer_position: DVec3, planet_position: DVec3) {
    self.viewer = ViewerState {
      viewer_position,
      planet_position,
    };
  }

  /// Mode used by timed regenerations.
  pub fn generation_mode(&self) -> GenerationMode {
    if self.context.settings.use_background_threads {
      GenerationMode::Background
    } else {
      GenerationMode::Sync
    }
  }

  /// Advance by `dt` seconds: commit finished background results, then
  /// regenerate every face once the update interval has elapsed.
  ///
  /// Returns the number of completions committed.
  pub fn update(&mut self, dt: f64) -> usize {
    let committed = self.queue.drain();

    self.timer += dt;
    if self.timer >= self.context.settings.update_interval {
      self.timer = 0.0;
      self.regenerate(self.generation_mode());
    }

    committed
  }

  /// Regenerate all six faces now.
  ///
  /// Returns the statistics of synchronously committed faces.
  pub fn regenerate(&mut self, mode: GenerationMode) -> Vec<GenerationStats> {
    tracing::debug!(?mode, "regenerating planet");
    let context = &self.context;
    let queue = &self.queue;
    let viewer = self.viewer;

    self
      .faces
      .iter_mut()
      .filter_map(|face| face.regenerate(mode, context, viewer, queue))
      .collect()
  }

  /// Point `clearance` units above the terrain in `direction`, in world space.
  pub fn surface_position(&self, direction: DVec3, clearance: f64) -> DVec3 {
    let unit = direction.normalize_or(DVec3::Y);
    let altitude = self.context.terrain.altitude_at(unit);
    self.viewer.planet_position + unit * (self.context.settings.radius + altitude + clearance)
  }

  /// Random spawn point above the terrain, on the positive-octant side.
  pub fn launch_pad_position<R: Rng>(&self, rng: &mut R) -> DVec3 {
    let direction = DVec3::new(
      rng.random_range(0.0..10.0),
      rng.random_range(0.0..10.0),
      rng.random_range(0.0..10.0),
    );
    self.surface_position(direction, LAUNCH_PAD_CLEARANCE)
  }

  pub fn shading_params(&self) -> ShadingParams {
    let extremum = self.context.terrain.extremum();
    let finite_or_zero = |value: f64| if value.is_finite() { value } else { 0.0 };
    ShadingParams {
      min_height: finite_or_zero(extremum.min()),
      max_height: finite_or_zero(extremum.max()),
      radius: self.context.settings.radius,
    }
  }

  /// Change one noise layer's strength. The altitude range restarts from
  /// scratch; faces pick the change up at the next regeneration.
  ///
  /// Returns false when `layer` does not exist.
  pub fn set_layer_strength(&mut self, layer: usize, strength: f64) -> bool {
    let Some(terrain) = self.context.terrain.with_layer_strength(layer, strength) else {
      tracing::warn!(layer, "no such noise layer");
      return false;
    };

    let mut settings = self.context.settings.clone();
    if let Some(layer_settings) = settings.noise_layers.get_mut(layer) {
      layer_settings.strength = strength;
    }
    self.context = Arc::new(PlanetContext {
      settings,
      seed: self.context.seed,
      terrain,
      presets: Arc::clone(&self.context.presets),
    });
    true
  }

  /// Rebuild the noise layers from a new seed. Takes effect at the next
  /// regeneration.
  pub fn reseed(&mut self, seed: u64) {
    let mut settings = self.context.settings.clone();
    settings.seed = Some(seed);
    self.context = Arc::new(PlanetContext::with_presets(
      settings,
      Arc::clone(&self.context.presets),
    ));
  }

  /// Snapshot of the collected metrics (empty unless the `metrics` feature is
  /// enabled).
  pub fn metrics(&self) -> PlanetMetrics {
    self
      .metrics
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }
}

#[cfg(test)]
#[path = "planet_test.rs"]
mod planet_test;
