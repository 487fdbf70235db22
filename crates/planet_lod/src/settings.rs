//! PlanetSettings - everything that shapes a planet and its LOD behaviour.
//!
//! Settings are plain serde structs so hosts can load them from TOML or any
//! other serde format. They are validated once at planet startup by
//! [`PlanetSettings::sanitized`]; problems are reported and replaced by safe
//! defaults rather than failing.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::constants::{
  DEFAULT_ALWAYS_RENDER_DEPTH, DEFAULT_CHUNK_DENSITY, DEFAULT_LOD_DISTANCES, MAX_TREE_DEPTH,
  MIN_CHUNK_DENSITY,
};
use crate::error::ConfigIssue;
use crate::types::ColorGradient;

/// Settings of one noise layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseLayerSettings {
  /// Number of octaves (>= 1).
  pub octaves: usize,
  /// Frequency multiplier applied after each octave.
  pub lacunarity: f64,
  /// Amplitude multiplier applied after each octave, in [0, 1].
  pub persistence: f64,
  /// Output scale of the layer.
  pub strength: f64,
  /// Threshold subtracted from the octave sum before scaling, in [0, 1].
  pub min_value: f64,
  /// Frequency of the first octave.
  pub base_lacunarity: f64,
  /// Constant offset added to every octave offset.
  pub phase_origin: DVec3,
  /// Deactivated layers are skipped entirely.
  pub activated: bool,
}

impl Default for NoiseLayerSettings {
  fn default() -> Self {
    Self {
      octaves: 3,
      lacunarity: 2.0,
      persistence: 0.5,
      strength: 1.0,
      min_value: 0.0,
      base_lacunarity: 1.0,
      phase_origin: DVec3::ZERO,
      activated: true,
    }
  }
}

impl NoiseLayerSettings {
  /// Return a corrected copy of these settings, pushing one issue per fix.
  fn sanitized(&self, layer: usize, issues: &mut Vec<ConfigIssue>) -> Self {
    let mut out = self.clone();
    let mut flag = |reason: String| issues.push(ConfigIssue::InvalidNoiseLayer { layer, reason });

    if out.octaves == 0 {
      flag("octave count must be >= 1; using 1".into());
      out.octaves = 1;
    }
    if !(out.lacunarity.is_finite() && out.lacunarity > 0.0) {
      flag(format!("lacunarity {} must be > 0; using 2", out.lacunarity));
      out.lacunarity = 2.0;
    }
    if !(0.0..=1.0).contains(&out.persistence) {
      let clamped = clamp_unit(out.persistence);
      flag(format!("persistence {} outside [0, 1]; using {}", out.persistence, clamped));
      out.persistence = clamped;
    }
    if !(0.0..=1.0).contains(&out.min_value) {
      let clamped = clamp_unit(out.min_value);
      flag(format!("min value {} outside [0, 1]; using {}", out.min_value, clamped));
      out.min_value = clamped;
    }
    if !(out.strength.is_finite() && out.strength >= 0.0) {
      flag(format!("strength {} must be >= 0; using 0", out.strength));
      out.strength = 0.0;
    }
    if !(out.base_lacunarity.is_finite() && out.base_lacunarity > 0.0) {
      flag(format!("base lacunarity {} must be > 0; using 1", out.base_lacunarity));
      out.base_lacunarity = 1.0;
    }
    if !out.phase_origin.is_finite() {
      flag("phase origin is not finite; using zero".into());
      out.phase_origin = DVec3::ZERO;
    }

    out
  }
}

fn clamp_unit(value: f64) -> f64 {
  if value.is_nan() {
    0.0
  } else {
    value.clamp(0.0, 1.0)
  }
}

/// Planet shape, terrain and LOD configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetSettings {
  /// Sea-level radius in world units. Also the side length of a cube face in
  /// parametric space.
  pub radius: f64,

  /// Quads per side of one leaf patch. Must be even.
  pub chunk_density: usize,

  /// Subdivide by viewer distance (true) or to a fixed depth (false).
  pub lod_enabled: bool,

  /// Subdivision distance per depth (index = depth). A node at depth `d`
  /// subdivides while the viewer is within `lod_distances[d]`.
  pub lod_distances: Vec<f64>,

  /// Depth levels (root included) built when LOD is disabled.
  pub non_lod_levels: usize,

  /// Stop expanding patches that sit behind the planet's horizon.
  pub horizon_culling: bool,

  /// Tolerance in radians below the local horizon before a patch is culled.
  pub max_visibility_angle: f64,

  /// Culled leaves at or above this depth are still rendered.
  pub always_render_depth: usize,

  /// Seconds between two regenerations.
  pub update_interval: f64,

  /// Generate faces on rayon workers and commit through the completion queue.
  pub use_background_threads: bool,

  /// Normalized noise level treated as sea level, in [0, 0.5].
  pub water_level: f64,

  /// Altitude of a fully saturated noise sample, in world units.
  pub terrain_height: f64,

  /// Planet identity. `None` derives a seed from the clock.
  pub seed: Option<u64>,

  pub noise_layers: Vec<NoiseLayerSettings>,

  /// Altitude-to-color ramp.
  pub gradient: ColorGradient,
}

impl Default for PlanetSettings {
  fn default() -> Self {
    Self {
      radius: 10_000.0,
      chunk_density: DEFAULT_CHUNK_DENSITY,
      lod_enabled: true,
      lod_distances: DEFAULT_LOD_DISTANCES.to_vec(),
      non_lod_levels: 5,
      horizon_culling: true,
      max_visibility_angle: 0.47,
      always_render_depth: DEFAULT_ALWAYS_RENDER_DEPTH,
      update_interval: 0.5,
      use_background_threads: true,
      water_level: 0.1,
      terrain_height: 1000.0,
      seed: None,
      noise_layers: vec![NoiseLayerSettings::default()],
      gradient: ColorGradient::default(),
    }
  }
}

impl PlanetSettings {
  /// Deepest depth any node may reach.
  #[inline]
  pub fn max_depth(&self) -> usize {
    if self.lod_enabled {
      self.lod_distances.len()
    } else {
      self.non_lod_levels.saturating_sub(1)
    }
  }

  /// Distance under which a node at `depth` subdivides.
  #[inline]
  pub fn lod_threshold(&self, depth: usize) -> f64 {
    self.lod_distances.get(depth).copied().unwrap_or(0.0)
  }

  /// Vertices per side of one leaf patch.
  #[inline]
  pub fn grid_resolution(&self) -> usize {
    self.chunk_density + 1
  }

  /// The configured seed, or one derived from the system clock.
  pub fn resolved_seed(&self) -> u64 {
    self.seed.unwrap_or_else(|| {
      SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
    })
  }

  /// Validate and correct these settings.
  ///
  /// Returns the corrected settings and every issue found. Non-monotonic LOD
  /// distances are reported but kept.
  pub fn sanitized(&self) -> (Self, Vec<ConfigIssue>) {
    let mut out = self.clone();
    let mut issues = Vec::new();

    if out.chunk_density < MIN_CHUNK_DENSITY || out.chunk_density % 2 != 0 {
      let fallback = if out.chunk_density >= MIN_CHUNK_DENSITY {
        out.chunk_density + 1
      } else {
        DEFAULT_CHUNK_DENSITY
      };
      issues.push(ConfigIssue::InvalidDensity {
        found: out.chunk_density,
        min: MIN_CHUNK_DENSITY,
        fallback,
      });
      out.chunk_density = fallback;
    }

    if !(out.radius.is_finite() && out.radius > 0.0) {
      let fallback = PlanetSettings::default().radius;
      issues.push(ConfigIssue::InvalidRadius {
        found: out.radius,
        fallback,
      });
      out.radius = fallback;
    }

    if out.lod_distances.is_empty() {
      issues.push(ConfigIssue::EmptyLodDistances);
      out.lod_distances = DEFAULT_LOD_DISTANCES.to_vec();
    }
    if out.lod_distances.len() > MAX_TREE_DEPTH {
      issues.push(ConfigIssue::DepthTooLarge {
        requested: out.lod_distances.len(),
        max: MAX_TREE_DEPTH,
      });
      out.lod_distances.truncate(MAX_TREE_DEPTH);
    }
    for depth in 0..out.lod_distances.len() {
      let value = out.lod_distances[depth];
      if value.is_nan() || value < 0.0 {
        issues.push(ConfigIssue::InvalidLodDistance {
          depth,
          value,
          fallback: 0.0,
        });
        out.lod_distances[depth] = 0.0;
      }
    }
    for depth in 1..out.lod_distances.len() {
      let previous = out.lod_distances[depth - 1];
      let current = out.lod_distances[depth];
      if current > previous {
        issues.push(ConfigIssue::NonMonotonicLodDistances {
          depth,
          previous,
          current,
        });
      }
    }

    if out.non_lod_levels == 0 {
      issues.push(ConfigIssue::InvalidNonLodLevels { found: 0 });
      out.non_lod_levels = 1;
    }
    if out.non_lod_levels > MAX_TREE_DEPTH + 1 {
      issues.push(ConfigIssue::DepthTooLarge {
        requested: out.non_lod_levels - 1,
        max: MAX_TREE_DEPTH,
      });
      out.non_lod_levels = MAX_TREE_DEPTH + 1;
    }

    if !(0.0..=0.5).contains(&out.water_level) {
      let fallback = if out.water_level.is_nan() {
        0.0
      } else {
        out.water_level.clamp(0.0, 0.5)
      };
      issues.push(ConfigIssue::WaterLevelOutOfRange {
        found: out.water_level,
        fallback,
      });
      out.water_level = fallback;
    }

    if !(out.update_interval.is_finite() && out.update_interval > 0.0) {
      let fallback = PlanetSettings::default().update_interval;
      issues.push(ConfigIssue::InvalidUpdateInterval {
        found: out.update_interval,
        fallback,
      });
      out.update_interval = fallback;
    }

    out.noise_layers = out
      .noise_layers
      .iter()
      .enumerate()
      .map(|(layer, settings)| settings.sanitized(layer, &mut issues))
      .collect();

    (out, issues)
  }

  /// [`sanitized`](Self::sanitized), logging every issue once.
  pub fn sanitized_and_reported(&self) -> Self {
    let (settings, issues) = self.sanitized();
    for issue in &issues {
      tracing::warn!("planet configuration: {issue}");
    }
    settings
  }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;
