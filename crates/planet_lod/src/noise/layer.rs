//! Multi-octave noise layer.

use glam::DVec3;
use noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::constants::OCTAVE_OFFSET_RANGE;
use crate::settings::NoiseLayerSettings;

/// One noise layer: immutable settings plus per-octave offsets.
///
/// Output formula:
///
/// ```text
/// sum    = Σ (perlin(p * freq_i + offset_i) + 1) / 2 * amp_i
/// freq_0 = base_lacunarity,  freq_i+1 = freq_i * lacunarity
/// amp_0  = 1,                amp_i+1  = amp_i * persistence
/// value  = max(0, sum - min_value) * strength
/// ```
#[derive(Clone)]
pub struct NoiseLayer {
  settings: NoiseLayerSettings,
  octave_offsets: Vec<DVec3>,
  perlin: Perlin,
}

impl NoiseLayer {
  /// Create a layer, drawing its octave offsets from `seed`.
  ///
  /// `index` selects an independent random stream so layers never share
  /// offsets, whatever their octave counts.
  pub fn new(settings: NoiseLayerSettings, seed: u64, index: usize) -> Self {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);

    let octave_offsets = (0..settings.octaves.max(1))
      .map(|_| {
        DVec3::new(
          rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE),
          rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE),
          rng.random_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE),
        ) + settings.phase_origin
      })
      .collect();

    Self {
      settings,
      octave_offsets,
      perlin: Perlin::new(permutation_seed(seed)),
    }
  }

  pub fn settings(&self) -> &NoiseLayerSettings {
    &self.settings
  }

  pub fn octave_offsets(&self) -> &[DVec3] {
    &self.octave_offsets
  }

  #[inline]
  pub fn is_activated(&self) -> bool {
    self.settings.activated
  }

  #[inline]
  pub fn strength(&self) -> f64 {
    self.settings.strength
  }

  /// Copy of this layer with a different strength; offsets are kept.
  pub fn with_strength(&self, strength: f64) -> Self {
    let mut layer = self.clone();
    layer.settings.strength = strength;
    layer
  }

  /// Evaluate the layer at a point on the unit sphere.
  pub fn evaluate(&self, point: DVec3) -> f64 {
    let mut value = 0.0;
    let mut frequency = self.settings.base_lacunarity;
    let mut amplitude = 1.0;

    for offset in &self.octave_offsets {
      let p = point * frequency + *offset;
      let v = self.perlin.get([p.x, p.y, p.z]).clamp(-1.0, 1.0);
      value += (v + 1.0) * 0.5 * amplitude;

      frequency *= self.settings.lacunarity;
      amplitude *= self.settings.persistence;
    }

    (value - self.settings.min_value).max(0.0) * self.settings.strength
  }
}

/// Fold a 64-bit planet seed into Perlin's 32-bit permutation seed.
#[inline]
fn permutation_seed(seed: u64) -> u32 {
  (seed ^ (seed >> 32)) as u32
}
