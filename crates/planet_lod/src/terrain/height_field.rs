//! TerrainHeightField - combines noise layers into a physical altitude.

use glam::DVec3;

use super::TerrainExtremum;
use crate::noise::NoiseLayer;
use crate::settings::PlanetSettings;
use crate::types::{Color, ColorGradient};

/// Altitude and color lookup for points on the unit sphere.
///
/// ```text
/// n        = Σ activated layers / activated_count / max_activated_strength
/// altitude = max(0, n - water_level) * terrain_height
/// ```
///
/// Every altitude query widens the shared [`TerrainExtremum`], which in turn
/// normalizes [`color_at_altitude`](Self::color_at_altitude).
pub struct TerrainHeightField {
  layers: Vec<NoiseLayer>,
  water_level: f64,
  terrain_height: f64,
  gradient: ColorGradient,
  extremum: TerrainExtremum,
}

impl TerrainHeightField {
  /// Build the height field for a planet, drawing layer state from `seed`.
  pub fn new(settings: &PlanetSettings, seed: u64) -> Self {
    let layers = settings
      .noise_layers
      .iter()
      .enumerate()
      .map(|(index, layer)| NoiseLayer::new(layer.clone(), seed, index))
      .collect();

    Self::from_layers(
      layers,
      settings.water_level,
      settings.terrain_height,
      settings.gradient.clone(),
    )
  }

  pub fn from_layers(
    layers: Vec<NoiseLayer>,
    water_level: f64,
    terrain_height: f64,
    gradient: ColorGradient,
  ) -> Self {
    Self {
      layers,
      water_level,
      terrain_height,
      gradient,
      extremum: TerrainExtremum::new(),
    }
  }

  pub fn layers(&self) -> &[NoiseLayer] {
    &self.layers
  }

  pub fn extremum(&self) -> &TerrainExtremum {
    &self.extremum
  }

  pub fn gradient(&self) -> &ColorGradient {
    &self.gradient
  }

  pub fn water_level(&self) -> f64 {
    self.water_level
  }

  pub fn terrain_height(&self) -> f64 {
    self.terrain_height
  }

  /// Combined, strength-normalized noise value before the water clamp.
  ///
  /// Returns 0 when no layer is activated or every activated layer has zero
  /// strength.
  pub fn normalized_noise(&self, point: DVec3) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    let mut max_strength = f64::NEG_INFINITY;

    for layer in self.layers.iter().filter(|layer| layer.is_activated()) {
      sum += layer.evaluate(point);
      count += 1;
      max_strength = max_strength.max(layer.strength());
    }

    if count == 0 || max_strength <= 0.0 {
      return 0.0;
    }
    sum / count as f64 / max_strength
  }

  /// Altitude above sea level at a point on the unit sphere.
  pub fn altitude_at(&self, point: DVec3) -> f64 {
    let above_water = (self.normalized_noise(point) - self.water_level).max(0.0);
    let altitude = above_water * self.terrain_height;
    self.extremum.record(altitude);
    altitude
  }

  /// Gradient color for an altitude, white while the extremum is degenerate.
  pub fn color_at_altitude(&self, altitude: f64) -> Color {
    let t = self.extremum.normalize(altitude);
    if t.is_nan() {
      return Color::WHITE;
    }
    self.gradient.evaluate(t.clamp(0.0, 1.0) as f32)
  }

  /// Copy of this height field with one layer's strength changed.
  ///
  /// The copy keeps every layer's offsets and starts with an empty extremum.
  /// Returns `None` when `index` is out of range.
  pub fn with_layer_strength(&self, index: usize, strength: f64) -> Option<Self> {
    let mut layers = self.layers.clone();
    let layer = layers.get_mut(index)?;
    *layer = layer.with_strength(strength);

    Some(Self::from_layers(
      layers,
      self.water_level,
      self.terrain_height,
      self.gradient.clone(),
    ))
  }
}
