//! Core data types for planet meshing.

use serde::{Deserialize, Serialize};

/// Linear RGBA color.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
  pub r: f32,
  pub g: f32,
  pub b: f32,
  #[serde(default = "default_alpha")]
  pub a: f32,
}

fn default_alpha() -> f32 {
  1.0
}

impl Color {
  pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
  pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

  pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
    Self { r, g, b, a }
  }

  pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
    Self { r, g, b, a: 1.0 }
  }

  /// Component-wise linear interpolation, `t` in [0, 1].
  #[inline]
  pub fn lerp(self, other: Self, t: f32) -> Self {
    Self {
      r: self.r + (other.r - self.r) * t,
      g: self.g + (other.g - self.g) * t,
      b: self.b + (other.b - self.b) * t,
      a: self.a + (other.a - self.a) * t,
    }
  }
}

impl Default for Color {
  fn default() -> Self {
    Self::WHITE
  }
}

/// One stop of a [`ColorGradient`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientKey {
  /// Position along the gradient in [0, 1].
  pub time: f32,
  pub color: Color,
}

impl GradientKey {
  pub const fn new(time: f32, color: Color) -> Self {
    Self { time, color }
  }
}

/// Piecewise-linear color ramp over [0, 1].
///
/// Values before the first key take the first key's color, values after the
/// last key take the last key's color. An empty gradient is white.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<GradientKey>", into = "Vec<GradientKey>")]
pub struct ColorGradient {
  keys: Vec<GradientKey>,
}

impl ColorGradient {
  /// Build a gradient; keys are sorted by time.
  pub fn new(mut keys: Vec<GradientKey>) -> Self {
    keys.sort_by(|a, b| a.time.total_cmp(&b.time));
    Self { keys }
  }

  /// Two-stop gradient.
  pub fn linear(start: Color, end: Color) -> Self {
    Self::new(vec![GradientKey::new(0.0, start), GradientKey::new(1.0, end)])
  }

  pub fn keys(&self) -> &[GradientKey] {
    &self.keys
  }

  /// Color at `t`. Non-finite `t` is treated as 0.
  pub fn evaluate(&self, t: f32) -> Color {
    let t = if t.is_finite() { t } else { 0.0 };

    let (first, last) = match (self.keys.first(), self.keys.last()) {
      (Some(first), Some(last)) => (first, last),
      _ => return Color::WHITE,
    };

    if t <= first.time {
      return first.color;
    }
    if t >= last.time {
      return last.color;
    }

    for pair in self.keys.windows(2) {
      let (a, b) = (pair[0], pair[1]);
      if t <= b.time {
        let span = b.time - a.time;
        if span <= f32::EPSILON {
          return b.color;
        }
        return a.color.lerp(b.color, (t - a.time) / span);
      }
    }

    last.color
  }
}

impl Default for ColorGradient {
  /// Shore sand through grass and rock up to snow.
  fn default() -> Self {
    Self::new(vec![
      GradientKey::new(0.0, Color::rgb(0.76, 0.70, 0.50)),
      GradientKey::new(0.15, Color::rgb(0.33, 0.55, 0.22)),
      GradientKey::new(0.55, Color::rgb(0.40, 0.36, 0.30)),
      GradientKey::new(0.85, Color::rgb(0.55, 0.55, 0.55)),
      GradientKey::new(1.0, Color::WHITE),
    ])
  }
}

impl From<Vec<GradientKey>> for ColorGradient {
  fn from(keys: Vec<GradientKey>) -> Self {
    Self::new(keys)
  }
}

impl From<ColorGradient> for Vec<GradientKey> {
  fn from(gradient: ColorGradient) -> Self {
    gradient.keys
  }
}

/// Triangle mesh buffers handed to a mesh sink.
///
/// `colors` is either empty (collider meshes) or parallel to `vertices`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
  /// Vertex positions relative to the planet center.
  pub vertices: Vec<[f32; 3]>,

  /// Per-vertex unit normals (parallel to vertices).
  pub normals: Vec<[f32; 3]>,

  /// Triangle indices (3 indices per triangle).
  pub triangles: Vec<u32>,

  /// Per-vertex colors (empty for collider meshes).
  pub colors: Vec<Color>,
}

impl MeshBuffers {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.vertices.clear();
    self.normals.clear();
    self.triangles.clear();
    self.colors.clear();
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.triangles.len() / 3
  }

  /// Append another buffer whose indices already account for this buffer's
  /// vertex count.
  ///
  /// Colors are only kept while every appended part carries them.
  pub fn append(&mut self, mut other: MeshBuffers, keep_colors: bool) {
    self.vertices.append(&mut other.vertices);
    self.normals.append(&mut other.normals);
    self.triangles.append(&mut other.triangles);
    if keep_colors {
      self.colors.append(&mut other.colors);
    }
  }
}

/// Per-face render and collider buffers, rebuilt wholesale each regeneration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanetMeshBuffers {
  pub render: MeshBuffers,
  pub collider: MeshBuffers,
}

impl PlanetMeshBuffers {
  pub fn clear(&mut self) {
    self.render.clear();
    self.collider.clear();
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
