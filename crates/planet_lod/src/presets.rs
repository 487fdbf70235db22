//! Precomputed grid triangulations for leaf patches.
//!
//! A leaf patch is a `res × res` vertex grid. Its border ring is split into
//! four strips (Up, Right, Down, Left). When the neighbor across an edge is
//! one level coarser, that neighbor only has every other vertex along the
//! shared edge, so the strip on this side fans over two cells and skips the
//! odd edge vertices. One template exists per 4-bit mask of coarser edges.
//!
//! # Mask Layout
//!
//! ```text
//!            Up (0b1000)
//!          ┌───────────┐
//!          │ ╲ ╱ ╲ ╱ ╲ │
//!   Left   │           │  Right
//! (0b0001) │  interior │ (0b0100)
//!          │           │
//!          │ ╱ ╲ ╱ ╲ ╱ │
//!          └───────────┘
//!           Down (0b0010)
//! ```
//!
//! All triangles wind clockwise in template space (x right, y up).

use glam::DVec2;

use crate::constants::{PRESET_COUNT, TEMPLATE_EXTENT};

/// Coarser-neighbor bit of the Up edge.
pub const MASK_UP: u8 = 0b1000;
/// Coarser-neighbor bit of the Right edge.
pub const MASK_RIGHT: u8 = 0b0100;
/// Coarser-neighbor bit of the Down edge.
pub const MASK_DOWN: u8 = 0b0010;
/// Coarser-neighbor bit of the Left edge.
pub const MASK_LEFT: u8 = 0b0001;

/// Vertices and triangle indices of one grid triangulation.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadTemplate {
  vertices: Vec<DVec2>,
  triangles: Vec<u32>,
}

impl QuadTemplate {
  /// Parametric vertex positions in `[0, 100]²`, row-major.
  pub fn vertices(&self) -> &[DVec2] {
    &self.vertices
  }

  /// Triangle indices, 3 per triangle.
  pub fn triangles(&self) -> &[u32] {
    &self.triangles
  }

  pub fn triangle_count(&self) -> usize {
    self.triangles.len() / 3
  }
}

/// The 16 seam templates for one grid density.
///
/// Built once per planet and shared by every face.
#[derive(Clone, Debug)]
pub struct QuadPresets {
  density: usize,
  templates: Vec<QuadTemplate>,
}

impl QuadPresets {
  /// Build all templates for `density` quads per side.
  ///
  /// `density` must be even and at least 2 (see
  /// [`PlanetSettings::sanitized`](crate::settings::PlanetSettings::sanitized)).
  pub fn instantiate(density: usize) -> Self {
    debug_assert!(
      density >= 2 && density % 2 == 0,
      "grid density must be even and >= 2"
    );

    let res = density + 1;
    let vertices = grid_vertices(res);
    let templates = (0..PRESET_COUNT as u8)
      .map(|mask| QuadTemplate {
        vertices: vertices.clone(),
        triangles: grid_triangles(mask, res),
      })
      .collect();

    Self { density, templates }
  }

  pub fn density(&self) -> usize {
    self.density
  }

  /// Vertices per side.
  pub fn resolution(&self) -> usize {
    self.density + 1
  }

  /// Template for a coarser-neighbor mask. Only the low 4 bits are used.
  #[inline]
  pub fn template(&self, mask: u8) -> &QuadTemplate {
    &self.templates[(mask & 0b1111) as usize]
  }

  pub fn templates(&self) -> &[QuadTemplate] {
    &self.templates
  }
}

fn grid_vertices(res: usize) -> Vec<DVec2> {
  let step = TEMPLATE_EXTENT / (res - 1) as f64;
  let mut vertices = Vec::with_capacity(res * res);
  for j in 0..res {
    for i in 0..res {
      vertices.push(DVec2::new(i as f64 * step, j as f64 * step));
    }
  }
  vertices
}

fn grid_triangles(mask: u8, res: usize) -> Vec<u32> {
  let mut tris: Vec<usize> = Vec::with_capacity(6 * (res - 1) * (res - 1));

  // Interior quads, everything off the border ring
  for j in 1..res - 2 {
    for i in 1..res - 2 {
      let index = i + j * res;
      tris.extend_from_slice(&[index + res, index + 1, index]);
      tris.extend_from_slice(&[index + res, index + 1 + res, index + 1]);
    }
  }

  // i walks along the strip; corners (i == 0, i == res - 2) only get the
  // edge-side triangle, the neighboring strip closes them.
  let top = res * (res - 1);
  for i in 0..res - 1 {
    let even = i % 2 == 0;
    let inner = i != 0 && i != res - 2;

    // Up
    if mask & MASK_UP != 0 {
      if even {
        tris.extend_from_slice(&[top + i, top + i + 2, top + i + 1 - res]);
      }
    } else {
      let low = if even { top + i + 1 - res } else { top + i - res };
      tris.extend_from_slice(&[top + i, top + i + 1, low]);
    }
    if inner {
      let high = if even { top + i } else { top + i + 1 };
      tris.extend_from_slice(&[high, top + i + 1 - res, top + i - res]);
    }

    // Right
    if mask & MASK_RIGHT != 0 {
      if even {
        tris.extend_from_slice(&[
          (i + 1) * res + res - 2,
          (i + 1) * res + 2 * res - 1,
          i * res + res - 1,
        ]);
      }
    } else {
      let first = if even {
        (i + 1) * res + res - 2
      } else {
        i * res + res - 2
      };
      tris.extend_from_slice(&[first, (i + 1) * res + res - 1, i * res + res - 1]);
    }
    if inner {
      let edge = if even {
        i * res + res - 1
      } else {
        (i + 1) * res + res - 1
      };
      tris.extend_from_slice(&[(i + 1) * res + res - 2, edge, i * res + res - 2]);
    }

    // Down
    if mask & MASK_DOWN != 0 {
      if even {
        tris.extend_from_slice(&[i + res + 1, i + 2, i]);
      }
    } else {
      let first = if even { i + res + 1 } else { i + res };
      tris.extend_from_slice(&[first, i + 1, i]);
    }
    if inner {
      let edge = if even { i } else { i + 1 };
      tris.extend_from_slice(&[i + res, i + res + 1, edge]);
    }

    // Left
    if mask & MASK_LEFT != 0 {
      if even {
        tris.extend_from_slice(&[(i + 2) * res, (i + 1) * res + 1, i * res]);
      }
    } else {
      let inward = if even { (i + 1) * res + 1 } else { i * res + 1 };
      tris.extend_from_slice(&[(i + 1) * res, inward, i * res]);
    }
    if inner {
      let edge = if even { i * res } else { (i + 1) * res };
      tris.extend_from_slice(&[(i + 1) * res + 1, i * res + 1, edge]);
    }
  }

  tris.into_iter().map(|index| index as u32).collect()
}

#[cfg(test)]
#[path = "presets_test.rs"]
mod presets_test;
