//! Grid and tree constants shared by the presets, quadtree and settings.
//!
//! # Template Space
//!
//! ```text
//!  (0,100) ┌───┬───┬───┬───┐ (100,100)      res = density + 1 vertices per axis
//!          │   │   │   │   │                index = i + j * res
//!          ├───┼───┼───┼───┤                j grows towards the Up edge
//!          │   │   │   │   │
//!          ├───┼───┼───┼───┤                border ring quads belong to the
//!          │   │   │   │   │                U/R/D/L stitching strips, the
//!          ├───┼───┼───┼───┤                rest are interior quads
//!          │   │   │   │   │
//!    (0,0) └───┴───┴───┴───┘ (100,0)
//! ```

/// Default grid density of one leaf patch (quads per side). Must be even.
pub const DEFAULT_CHUNK_DENSITY: usize = 8;

/// Smallest density that still leaves room for stitching strips on each edge.
pub const MIN_CHUNK_DENSITY: usize = 2;

/// Side length of the parametric square the templates are expressed in.
pub const TEMPLATE_EXTENT: f64 = 100.0;

/// Number of coarser-neighbor combinations (4 edges, one bit each).
pub const PRESET_COUNT: usize = 16;

/// Cube faces per planet.
pub const FACE_COUNT: usize = 6;

/// Deepest node a 64-bit path hash can address (sentinel bit + 2 bits/level).
pub const MAX_TREE_DEPTH: usize = 31;

/// Octave offsets are drawn uniformly from `[-RANGE, RANGE)` per axis.
pub const OCTAVE_OFFSET_RANGE: f64 = 100_000.0;

/// Culled leaves at or above this depth still render by default.
pub const DEFAULT_ALWAYS_RENDER_DEPTH: usize = 2;

/// Default per-depth subdivision distances (index = depth), in planet units.
pub const DEFAULT_LOD_DISTANCES: [f64; 16] = [
  f64::MAX,
  f64::MAX,
  f64::MAX,
  45000.0,
  20000.0,
  10000.0,
  5000.0,
  3000.0,
  1600.0,
  800.0,
  400.0,
  230.0,
  140.0,
  75.0,
  50.0,
  30.0,
];

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
