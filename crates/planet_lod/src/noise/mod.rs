//! Coherent noise layers sampled on the unit sphere.
//!
//! Each [`NoiseLayer`] sums several octaves of 3D Perlin noise. Octave offsets
//! are drawn once from the planet seed, so a layer is a pure function of
//! `(seed, settings, point)` for the whole planet lifetime.

mod layer;
pub use layer::NoiseLayer;
