//! Configuration problems detected while sanitizing planet settings.
//!
//! None of these are fatal: each issue is logged once and the offending value
//! is replaced by a safe default (see [`crate::settings::PlanetSettings::sanitized`]).

use thiserror::Error;

/// A single configuration problem and the fallback that was applied.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigIssue {
  #[error("chunk density must be an even number >= {min}, got {found}; using {fallback}")]
  InvalidDensity {
    found: usize,
    min: usize,
    fallback: usize,
  },

  #[error("LOD distance list is empty; using the default table")]
  EmptyLodDistances,

  /// Tolerated: the values are kept as configured.
  #[error("LOD distances are not monotonic at depth {depth} ({previous} -> {current})")]
  NonMonotonicLodDistances {
    depth: usize,
    previous: f64,
    current: f64,
  },

  #[error("LOD distance at depth {depth} is negative or NaN ({value}); using {fallback}")]
  InvalidLodDistance {
    depth: usize,
    value: f64,
    fallback: f64,
  },

  #[error("tree depth {requested} exceeds the addressable maximum {max}; clamping")]
  DepthTooLarge { requested: usize, max: usize },

  #[error("non-LOD level count must be >= 1, got {found}; using 1")]
  InvalidNonLodLevels { found: usize },

  #[error("water level {found} outside [0, 0.5]; clamping to {fallback}")]
  WaterLevelOutOfRange { found: f64, fallback: f64 },

  #[error("planet radius must be positive, got {found}; using {fallback}")]
  InvalidRadius { found: f64, fallback: f64 },

  #[error("update interval must be positive, got {found}; using {fallback}")]
  InvalidUpdateInterval { found: f64, fallback: f64 },

  #[error("noise layer {layer}: {reason}")]
  InvalidNoiseLayer { layer: usize, reason: String },
}
