//! Running altitude extremum shared by every generating thread.

use std::sync::atomic::{AtomicU64, Ordering};

/// Lowest and highest altitude observed since the last reset.
///
/// Stored as f64 bit patterns in atomics so concurrent face generation can
/// update it without a lock. Only used to normalize colors.
#[derive(Debug)]
pub struct TerrainExtremum {
  min: AtomicU64,
  max: AtomicU64,
}

impl TerrainExtremum {
  /// Empty extremum: min = +inf, max = -inf.
  pub fn new() -> Self {
    Self {
      min: AtomicU64::new(f64::INFINITY.to_bits()),
      max: AtomicU64::new(f64::NEG_INFINITY.to_bits()),
    }
  }

  /// Forget every observed altitude.
  pub fn reset(&self) {
    self.min.store(f64::INFINITY.to_bits(), Ordering::Relaxed);
    self.max.store(f64::NEG_INFINITY.to_bits(), Ordering::Relaxed);
  }

  /// Widen the extremum to include `altitude`. NaN is ignored.
  pub fn record(&self, altitude: f64) {
    if altitude.is_nan() {
      return;
    }
    let _ = self.min.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
      (altitude < f64::from_bits(bits)).then(|| altitude.to_bits())
    });
    let _ = self.max.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
      (altitude > f64::from_bits(bits)).then(|| altitude.to_bits())
    });
  }

  #[inline]
  pub fn min(&self) -> f64 {
    f64::from_bits(self.min.load(Ordering::Relaxed))
  }

  #[inline]
  pub fn max(&self) -> f64 {
    f64::from_bits(self.max.load(Ordering::Relaxed))
  }

  /// `(altitude - min) / (max - min)`, NaN when the extremum is degenerate.
  #[inline]
  pub fn normalize(&self, altitude: f64) -> f64 {
    let (min, max) = (self.min(), self.max());
    let span = max - min;
    if !(span > 0.0) || !span.is_finite() {
      return f64::NAN;
    }
    (altitude - min) / span
  }
}

impl Default for TerrainExtremum {
  fn default() -> Self {
    Self::new()
  }
}

impl Clone for TerrainExtremum {
  /// Snapshot of the current values.
  fn clone(&self) -> Self {
    Self {
      min: AtomicU64::new(self.min.load(Ordering::Relaxed)),
      max: AtomicU64::new(self.max.load(Ordering::Relaxed)),
    }
  }
}
