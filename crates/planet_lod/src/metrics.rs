//! Engine-agnostic metrics collection for planet generation statistics.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use planet_lod::metrics::{PlanetMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // Read a snapshot after a few ticks:
//! let metrics = planet.metrics();
//! println!("{} leaves, {:.1} us", metrics.total_leaves(), metrics.avg_generation_us());
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::chunk::GenerationStats;
use crate::constants::{FACE_COUNT, MAX_TREE_DEPTH};

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new value, evicting the oldest if at capacity.
    pub fn push(&mut self, value: T) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate over values (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }
}

impl RollingWindow<u64> {
    pub fn sum(&self) -> u64 {
        self.buffer.iter().sum()
    }

    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.buffer.len() as f64
        }
    }

    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = self.buffer.iter().min()?;
        let max = self.buffer.iter().max()?;
        Some((*min, *max))
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(64) // ~30 s of regenerations at the default interval
    }
}

/// Planet-level statistics, refreshed by every committed face.
#[derive(Debug, Clone, Default)]
pub struct PlanetMetrics {
    /// Latest committed statistics per cube face.
    pub faces: [Option<GenerationStats>; FACE_COUNT],

    /// Rolling window of face generation times in microseconds.
    pub generation_timings: RollingWindow<u64>,

    /// Faces committed this session.
    pub total_commits: u64,
    /// Commits that landed after a newer generation of the same face.
    pub stale_commits: u64,
}

impl PlanetMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget per-face snapshots and timings. Counters are cumulative.
    pub fn reset(&mut self) {
        self.faces = Default::default();
        self.generation_timings.clear();
    }

    /// Record a committed face.
    pub fn record_commit(&mut self, stats: &GenerationStats, stale: bool) {
        if !is_enabled() {
            return;
        }

        self.generation_timings.push(stats.generation_us);
        self.total_commits += 1;
        if stale {
            self.stale_commits += 1;
        }
        self.faces[stats.face.index()] = Some(stats.clone());
    }

    /// Render leaves per depth, summed over faces.
    pub fn leaves_per_depth(&self) -> [u32; MAX_TREE_DEPTH + 1] {
        let mut total = [0u32; MAX_TREE_DEPTH + 1];
        for stats in self.faces.iter().flatten() {
            for (sum, count) in total.iter_mut().zip(stats.leaves_per_depth.iter()) {
                *sum += count;
            }
        }
        total
    }

    pub fn total_leaves(&self) -> usize {
        self.faces.iter().flatten().map(|s| s.render_leaves).sum()
    }

    pub fn total_vertices(&self) -> usize {
        self.faces.iter().flatten().map(|s| s.render_vertices).sum()
    }

    pub fn total_triangles(&self) -> usize {
        self.faces.iter().flatten().map(|s| s.render_triangles).sum()
    }

    pub fn avg_generation_us(&self) -> f64 {
        self.generation_timings.average()
    }
}
