//! FaceChunk - generation and commit of one cube face.
//!
//! # Flow
//!
//! ```text
//! Sync                                   Background
//! ┌──────────────────┐                   ┌──────────────────┐
//! │ generate()       │                   │ rayon::spawn     │
//! │ commit_lock()    │                   │   generate()     │
//! │ commit to sink   │                   │   queue.enqueue ─┼──┐
//! └──────────────────┘                   └──────────────────┘  │
//!                                        ┌──────────────────┐  │
//!                                        │ queue.drain()    │◄─┘
//!                                        │ commit to sink   │
//!                                        └──────────────────┘
//! ```
//!
//! Background results are never cancelled. Each carries the generation number
//! it was issued with; a result landing after a newer one still replaces the
//! sink contents (last writer wins) and is logged as stale.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use web_time::Instant;

use crate::completion_queue::CompletionQueue;
use crate::constants::MAX_TREE_DEPTH;
use crate::metrics::PlanetMetrics;
use crate::planet::{PlanetContext, ViewerState};
use crate::quadtree::{CubeFace, FaceTree, NodeId};
use crate::types::{MeshBuffers, PlanetMeshBuffers};

/// Receiver of finished face meshes, typically a render/physics mesh handle.
///
/// Only ever called on the thread that drains the completion queue, or under
/// its commit lock.
pub trait MeshSink: Send {
  /// Replace the visible mesh of the face.
  fn replace_render(&mut self, mesh: &MeshBuffers);

  /// Replace the collision mesh of the face. `mesh.colors` is empty.
  fn replace_collider(&mut self, mesh: &MeshBuffers);
}

/// Sink shared between a face and the commit closures it schedules.
pub type SharedSink = Arc<Mutex<dyn MeshSink>>;

/// In-memory [`MeshSink`] that keeps the latest meshes.
#[derive(Clone, Debug, Default)]
pub struct MeshStore {
  pub meshes: PlanetMeshBuffers,
  /// Number of render replacements received.
  pub commits: u64,
}

impl MeshStore {
  /// A new store behind the shared-sink wrapper. Keep a clone of the returned
  /// handle to inspect the store; it coerces to [`SharedSink`].
  pub fn shared() -> Arc<Mutex<MeshStore>> {
    Arc::new(Mutex::new(MeshStore::default()))
  }
}

impl MeshSink for MeshStore {
  fn replace_render(&mut self, mesh: &MeshBuffers) {
    self.meshes.render.clone_from(mesh);
    self.commits += 1;
  }

  fn replace_collider(&mut self, mesh: &MeshBuffers) {
    self.meshes.collider.clone_from(mesh);
  }
}

/// How a regeneration delivers its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationMode {
  /// Generate on the calling thread and commit immediately.
  Sync,
  /// Generate on rayon's pool and commit on the next queue drain.
  Background,
}

/// Statistics of one face generation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationStats {
  pub face: CubeFace,
  /// Regeneration number this result was issued with.
  pub generation: u64,
  /// Nodes in the tree, internal ones included.
  pub node_count: usize,
  pub render_leaves: usize,
  pub collider_nodes: usize,
  /// Deepest depth reached this pass.
  pub max_depth: usize,
  /// Render leaves per depth (index = depth).
  pub leaves_per_depth: [u32; MAX_TREE_DEPTH + 1],
  pub render_vertices: usize,
  pub render_triangles: usize,
  pub collider_vertices: usize,
  pub collider_triangles: usize,
  /// Wall time of tree build and meshing in microseconds.
  pub generation_us: u64,
}

/// Everything a commit needs, cheap to clone into a worker.
#[derive(Clone)]
struct CommitTarget {
  sink: SharedSink,
  /// Highest generation committed so far.
  committed: Arc<AtomicU64>,
  metrics: Arc<Mutex<PlanetMetrics>>,
}

impl CommitTarget {
  fn commit(&self, meshes: &PlanetMeshBuffers, stats: &GenerationStats) {
    let previous = self.committed.fetch_max(stats.generation, Ordering::AcqRel);
    let stale = previous > stats.generation;
    if stale {
      tracing::debug!(
        face = ?stats.face,
        generation = stats.generation,
        newest = previous,
        "stale face result committed"
      );
    }

    {
      let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
      sink.replace_render(&meshes.render);
      sink.replace_collider(&meshes.collider);
    }

    self
      .metrics
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .record_commit(stats, stale);
  }
}

/// One cube face: its sink and regeneration bookkeeping.
pub struct FaceChunk {
  face: CubeFace,
  target: CommitTarget,
  /// Last generation number issued.
  issued: u64,
}

impl FaceChunk {
  pub fn new(face: CubeFace, sink: SharedSink, metrics: Arc<Mutex<PlanetMetrics>>) -> Self {
    Self {
      face,
      target: CommitTarget {
        sink,
        committed: Arc::new(AtomicU64::new(0)),
        metrics,
      },
      issued: 0,
    }
  }

  pub fn face(&self) -> CubeFace {
    self.face
  }

  pub fn sink(&self) -> &SharedSink {
    &self.target.sink
  }

  /// Last generation number issued.
  pub fn issued_generation(&self) -> u64 {
    self.issued
  }

  /// Highest generation number that reached the sink.
  pub fn committed_generation(&self) -> u64 {
    self.target.committed.load(Ordering::Acquire)
  }

  /// Rebuild this face and deliver it to the sink.
  ///
  /// `Sync` returns the statistics of the committed result. `Background`
  /// returns `None`; the result is committed by a later
  /// [`CompletionQueue::drain`].
  pub fn regenerate(
    &mut self,
    mode: GenerationMode,
    context: &Arc<PlanetContext>,
    viewer: ViewerState,
    queue: &Arc<CompletionQueue>,
  ) -> Option<GenerationStats> {
    self.issued += 1;
    let generation = self.issued;
    let face = self.face;

    match mode {
      GenerationMode::Sync => {
        let (meshes, stats) = Self::generate(face, context, &viewer, generation);
        let _commit = queue.commit_lock();
        self.target.commit(&meshes, &stats);
        Some(stats)
      }
      GenerationMode::Background => {
        let context = Arc::clone(context);
        let queue = Arc::clone(queue);
        let target = self.target.clone();

        rayon::spawn(move || {
          let (meshes, stats) = Self::generate(face, &context, &viewer, generation);
          queue.enqueue(move || target.commit(&meshes, &stats));
        });
        None
      }
    }
  }

  /// Build a fresh tree for `face` and mesh its visible nodes.
  ///
  /// Render leaves are concatenated with colors, collider nodes without;
  /// each part's triangle indices are offset by the vertices before it.
  #[tracing::instrument(level = "trace", skip_all, fields(face = ?face, generation = generation))]
  pub fn generate(
    face: CubeFace,
    context: &PlanetContext,
    viewer: &ViewerState,
    generation: u64,
  ) -> (PlanetMeshBuffers, GenerationStats) {
    let start = Instant::now();
    let settings = &context.settings;

    let mut tree = FaceTree::new(face, settings.radius);
    tree.subdivide(settings, viewer);
    let (render, collider) = tree.visible_children(settings);

    let meshes = PlanetMeshBuffers {
      render: merge_nodes(&tree, &render, context, true),
      collider: merge_nodes(&tree, &collider, context, false),
    };

    let mut leaves_per_depth = [0u32; MAX_TREE_DEPTH + 1];
    for &id in &render {
      leaves_per_depth[tree.node(id).depth()] += 1;
    }

    let stats = GenerationStats {
      face,
      generation,
      node_count: tree.len(),
      render_leaves: render.len(),
      collider_nodes: collider.len(),
      max_depth: tree.root().max_current_depth(),
      leaves_per_depth,
      render_vertices: meshes.render.vertices.len(),
      render_triangles: meshes.render.triangle_count(),
      collider_vertices: meshes.collider.vertices.len(),
      collider_triangles: meshes.collider.triangle_count(),
      generation_us: start.elapsed().as_micros() as u64,
    };

    tracing::trace!(
      nodes = stats.node_count,
      leaves = stats.render_leaves,
      triangles = stats.render_triangles,
      "face generated"
    );

    (meshes, stats)
  }
}

fn merge_nodes(
  tree: &FaceTree,
  nodes: &[NodeId],
  context: &PlanetContext,
  with_colors: bool,
) -> MeshBuffers {
  let mut merged = MeshBuffers::new();
  for &id in nodes {
    let offset = merged.vertices.len() as u32;
    merged.append(tree.leaf_mesh(id, context, offset, with_colors), with_colors);
  }
  merged
}

#[cfg(test)]
#[path = "chunk_test.rs"]
mod chunk_test;
