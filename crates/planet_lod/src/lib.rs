//! planet_lod - Framework/engine independent cube-sphere planet terrain
//!
//! This crate builds seamless level-of-detail triangle meshes for procedurally
//! generated planets. Each of the six cube faces owns a quadtree that is
//! rebuilt from scratch on a timer, subdivided by viewer distance and horizon
//! visibility, and meshed leaf by leaf from precomputed grid templates.
//!
//! # Features
//!
//! - **Noise Layers**: multi-octave Perlin noise with per-layer lacunarity,
//!   persistence, threshold and strength
//! - **Height Field**: layered altitude with water clamp and gradient colors
//! - **Seam Templates**: 16 cached grid triangulations, one per combination of
//!   coarser edge neighbors, so adjacent LODs never leave T-junctions
//! - **Path-hash Quadtree**: neighbor lookup through a transition table over
//!   2-bit quadrant codes instead of stored sibling pointers
//! - **Background Generation**: fire-and-forget generation on rayon with a
//!   completion queue drained on the owning thread
//!
//! # Example
//!
//! ```ignore
//! use planet_lod::{MeshStore, Planet, PlanetSettings, SharedSink};
//!
//! let mut planet = Planet::new(PlanetSettings::default(), |_face| -> SharedSink {
//!   MeshStore::shared()
//! });
//! planet.set_viewer(DVec3::new(0.0, 7000.0, 0.0), DVec3::ZERO);
//!
//! // Once per frame on the owning thread
//! planet.update(dt);
//! ```

pub mod constants;
pub mod error;
pub mod settings;
pub mod types;

// Re-export commonly used items
pub use error::ConfigIssue;
pub use settings::{NoiseLayerSettings, PlanetSettings};
pub use types::{Color, ColorGradient, GradientKey, MeshBuffers, PlanetMeshBuffers};

// Noise evaluation
pub mod noise;
pub use noise::NoiseLayer;

// Altitude and color lookup
pub mod terrain;
pub use terrain::{TerrainExtremum, TerrainHeightField};

// Seam-free grid templates
pub mod presets;
pub use presets::{QuadPresets, QuadTemplate};

// Per-face quadtree
pub mod quadtree;
pub use quadtree::{BoundingBox, CubeFace, Direction, FaceTree, NodeHash, NodeId};

// Cross-thread completion queue
pub mod completion_queue;
pub use completion_queue::CompletionQueue;

// Face orchestration and planet container
pub mod chunk;
pub use chunk::{FaceChunk, GenerationMode, GenerationStats, MeshSink, MeshStore, SharedSink};

pub mod planet;
pub use planet::{Planet, PlanetContext, ShadingParams, ViewerState};

pub mod metrics;
