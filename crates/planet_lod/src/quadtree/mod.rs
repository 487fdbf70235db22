//! Quadtree module for per-face LOD subdivision.
//!
//! Each cube face owns one [`FaceTree`], rebuilt from scratch on every
//! regeneration. Nodes live in an arena; their position is additionally
//! encoded in a path hash so neighbors can be found without sibling pointers.
//!
//! # Quadrant Convention
//!
//! ```text
//!   +y (Up)
//!    ▲
//!    │ ┌────┬────┐
//!    │ │ LU │ RU │      code bit 0 = right half
//!    │ │ 0  │ 1  │      code bit 1 = lower half
//!    │ ├────┼────┤
//!    │ │ LD │ RD │      hash(child) = hash(parent) << 2 | code
//!    │ │ 2  │ 3  │      hash(root)  = 1
//!    │ └────┴────┘
//!    └─────────────► +x (Right)
//! ```
//!
//! # Module Structure
//!
//! - [`bounds`]: `BoundingBox` - square region in face parametric space
//! - [`hash`]: `NodeHash`, `Direction` - path hashes and the neighbor
//!   transition table
//! - [`face`]: `CubeFace` - face rotations and the cube-to-sphere mapping
//! - [`tree`]: `FaceTree` - arena, subdivision policy, visibility and leaf
//!   meshing

pub mod bounds;
pub mod face;
pub mod hash;
pub mod tree;

// Re-exports
pub use bounds::BoundingBox;
pub use face::CubeFace;
pub use hash::{Direction, NodeHash};
pub use tree::{FaceTree, NeighborDepth, NodeId, QuadNode};
