//! FaceTree - arena quadtree of one cube face.
//!
//! The tree is rebuilt from scratch every regeneration: a fresh root is
//! subdivided against the current viewer, then visible leaves are meshed.

use glam::{DQuat, DVec3};
use smallvec::{smallvec, SmallVec};

use super::face::project;
use super::{BoundingBox, CubeFace, Direction, NodeHash};
use crate::constants::{MAX_TREE_DEPTH, TEMPLATE_EXTENT};
use crate::planet::{PlanetContext, ViewerState};
use crate::presets::{MASK_DOWN, MASK_LEFT, MASK_RIGHT, MASK_UP};
use crate::settings::PlanetSettings;
use crate::types::MeshBuffers;

/// Index of a node in its [`FaceTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
  pub const ROOT: Self = Self(0);

  #[inline]
  pub fn index(self) -> usize {
    self.0
  }
}

/// One quadtree node.
#[derive(Clone, Debug)]
pub struct QuadNode {
  bounds: BoundingBox,
  depth: usize,
  hash: NodeHash,
  parent: Option<NodeId>,
  /// Slot index == quadrant code.
  children: Option<[NodeId; 4]>,
  should_be_rendered: bool,
  /// Deepest depth reached in this subtree during the current pass.
  max_current_depth: usize,
}

impl QuadNode {
  fn new(bounds: BoundingBox, depth: usize, hash: NodeHash, parent: Option<NodeId>) -> Self {
    Self {
      bounds,
      depth,
      hash,
      parent,
      children: None,
      should_be_rendered: true,
      max_current_depth: 0,
    }
  }

  pub fn bounds(&self) -> BoundingBox {
    self.bounds
  }

  pub fn depth(&self) -> usize {
    self.depth
  }

  pub fn hash(&self) -> NodeHash {
    self.hash
  }

  pub fn parent(&self) -> Option<NodeId> {
    self.parent
  }

  pub fn children(&self) -> Option<[NodeId; 4]> {
    self.children
  }

  #[inline]
  pub fn is_subdivided(&self) -> bool {
    self.children.is_some()
  }

  /// False when horizon culling stopped this node.
  pub fn should_be_rendered(&self) -> bool {
    self.should_be_rendered
  }

  pub fn max_current_depth(&self) -> usize {
    self.max_current_depth
  }
}

/// Depth of a neighbor relative to the node asking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeighborDepth {
  /// The neighbor is subdivided further.
  Finer,
  /// A leaf at the same depth.
  Same,
  /// The lookup ended on a shallower leaf.
  Coarser,
}

/// Quadtree over one cube face.
#[derive(Clone, Debug)]
pub struct FaceTree {
  face: CubeFace,
  rotation: DQuat,
  face_size: f64,
  nodes: Vec<QuadNode>,
}

impl FaceTree {
  /// Tree with a single root covering `[0, face_size]²`.
  pub fn new(face: CubeFace, face_size: f64) -> Self {
    let root = QuadNode::new(BoundingBox::new(0.0, 0.0, face_size), 0, NodeHash::ROOT, None);
    Self {
      face,
      rotation: face.rotation(),
      face_size,
      nodes: vec![root],
    }
  }

  pub fn face(&self) -> CubeFace {
    self.face
  }

  pub fn face_size(&self) -> f64 {
    self.face_size
  }

  #[inline]
  pub fn node(&self, id: NodeId) -> &QuadNode {
    &self.nodes[id.0]
  }

  pub fn root(&self) -> &QuadNode {
    &self.nodes[0]
  }

  /// Number of nodes, internal ones included.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Every node id, in creation order.
  pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
    (0..self.nodes.len()).map(NodeId)
  }

  /// Every leaf, culled ones included, in creation order.
  pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
    self
      .node_ids()
      .filter(|&id| !self.node(id).is_subdivided())
  }

  /// Locate a node by path hash.
  pub fn find(&self, hash: NodeHash) -> Option<NodeId> {
    let mut id = NodeId::ROOT;
    for code in hash.path() {
      id = self.node(id).children?[code as usize];
    }
    Some(id)
  }

  /// Patch center on the sea-level sphere, in world space.
  pub fn patch_center(&self, id: NodeId, radius: f64, planet_position: DVec3) -> DVec3 {
    let center = self.node(id).bounds.center();
    project(self.rotation, center, self.face_size) * radius + planet_position
  }

  /// Subdivide from the root against the current viewer.
  ///
  /// A node becomes a leaf when it reaches the maximum depth, when the viewer
  /// is beyond its depth's LOD distance, or when it sits below the viewer's
  /// horizon (which also clears its render flag).
  pub fn subdivide(&mut self, settings: &PlanetSettings, viewer: &ViewerState) {
    let max_depth = settings.max_depth().min(MAX_TREE_DEPTH);
    self.subdivide_node(NodeId::ROOT, settings, viewer, max_depth);
  }

  fn subdivide_node(
    &mut self,
    id: NodeId,
    settings: &PlanetSettings,
    viewer: &ViewerState,
    max_depth: usize,
  ) {
    let depth = self.node(id).depth;
    self.propagate_depth(id, depth);

    if self.node(id).is_subdivided() || depth >= max_depth {
      return;
    }

    let center = self.patch_center(id, settings.radius, viewer.planet_position);
    let distance = center.distance(viewer.viewer_position);
    if settings.lod_enabled && !(distance <= settings.lod_threshold(depth)) {
      return;
    }

    if settings.horizon_culling {
      let elevation = elevation_above_horizon(
        viewer.viewer_position,
        viewer.planet_position,
        center,
        settings.radius,
      );
      if elevation < -settings.max_visibility_angle {
        self.nodes[id.0].should_be_rendered = false;
        return;
      }
    }

    for child in self.split(id) {
      self.subdivide_node(child, settings, viewer, max_depth);
    }
  }

  /// Raise the high-water mark from `id` up to the root.
  fn propagate_depth(&mut self, id: NodeId, depth: usize) {
    let mut current = Some(id);
    while let Some(node_id) = current {
      let node = &mut self.nodes[node_id.0];
      if node.max_current_depth >= depth && node_id != id {
        break;
      }
      node.max_current_depth = node.max_current_depth.max(depth);
      current = node.parent;
    }
  }

  fn split(&mut self, id: NodeId) -> [NodeId; 4] {
    let parent = self.node(id).clone();
    let first = self.nodes.len();
    for code in 0..4u8 {
      self.nodes.push(QuadNode::new(
        parent.bounds.quadrant(code),
        parent.depth + 1,
        parent.hash.child(code),
        Some(id),
      ));
    }
    let children = [
      NodeId(first),
      NodeId(first + 1),
      NodeId(first + 2),
      NodeId(first + 3),
    ];
    self.nodes[id.0].children = Some(children);
    children
  }

  /// Leaves to render and nodes to build the collider from.
  ///
  /// Render: leaves not culled by the horizon test, all leaves when culling
  /// is off, and culled leaves no deeper than `always_render_depth`.
  /// Collider: the root plus every node at the root's high-water mark.
  pub fn visible_children(&self, settings: &PlanetSettings) -> (Vec<NodeId>, Vec<NodeId>) {
    let deepest = self.root().max_current_depth;
    let mut render = Vec::new();
    let mut collider = Vec::new();

    let mut stack: SmallVec<[NodeId; 64]> = smallvec![NodeId::ROOT];
    while let Some(id) = stack.pop() {
      let node = self.node(id);
      match node.children {
        Some(children) => stack.extend(children.into_iter().rev()),
        None => {
          if !settings.horizon_culling
            || node.should_be_rendered
            || node.depth <= settings.always_render_depth
          {
            render.push(id);
          }
        }
      }
      if node.depth == 0 || node.depth == deepest {
        collider.push(id);
      }
    }

    (render, collider)
  }

  /// Compare the node at `target` with a leaf of the same depth.
  ///
  /// Descends `levels` steps from the root along the target's path. Stopping
  /// early on a leaf means the target area is covered by a coarser node.
  pub fn check_neighbor_depth(&self, target: NodeHash, levels: usize) -> NeighborDepth {
    let mut node = self.root();
    for level in (1..=levels).rev() {
      let children = match node.children {
        Some(children) => children,
        None => return NeighborDepth::Coarser,
      };
      let code = (target.raw() >> ((level - 1) * 2)) & 0b11;
      node = self.node(children[code as usize]);
    }

    if node.is_subdivided() {
      NeighborDepth::Finer
    } else {
      NeighborDepth::Same
    }
  }

  /// 4-bit mask (U, R, D, L) of edges whose neighbor is coarser.
  ///
  /// Neighbors on another cube face are treated as equal depth.
  pub fn neighbors_sequence(&self, id: NodeId) -> u8 {
    let hash = self.node(id).hash;
    let bits = [MASK_UP, MASK_RIGHT, MASK_DOWN, MASK_LEFT];

    Direction::EDGES
      .into_iter()
      .zip(bits)
      .filter(|(direction, _)| match hash.neighbor(*direction) {
        Some(neighbor) => {
          self.check_neighbor_depth(neighbor, neighbor.depth()) == NeighborDepth::Coarser
        }
        None => false,
      })
      .fold(0, |mask, (_, bit)| mask | bit)
  }

  /// Mesh one node with the template matching its coarser neighbors.
  ///
  /// Vertices are relative to the planet center. Triangle indices are
  /// shifted by `triangle_offset`. Colors are only filled when `with_colors`.
  pub fn leaf_mesh(
    &self,
    id: NodeId,
    context: &PlanetContext,
    triangle_offset: u32,
    with_colors: bool,
  ) -> MeshBuffers {
    let node = self.node(id);
    let template = context.presets.template(self.neighbors_sequence(id));
    let radius = context.settings.radius;
    let terrain = &context.terrain;

    let vertex_count = template.vertices().len();
    let mut units = Vec::with_capacity(vertex_count);
    let mut positions = Vec::with_capacity(vertex_count);
    let mut altitudes = Vec::with_capacity(vertex_count);

    for &point in template.vertices() {
      let face_point = node.bounds.map_template(point, TEMPLATE_EXTENT);
      let unit = project(self.rotation, face_point, self.face_size);
      let altitude = terrain.altitude_at(unit);
      units.push(unit);
      positions.push(unit * (radius + altitude));
      altitudes.push(altitude);
    }

    let mut accumulated = vec![DVec3::ZERO; vertex_count];
    for tri in template.triangles().chunks_exact(3) {
      let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
      let normal = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
      accumulated[a] += normal;
      accumulated[b] += normal;
      accumulated[c] += normal;
    }

    let normals = accumulated
      .iter()
      .zip(&units)
      .map(|(sum, unit)| sum.try_normalize().unwrap_or(*unit).as_vec3().to_array())
      .collect();

    let colors = if with_colors {
      altitudes
        .iter()
        .map(|&altitude| terrain.color_at_altitude(altitude))
        .collect()
    } else {
      Vec::new()
    };

    MeshBuffers {
      vertices: positions.iter().map(|p| p.as_vec3().to_array()).collect(),
      normals,
      triangles: template
        .triangles()
        .iter()
        .map(|&index| index + triangle_offset)
        .collect(),
      colors,
    }
  }
}

/// Viewer elevation above the local horizon of a patch, in radians.
///
/// Law of cosines on the triangle (planet center, patch center, viewer):
/// the angle at the patch between "down" and "towards the viewer" is θ, and
/// the elevation is `θ - π/2`. A viewer straight above gives `π/2`, a viewer
/// on the far side of the planet approaches `-π/2`.
pub fn elevation_above_horizon(
  viewer: DVec3,
  planet_center: DVec3,
  patch_center: DVec3,
  radius: f64,
) -> f64 {
  let a = viewer.distance(planet_center);
  let b = viewer.distance(patch_center);
  if b <= f64::EPSILON || radius <= 0.0 {
    return std::f64::consts::FRAC_PI_2;
  }

  let cos_theta = ((radius * radius + b * b - a * a) / (2.0 * radius * b)).clamp(-1.0, 1.0);
  cos_theta.acos() - std::f64::consts::FRAC_PI_2
}
