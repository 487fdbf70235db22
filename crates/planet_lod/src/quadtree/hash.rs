//! Path hashes and neighbor lookup.
//!
//! A node's hash is its root-to-node path written as 2-bit quadrant codes
//! below a single sentinel bit. The root is `0b1`, its lower-right child is
//! `0b111`, that child's upper-left child is `0b11100`.
//!
//! Neighbors are found by walking from the node's own digit towards the root.
//! At each level the transition table says which quadrant the path moves to
//! and whether the move stays inside the current parent (halt) or crosses
//! into the parent's own neighbor (carry a direction one level up).

use crate::constants::MAX_TREE_DEPTH;

/// Quadrant codes (bit 0 = right half, bit 1 = lower half).
pub const LU: u8 = 0;
pub const RU: u8 = 1;
pub const LD: u8 = 2;
pub const RD: u8 = 3;

/// One of the 8 grid neighbors of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
  Up,
  Right,
  Down,
  Left,
  UpRight,
  RightDown,
  DownLeft,
  UpLeft,
}

impl Direction {
  /// Edge directions, in coarser-neighbor mask order (U, R, D, L).
  pub const EDGES: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
  ];

  pub const ALL: [Direction; 8] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::UpRight,
    Direction::RightDown,
    Direction::DownLeft,
    Direction::UpLeft,
  ];

  #[inline]
  pub fn index(self) -> usize {
    self as usize
  }

  /// The direction pointing back.
  pub fn opposite(self) -> Self {
    match self {
      Direction::Up => Direction::Down,
      Direction::Right => Direction::Left,
      Direction::Down => Direction::Up,
      Direction::Left => Direction::Right,
      Direction::UpRight => Direction::DownLeft,
      Direction::RightDown => Direction::UpLeft,
      Direction::DownLeft => Direction::UpRight,
      Direction::UpLeft => Direction::RightDown,
    }
  }
}

use Direction::{Down as D, DownLeft as DL, Left as L, Right as R, RightDown as RDn, Up as U};
use Direction::{UpLeft as UL, UpRight as UR};

/// `TRANSITIONS[quadrant][direction] = (new quadrant, carry)`.
///
/// `carry == None` halts the walk: the neighbor shares the current parent.
const TRANSITIONS: [[(u8, Option<Direction>); 8]; 4] = [
  //         U             R             D             L             UR            RD            DL            UL
  /* LU */ [(LD, Some(U)), (RU, None), (LD, None), (RU, Some(L)), (RD, Some(U)), (RD, None), (RD, Some(L)), (RD, Some(UL))],
  /* RU */ [(RD, Some(U)), (LU, Some(R)), (RD, None), (LU, None), (LD, Some(UR)), (LD, Some(R)), (LD, None), (LD, Some(U))],
  /* LD */ [(LU, None), (RD, None), (LU, Some(D)), (RD, Some(L)), (RU, None), (RU, Some(D)), (RU, Some(DL)), (RU, Some(L))],
  /* RD */ [(RU, None), (LD, Some(R)), (RU, Some(D)), (LD, None), (LU, Some(R)), (LU, Some(RDn)), (LU, Some(D)), (LU, None)],
];

/// Root-to-node path of a quadtree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHash(u64);

impl NodeHash {
  /// Hash of a face root.
  pub const ROOT: Self = Self(1);

  /// Wrap a raw hash. Returns `None` without a sentinel bit or with an odd
  /// number of path bits.
  pub fn from_raw(raw: u64) -> Option<Self> {
    if raw == 0 {
      return None;
    }
    let bits = 63 - raw.leading_zeros();
    (bits % 2 == 0).then_some(Self(raw))
  }

  /// Build the hash of a path of quadrant codes, root first.
  pub fn from_path(path: &[u8]) -> Option<Self> {
    if path.len() > MAX_TREE_DEPTH {
      return None;
    }
    let mut hash = Self::ROOT;
    for &code in path {
      hash = hash.child(code);
    }
    Some(hash)
  }

  #[inline]
  pub fn raw(self) -> u64 {
    self.0
  }

  /// Depth of the node, 0 for the root.
  #[inline]
  pub fn depth(self) -> usize {
    ((63 - self.0.leading_zeros()) / 2) as usize
  }

  /// Hash of the child in quadrant `code`.
  #[inline]
  pub fn child(self, code: u8) -> Self {
    debug_assert!(self.depth() < MAX_TREE_DEPTH, "path hash overflow");
    Self((self.0 << 2) | (code & 0b11) as u64)
  }

  pub fn parent(self) -> Option<Self> {
    (self.0 != 1).then_some(Self(self.0 >> 2))
  }

  /// Quadrant code of this node within its parent, `None` for the root.
  #[inline]
  pub fn quadrant(self) -> Option<u8> {
    (self.0 != 1).then_some((self.0 & 0b11) as u8)
  }

  /// Quadrant codes from the root down to this node.
  pub fn path(self) -> Vec<u8> {
    let depth = self.depth();
    (0..depth)
      .map(|level| ((self.0 >> ((depth - 1 - level) * 2)) & 0b11) as u8)
      .collect()
  }

  /// Hash of the same-depth neighbor in `direction`.
  ///
  /// Returns `None` when the neighbor lies outside this face (the walk
  /// reached the root before halting).
  pub fn neighbor(self, direction: Direction) -> Option<Self> {
    let mut hash = self.0;
    let mut direction = direction;
    let mut level = 0;

    while (self.0 >> (2 * level)) != 1 {
      let shift = 2 * level;
      let quadrant = ((hash >> shift) & 0b11) as usize;
      let (next, carry) = TRANSITIONS[quadrant][direction.index()];
      hash = (hash & !(0b11 << shift)) | ((next as u64) << shift);

      match carry {
        None => return Some(Self(hash)),
        Some(carry) => direction = carry,
      }
      level += 1;
    }

    None
  }
}
