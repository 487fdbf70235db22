//! Cube faces and the cube-to-sphere mapping.

use glam::{DQuat, DVec2, DVec3, EulerRot};

use crate::constants::FACE_COUNT;

/// One of the six faces of the planet cube.
///
/// Every face is the `+Y` face rotated by fixed Euler angles (degrees,
/// applied Z, then X, then Y).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CubeFace {
  #[default]
  Up,
  Down,
  Forward,
  Back,
  Left,
  Right,
}

impl CubeFace {
  pub const ALL: [CubeFace; FACE_COUNT] = [
    CubeFace::Up,
    CubeFace::Down,
    CubeFace::Forward,
    CubeFace::Back,
    CubeFace::Left,
    CubeFace::Right,
  ];

  #[inline]
  pub fn index(self) -> usize {
    self as usize
  }

  /// Face rotation as `(x, y, z)` Euler angles in degrees.
  pub fn euler_degrees(self) -> DVec3 {
    match self {
      CubeFace::Up => DVec3::new(0.0, 0.0, 0.0),
      CubeFace::Down => DVec3::new(0.0, 0.0, 180.0),
      CubeFace::Forward => DVec3::new(90.0, 0.0, 0.0),
      CubeFace::Back => DVec3::new(-90.0, 0.0, 0.0),
      CubeFace::Left => DVec3::new(0.0, 0.0, 90.0),
      CubeFace::Right => DVec3::new(0.0, 0.0, -90.0),
    }
  }

  pub fn rotation(self) -> DQuat {
    let e = self.euler_degrees();
    DQuat::from_euler(
      EulerRot::YXZ,
      e.y.to_radians(),
      e.x.to_radians(),
      e.z.to_radians(),
    )
  }

  /// Outward normal of the face center.
  pub fn normal(self) -> DVec3 {
    self.rotation() * DVec3::Y
  }

  /// Project a parametric face point onto the unit sphere.
  ///
  /// `point` lies in `[0, face_size]²`. The face is centered on the cube
  /// axis, pushed out by half its size, normalized, then rotated.
  #[inline]
  pub fn to_unit_sphere(self, point: DVec2, face_size: f64) -> DVec3 {
    project(self.rotation(), point, face_size)
  }
}

/// [`CubeFace::to_unit_sphere`] with a precomputed face rotation.
#[inline]
pub(crate) fn project(rotation: DQuat, point: DVec2, face_size: f64) -> DVec3 {
  let half = face_size * 0.5;
  let cube = DVec3::new(point.x - half, half, point.y - half);
  rotation * cube.normalize()
}
