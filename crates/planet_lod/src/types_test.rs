use super::*;

#[test]
fn test_gradient_endpoints() {
  let start = Color::rgb(0.0, 0.0, 1.0);
  let end = Color::rgb(1.0, 0.0, 0.0);
  let gradient = ColorGradient::linear(start, end);

  assert_eq!(gradient.evaluate(0.0), start);
  assert_eq!(gradient.evaluate(1.0), end);
}

#[test]
fn test_gradient_clamps_outside_range() {
  let gradient = ColorGradient::linear(Color::BLACK, Color::WHITE);

  assert_eq!(gradient.evaluate(-3.0), Color::BLACK);
  assert_eq!(gradient.evaluate(7.0), Color::WHITE);
  assert_eq!(gradient.evaluate(f32::NAN), Color::BLACK);
}

#[test]
fn test_gradient_midpoint_interpolates() {
  let gradient = ColorGradient::linear(Color::BLACK, Color::WHITE);
  let mid = gradient.evaluate(0.5);

  assert!((mid.r - 0.5).abs() < 1e-6);
  assert!((mid.g - 0.5).abs() < 1e-6);
  assert!((mid.b - 0.5).abs() < 1e-6);
  assert_eq!(mid.a, 1.0);
}

/// Keys given out of order are sorted on construction.
#[test]
fn test_gradient_sorts_keys() {
  let gradient = ColorGradient::new(vec![
    GradientKey::new(1.0, Color::WHITE),
    GradientKey::new(0.0, Color::BLACK),
  ]);

  assert_eq!(gradient.keys()[0].time, 0.0);
  assert_eq!(gradient.evaluate(0.0), Color::BLACK);
}

#[test]
fn test_empty_gradient_is_white() {
  let gradient = ColorGradient::new(Vec::new());
  assert_eq!(gradient.evaluate(0.3), Color::WHITE);
}

#[test]
fn test_mesh_buffers_append_and_clear() {
  let mut a = MeshBuffers {
    vertices: vec![[0.0; 3]; 3],
    normals: vec![[0.0, 1.0, 0.0]; 3],
    triangles: vec![0, 1, 2],
    colors: vec![Color::WHITE; 3],
  };
  let b = MeshBuffers {
    vertices: vec![[1.0; 3]; 3],
    normals: vec![[0.0, 1.0, 0.0]; 3],
    triangles: vec![3, 4, 5],
    colors: vec![Color::BLACK; 3],
  };

  a.append(b, true);
  assert_eq!(a.vertices.len(), 6);
  assert_eq!(a.triangle_count(), 2);
  assert_eq!(a.colors.len(), 6);

  a.clear();
  assert!(a.is_empty());
  assert_eq!(a.triangle_count(), 0);
}
