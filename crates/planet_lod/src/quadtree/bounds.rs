//! Square region of a cube face in parametric space.

use glam::DVec2;

/// Axis-aligned square `[x, x + dim] × [y, y + dim]` on a cube face.
///
/// The root covers `[0, face_size]²` where `face_size` is the planet radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
	/// Minimum x (left edge).
	pub x: f64,
	/// Minimum y (lower edge).
	pub y: f64,
	/// Side length.
	pub dim: f64,
}

impl BoundingBox {
	pub fn new(x: f64, y: f64, dim: f64) -> Self {
		debug_assert!(dim >= 0.0, "bounding box side must be non-negative");
		Self { x, y, dim }
	}

	/// Center of the square.
	#[inline]
	pub fn center(&self) -> DVec2 {
		DVec2::new(self.x + self.dim * 0.5, self.y + self.dim * 0.5)
	}

	/// Bounds of the quadrant with the given 2-bit code.
	///
	/// Bit 0 selects the right half, bit 1 the lower half.
	#[inline]
	pub fn quadrant(&self, code: u8) -> Self {
		let half = self.dim * 0.5;
		let right = (code & 1) as f64;
		let upper = (1 - ((code >> 1) & 1)) as f64;
		Self {
			x: self.x + right * half,
			y: self.y + upper * half,
			dim: half,
		}
	}

	/// Map a template point in `[0, extent]²` into these bounds.
	#[inline]
	pub fn map_template(&self, point: DVec2, extent: f64) -> DVec2 {
		DVec2::new(
			self.x + point.x / extent * self.dim,
			self.y + point.y / extent * self.dim,
		)
	}

	/// Check if this square contains a point (edges inclusive).
	#[inline]
	pub fn contains_point(&self, point: DVec2) -> bool {
		point.x >= self.x
			&& point.x <= self.x + self.dim
			&& point.y >= self.y
			&& point.y <= self.y + self.dim
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_center() {
		let bounds = BoundingBox::new(10.0, 20.0, 40.0);
		assert_eq!(bounds.center(), DVec2::new(30.0, 40.0));
	}

	#[test]
	fn test_quadrants() {
		let bounds = BoundingBox::new(0.0, 0.0, 8.0);

		assert_eq!(bounds.quadrant(0), BoundingBox::new(0.0, 4.0, 4.0)); // LU
		assert_eq!(bounds.quadrant(1), BoundingBox::new(4.0, 4.0, 4.0)); // RU
		assert_eq!(bounds.quadrant(2), BoundingBox::new(0.0, 0.0, 4.0)); // LD
		assert_eq!(bounds.quadrant(3), BoundingBox::new(4.0, 0.0, 4.0)); // RD
	}

	/// The four quadrants tile the parent exactly.
	#[test]
	fn test_quadrants_tile_parent() {
		let bounds = BoundingBox::new(-3.0, 5.0, 2.0);
		let area: f64 = (0..4u8).map(|code| bounds.quadrant(code).dim.powi(2)).sum();
		assert_eq!(area, bounds.dim * bounds.dim);

		for code in 0..4u8 {
			let child = bounds.quadrant(code);
			assert!(bounds.contains_point(DVec2::new(child.x, child.y)));
			assert!(bounds.contains_point(DVec2::new(child.x + child.dim, child.y + child.dim)));
		}
	}

	#[test]
	fn test_map_template() {
		let bounds = BoundingBox::new(100.0, 200.0, 50.0);
		assert_eq!(bounds.map_template(DVec2::ZERO, 100.0), DVec2::new(100.0, 200.0));
		assert_eq!(bounds.map_template(DVec2::splat(100.0), 100.0), DVec2::new(150.0, 250.0));
		assert_eq!(bounds.map_template(DVec2::new(50.0, 0.0), 100.0), DVec2::new(125.0, 200.0));
	}

	#[test]
	fn test_contains_point() {
		let bounds = BoundingBox::new(0.0, 0.0, 10.0);
		assert!(bounds.contains_point(DVec2::splat(5.0)));
		assert!(bounds.contains_point(DVec2::ZERO));
		assert!(bounds.contains_point(DVec2::splat(10.0)));
		assert!(!bounds.contains_point(DVec2::new(-1.0, 5.0)));
		assert!(!bounds.contains_point(DVec2::new(5.0, 11.0)));
	}
}
