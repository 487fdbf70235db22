use super::*;

#[test]
fn test_default_density_is_even() {
  assert_eq!(DEFAULT_CHUNK_DENSITY % 2, 0);
  assert!(DEFAULT_CHUNK_DENSITY >= MIN_CHUNK_DENSITY);
}

/// Sentinel bit plus two bits per level must fit in a u64.
#[test]
fn test_max_depth_fits_hash() {
  assert!(1 + 2 * MAX_TREE_DEPTH <= 64);
}

#[test]
fn test_default_lod_distances_non_increasing() {
  for pair in DEFAULT_LOD_DISTANCES.windows(2) {
    assert!(pair[0] >= pair[1], "{} < {}", pair[0], pair[1]);
  }
}
