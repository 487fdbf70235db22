//! Terrain height field: layered noise to altitude, altitude to color.

mod extremum;
mod height_field;

pub use extremum::TerrainExtremum;
pub use height_field::TerrainHeightField;

#[cfg(test)]
#[path = "height_field_test.rs"]
mod height_field_test;
