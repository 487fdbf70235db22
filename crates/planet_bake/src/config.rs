//! Configuration parsing for planet baking.

use anyhow::{Context, Result};
use glam::DVec3;
use planet_lod::PlanetSettings;
use serde::Deserialize;
use std::path::Path;

/// Root configuration for a bake run.
#[derive(Debug, Deserialize)]
pub struct Config {
	/// Output directory relative to the config file, for OBJ exports.
	#[serde(default = "default_output_dir")]
	pub output_dir: String,
	/// Where the viewer stands while the faces are generated.
	#[serde(default)]
	pub viewer: ViewerConfig,
	/// Planet description. Missing fields take the library defaults.
	#[serde(default)]
	pub planet: PlanetSettings,
}

/// Viewer placement, relative to the planet center.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ViewerConfig {
	/// Explicit position in world units.
	Position { position: [f64; 3] },
	/// Height above sea level along a direction.
	Altitude {
		altitude: f64,
		#[serde(default = "default_direction")]
		direction: [f64; 3],
	},
}

impl Default for ViewerConfig {
	fn default() -> Self {
		ViewerConfig::Altitude {
			altitude: 0.0,
			direction: default_direction(),
		}
	}
}

fn default_output_dir() -> String {
	"baked".to_string()
}

fn default_direction() -> [f64; 3] {
	[0.0, 1.0, 0.0]
}

impl ViewerConfig {
	/// Viewer position for a planet of `radius` centered at the origin.
	pub fn position(&self, radius: f64) -> DVec3 {
		match self {
			ViewerConfig::Position { position } => DVec3::from_array(*position),
			ViewerConfig::Altitude {
				altitude,
				direction,
			} => DVec3::from_array(*direction).normalize_or(DVec3::Y) * (radius + altitude),
		}
	}
}

impl Config {
	/// Load configuration from a TOML file.
	///
	/// With `strict`, any issue the planet settings would silently correct is
	/// an error instead.
	pub fn load(path: &Path, strict: bool) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		let config: Config =
			toml::from_str(&content).with_context(|| "Failed to parse config TOML")?;

		if strict {
			let (_, issues) = config.planet.sanitized();
			if let Some(first) = issues.first() {
				anyhow::bail!(
					"{} planet setting issue(s), first: {}",
					issues.len(),
					first
				);
			}
		}
		if config.output_dir.is_empty() {
			anyhow::bail!("output_dir must not be empty");
		}

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_defaults() {
		let config: Config = toml::from_str("").unwrap();
		assert_eq!(config.output_dir, "baked");
		assert_eq!(config.planet, PlanetSettings::default());
		assert_eq!(config.viewer.position(100.0), DVec3::new(0.0, 100.0, 0.0));
	}

	#[test]
	fn test_parse_viewer_variants() {
		let config: Config = toml::from_str(
			r#"
			[viewer]
			position = [1.0, 2.0, 3.0]
			"#,
		)
		.unwrap();
		assert_eq!(config.viewer.position(10.0), DVec3::new(1.0, 2.0, 3.0));

		let config: Config = toml::from_str(
			r#"
			[viewer]
			altitude = 50.0
			direction = [0.0, 0.0, -2.0]
			"#,
		)
		.unwrap();
		assert_eq!(config.viewer.position(100.0), DVec3::new(0.0, 0.0, -150.0));
	}

	#[test]
	fn test_parse_planet_overrides() {
		let config: Config = toml::from_str(
			r#"
			[planet]
			radius = 500.0
			chunk_density = 4
			lod_enabled = false
			seed = 3

			[[planet.noise_layers]]
			octaves = 5
			strength = 0.5
			"#,
		)
		.unwrap();

		assert_eq!(config.planet.radius, 500.0);
		assert_eq!(config.planet.seed, Some(3));
		assert_eq!(config.planet.noise_layers.len(), 1);
		assert_eq!(config.planet.noise_layers[0].octaves, 5);
		assert_eq!(config.planet.noise_layers[0].lacunarity, 2.0);
	}
}
