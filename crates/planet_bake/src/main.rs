//! Headless planet baker.
//!
//! Generates all six cube faces of a planet once, from a fixed viewer
//! position, and reports per-face statistics. Optionally exports the render
//! meshes as Wavefront OBJ files.
//!
//! Logging goes through `env_logger`; set `RUST_LOG=planet_lod=debug` to see
//! the generator's own events.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use glam::DVec3;
use planet_lod::{CubeFace, FaceChunk, MeshBuffers, PlanetContext, ViewerState};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use config::Config;

/// Headless planet face generator.
#[derive(Parser, Debug)]
#[command(name = "bake_planet")]
#[command(about = "Generates the six faces of a planet and reports mesh statistics")]
struct Args {
	/// Path to configuration TOML file.
	#[arg(short, long)]
	config: PathBuf,

	/// Override the planet seed from the config.
	#[arg(short, long)]
	seed: Option<u64>,

	/// Write one OBJ file per face into the output directory.
	#[arg(short, long)]
	export: bool,

	/// Fail instead of correcting invalid planet settings.
	#[arg(long)]
	strict: bool,
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	tracing::info!("Loading config from: {}", args.config.display());
	let mut config = Config::load(&args.config, args.strict)?;
	if let Some(seed) = args.seed {
		config.planet.seed = Some(seed);
	}

	let context = PlanetContext::new(config.planet.clone());
	let viewer = ViewerState {
		viewer_position: config.viewer.position(context.settings.radius),
		planet_position: DVec3::ZERO,
	};
	tracing::info!(
		"Baking planet: radius {}, density {}, seed {}, viewer at {:?}",
		context.settings.radius,
		context.settings.chunk_density,
		context.seed,
		viewer.viewer_position
	);

	let output_dir = args
		.config
		.parent()
		.unwrap_or(Path::new("."))
		.join(&config.output_dir);
	if args.export {
		std::fs::create_dir_all(&output_dir)
			.with_context(|| format!("Failed to create output dir: {}", output_dir.display()))?;
	}

	let mut total_triangles = 0;
	for face in CubeFace::ALL {
		let (meshes, stats) = FaceChunk::generate(face, &context, &viewer, 1);
		total_triangles += stats.render_triangles;

		tracing::info!(
			"  {:?}: {} nodes, {} leaves (max depth {}), {} render tris, {} collider tris, {} us",
			face,
			stats.node_count,
			stats.render_leaves,
			stats.max_depth,
			stats.render_triangles,
			stats.collider_triangles,
			stats.generation_us
		);

		if args.export {
			let path = output_dir.join(format!("{}.obj", face_name(face)));
			write_obj(&meshes.render, &path)
				.with_context(|| format!("Failed to write: {}", path.display()))?;
			tracing::info!("    ✓ {}", path.display());
		}
	}

	let extremum = context.terrain.extremum();
	tracing::info!(
		"Done! {} triangles, altitude range [{:.2}, {:.2}]",
		total_triangles,
		extremum.min(),
		extremum.max()
	);

	Ok(())
}

fn face_name(face: CubeFace) -> &'static str {
	match face {
		CubeFace::Up => "up",
		CubeFace::Down => "down",
		CubeFace::Forward => "forward",
		CubeFace::Back => "back",
		CubeFace::Left => "left",
		CubeFace::Right => "right",
	}
}

/// Write positions, normals and faces (1-based indices) as Wavefront OBJ.
///
/// Triangles are emitted in the mesh's own winding.
fn write_obj(mesh: &MeshBuffers, path: &Path) -> Result<()> {
	let file = std::fs::File::create(path)?;
	let mut out = BufWriter::new(file);

	for [x, y, z] in &mesh.vertices {
		writeln!(out, "v {x} {y} {z}")?;
	}
	for [x, y, z] in &mesh.normals {
		writeln!(out, "vn {x} {y} {z}")?;
	}
	for tri in mesh.triangles.chunks_exact(3) {
		let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
		writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
	}

	out.flush()?;
	Ok(())
}
