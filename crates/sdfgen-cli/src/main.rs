//! sdfgen CLI - signed distance fields from triangle meshes
//!
//! Builds a BVH over a mesh, samples a signed distance grid around it and
//! writes the grid as whitespace-separated text.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sdfgen_bvh::Bvh;
use sdfgen_field::{FieldSampler, FieldSettings, SdfGrid};
use sdfgen_mesh::{parse_obj_file, uv_sphere, TriangleMesh};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sdfgen")]
#[command(about = "Signed distance field generator", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a signed distance field and write it to a text file
    Generate {
        #[command(flatten)]
        source: MeshSource,
        /// Output field file
        #[arg(short, long)]
        output: PathBuf,
        /// TOML file with sampling settings
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Samples per axis
        #[arg(short, long)]
        resolution: Option<u32>,
        /// Side length of the sampled cube
        #[arg(short, long)]
        bounds: Option<f32>,
        /// Rays cast per sample
        #[arg(short, long)]
        directions: Option<u32>,
    },
    /// Display information about a field file
    Info {
        /// Path to the field file
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a BVH and print its statistics
    Bvh {
        #[command(flatten)]
        source: MeshSource,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct MeshSource {
    /// Wavefront OBJ mesh
    #[arg(short, long)]
    mesh: Option<PathBuf>,
    /// Generate a UV sphere with this many segments instead
    #[arg(long)]
    sphere: Option<u32>,
}

/// Radius of spheres generated with `--sphere`.
const SPHERE_RADIUS: f32 = 1.0;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            source,
            output,
            config,
            resolution,
            bounds,
            directions,
        } => {
            let settings = load_settings(config.as_deref(), resolution, bounds, directions)?;
            generate(&source, &output, settings)?;
        }
        Commands::Info { file, json } => {
            show_info(&file, json)?;
        }
        Commands::Bvh { source, json } => {
            show_bvh(&source, json)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Start from the config file (or defaults) and apply flag overrides.
fn load_settings(
    config: Option<&Path>,
    resolution: Option<u32>,
    bounds: Option<f32>,
    directions: Option<u32>,
) -> Result<FieldSettings> {
    let mut settings = match config {
        Some(path) => FieldSettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => FieldSettings::default(),
    };
    if let Some(r) = resolution {
        settings.resolution = r;
    }
    if let Some(b) = bounds {
        settings.bounds_size = b;
    }
    if let Some(d) = directions {
        settings.direction_count = d;
    }
    settings.validate()?;
    Ok(settings)
}

fn load_mesh(source: &MeshSource) -> Result<TriangleMesh> {
    match (&source.mesh, source.sphere) {
        (Some(path), _) => parse_obj_file(path)
            .with_context(|| format!("failed to read mesh {}", path.display())),
        (None, Some(segments)) => Ok(uv_sphere(segments, SPHERE_RADIUS)),
        (None, None) => anyhow::bail!("either --mesh or --sphere is required"),
    }
}

/// Warn about meshes that will sample poorly: inward winding flips every
/// sign, and geometry outside the cube is never sampled.
fn check_mesh(mesh: &TriangleMesh, settings: &FieldSettings) {
    if mesh.signed_volume() < 0.0 {
        warn!("mesh encloses negative volume; inside and outside will be swapped");
    }
    if let Some((lo, hi)) = mesh.bounds() {
        let half = settings.bounds_size / 2.0;
        let extent = lo.coords.abs().max().max(hi.coords.abs().max());
        if extent > half {
            warn!(
                extent,
                bounds_size = settings.bounds_size,
                "mesh extends beyond the sampled cube"
            );
        }
    }
}

fn build_bvh(mesh: &TriangleMesh) -> Result<Bvh> {
    Bvh::build(&mesh.positions, &mesh.indices, &mesh.normals).context("failed to build BVH")
}

fn generate(source: &MeshSource, output: &Path, settings: FieldSettings) -> Result<()> {
    let mesh = load_mesh(source)?;
    check_mesh(&mesh, &settings);
    let bvh = build_bvh(&mesh)?;
    info!(
        triangles = bvh.stats().triangle_count,
        nodes = bvh.stats().total_node_count,
        time_ms = bvh.stats().time_ms,
        "built BVH"
    );

    let sampler = FieldSampler::new(settings)?;
    let grid = sampler.generate(&bvh);
    grid.save(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "Wrote {}³ field to {}",
        sampler.settings().resolution,
        output.display()
    );
    Ok(())
}

fn show_info(path: &Path, json: bool) -> Result<()> {
    let grid = SdfGrid::load(path).with_context(|| format!("failed to load {}", path.display()))?;
    let [nx, ny, nz] = grid.resolution();
    let bounds = grid.bounds();
    let (min, max) = grid.min_max().unwrap_or((0.0, 0.0));

    if json {
        let value = serde_json::json!({
            "resolution": [nx, ny, nz],
            "bounds": [bounds.x, bounds.y, bounds.z],
            "cells": grid.len(),
            "min_distance": min,
            "max_distance": max,
            "inside_cells": grid.inside_count(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("File: {}", path.display());
    println!("Resolution: {nx} x {ny} x {nz}");
    println!("Bounds: {} x {} x {}", bounds.x, bounds.y, bounds.z);
    println!("Cells: {}", grid.len());
    println!("Distance range: {min} .. {max}");
    println!("Inside cells: {}", grid.inside_count());
    Ok(())
}

fn show_bvh(source: &MeshSource, json: bool) -> Result<()> {
    let mesh = load_mesh(source)?;
    let bvh = build_bvh(&mesh)?;

    if json {
        println!("{}", serde_json::to_string_pretty(bvh.stats())?);
    } else {
        println!("{}", bvh.stats());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let settings = load_settings(None, Some(8), None, Some(4)).unwrap();
        assert_eq!(settings.resolution, 8);
        assert_eq!(settings.bounds_size, FieldSettings::default().bounds_size);
        assert_eq!(settings.direction_count, 4);
    }

    #[test]
    fn test_invalid_override_rejected() {
        assert!(load_settings(None, Some(0), None, None).is_err());
    }

    #[test]
    fn test_sphere_source() {
        let source = MeshSource {
            mesh: None,
            sphere: Some(8),
        };
        let mesh = load_mesh(&source).unwrap();
        assert!(mesh.num_triangles() > 0);
        let bvh = build_bvh(&mesh).unwrap();
        assert_eq!(bvh.stats().triangle_count, mesh.num_triangles());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["sdfgen", "generate", "--sphere", "16", "-o", "out.txt"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Generate { .. }));
        assert!(Cli::try_parse_from(["sdfgen", "bvh"]).is_err());
    }
}
