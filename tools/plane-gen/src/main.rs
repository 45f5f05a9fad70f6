//! plane-gen - flat grid mesh generator
//!
//! Writes an `n_x` x `n_y` vertex plane centered at the origin as a Wavefront OBJ file.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use plane_gen::{generate_plane, save_obj, PlaneParams, DEFAULT_SIZE};

#[derive(Parser)]
#[command(name = "plane-gen")]
#[command(about = "Generate plane mesh")]
#[command(version)]
struct Cli {
    /// Vertex count along X (at least 1)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    n_x: u32,

    /// Vertex count along Y (at least 1)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    n_y: u32,

    /// Output OBJ file
    dest_file: PathBuf,

    /// Plane width along X
    #[arg(long, default_value_t = DEFAULT_SIZE, allow_negative_numbers = true)]
    size_x: f64,

    /// Plane height along Y
    #[arg(long, default_value_t = DEFAULT_SIZE, allow_negative_numbers = true)]
    size_y: f64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let params = PlaneParams::new(cli.n_x, cli.n_y).with_size(cli.size_x, cli.size_y);

    let mesh = generate_plane(&params)
        .with_context(|| format!("Failed to generate {}x{} plane", cli.n_x, cli.n_y))?;

    save_obj(&cli.dest_file, &mesh)
        .with_context(|| format!("Failed to write {}", cli.dest_file.display()))?;

    Ok(())
}
