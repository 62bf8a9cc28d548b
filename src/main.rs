use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use linefield::config::ShapeParams;
use linefield::logging::{self, LogLevelArg};
use linefield::rng::Rng;

/// Generate a "Locations of Lines" field once and print a summary.
#[derive(Parser)]
#[command(name = "linefield")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Jitter seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with shape parameters; flags below override it
    #[arg(long, value_name = "FILE")]
    params: Option<PathBuf>,

    #[arg(long)]
    line_length: Option<i32>,

    #[arg(long)]
    line_gap: Option<i32>,

    /// 0-90, higher draws more rows
    #[arg(long)]
    row_density: Option<i32>,

    /// 0-90, higher draws more columns
    #[arg(long)]
    column_density: Option<i32>,

    #[arg(long, value_enum, value_name = "LEVEL")]
    log_level: Option<LogLevelArg>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    let mut params = match &cli.params {
        Some(path) => ShapeParams::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ShapeParams::default(),
    };
    // Explicit flags replace the value outright, zero included.
    if let Some(v) = cli.line_length {
        params.line_length = v;
    }
    if let Some(v) = cli.line_gap {
        params.line_gap = v;
    }
    if let Some(v) = cli.row_density {
        params.row_density = v;
    }
    if let Some(v) = cli.column_density {
        params.column_density = v;
    }

    let seed = cli.seed.unwrap_or_else(|| Rng::from_entropy().next_u64());
    log::info!("generating field with seed={seed}, {params:?}");

    let (field, timings) = linefield::generate(seed, &params)?;

    eprintln!("\nField:");
    eprintln!(
        "  rows     {:5} (every {} units) {:6} segments",
        field.horizontal.indices.len(),
        field.row_step,
        field.horizontal.len()
    );
    eprintln!(
        "  columns  {:5} (every {} units) {:6} segments",
        field.vertical.indices.len(),
        field.column_step,
        field.vertical.len()
    );
    let inked = field
        .rgba
        .chunks_exact(4)
        .filter(|p| p[..3] != [255, 255, 255])
        .count();
    eprintln!("  preview  {inked} inked pixels");

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    Ok(())
}
