pub mod app;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod lines;
pub mod logging;
pub mod render;
pub mod rng;

use std::time::Instant;

use config::ShapeParams;
use error::Result;
use generator::LineFieldGenerator;
use lines::LineSet;
use rng::Rng;

pub use error::LineError;

/// One generated artwork.
pub struct Field {
    pub params: ShapeParams,
    pub row_step: usize,
    pub column_step: usize,
    pub horizontal: LineSet,
    pub vertical: LineSet,
    /// Preview of the visible window, `CANVAS_SIZE` square RGBA.
    pub rgba: Vec<u8>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Generate one field from `seed`, reporting per-stage timings.
pub fn generate(seed: u64, params: &ShapeParams) -> Result<(Field, Vec<Timing>)> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Generate both line sets
    let t = Instant::now();
    let generator = LineFieldGenerator::create(*params, Rng::new(seed))?;
    timings.push(Timing {
        name: "lines",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Rasterize the visible window
    let t = Instant::now();
    let rgba = render::render_field(
        generator.horizontal_lines(),
        generator.vertical_lines(),
        &render::Style::default(),
        &generator.space().viewport(),
        app::CANVAS_SIZE,
        app::CANVAS_SIZE,
    );
    timings.push(Timing {
        name: "render",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    let params = generator.params();
    let row_step = generator.row_step();
    let column_step = generator.column_step();
    let (horizontal, vertical) = generator.into_lines();
    let field = Field {
        params,
        row_step,
        column_step,
        horizontal,
        vertical,
        rgba,
    };

    Ok((field, timings))
}
