use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use clap::Parser;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;

use linefield::LineError;
use linefield::app::{AppState, CANVAS_SIZE, Snapshot, StyleUpdate};
use linefield::config::{ParamUpdate, ShapeParams};
use linefield::logging::{self, LogLevelArg};

/// Local UI host: serves the slider page and regenerates on every change.
#[derive(Parser)]
#[command(name = "linefield-server")]
struct Args {
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    #[arg(long, default_value = "frontend")]
    frontend: PathBuf,

    /// JSON file with the initial shape parameters
    #[arg(long, value_name = "FILE")]
    params: Option<PathBuf>,

    /// Jitter seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, value_name = "LEVEL")]
    log_level: Option<LogLevelArg>,
}

type Shared = Arc<Mutex<AppState>>;

#[derive(Deserialize)]
struct LinesRequest {
    seed: Option<u64>,
    #[serde(flatten)]
    update: ParamUpdate,
}

#[derive(Serialize)]
struct LinesResponse {
    #[serde(flatten)]
    snapshot: Snapshot,
    layers: Vec<Layer>,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
}

#[derive(Serialize)]
struct Layer {
    name: String,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

struct ApiError(StatusCode, String);

impl From<LineError> for ApiError {
    fn from(e: LineError) -> Self {
        ApiError(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.1 });
        (self.0, Json(body)).into_response()
    }
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> Result<String, ApiError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)
        .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, format!("PNG encode failed: {e}")))?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

fn respond(app: &AppState, mut timings: Vec<TimingEntry>) -> Result<LinesResponse, ApiError> {
    let t = std::time::Instant::now();
    let preview = encode_png(&app.preview_rgba(), CANVAS_SIZE, CANVAS_SIZE)?;
    timings.push(TimingEntry {
        name: "render".into(),
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });
    Ok(LinesResponse {
        snapshot: app.snapshot(),
        layers: vec![Layer {
            name: "preview".into(),
            data_url: preview,
        }],
        timings,
        width: CANVAS_SIZE,
        height: CANVAS_SIZE,
    })
}

/// Run `f` against the locked state on the blocking pool.
async fn with_state<F>(state: Shared, f: F) -> Result<Json<LinesResponse>, ApiError>
where
    F: FnOnce(&mut AppState) -> Result<Vec<TimingEntry>, ApiError> + Send + 'static,
{
    let response = tokio::task::spawn_blocking(move || {
        let mut app = state.lock();
        let timings = f(&mut *app)?;
        respond(&app, timings)
    })
    .await
    .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))??;
    Ok(Json(response))
}

async fn current_handler(State(state): State<Shared>) -> Result<Json<LinesResponse>, ApiError> {
    with_state(state, |_| Ok(Vec::new())).await
}

async fn lines_handler(
    State(state): State<Shared>,
    Json(req): Json<LinesRequest>,
) -> Result<Json<LinesResponse>, ApiError> {
    with_state(state, move |app| {
        let t = std::time::Instant::now();
        app.apply_seeded(&req.update, req.seed)?;
        Ok(vec![TimingEntry {
            name: "lines".into(),
            ms: t.elapsed().as_secs_f64() * 1000.0,
        }])
    })
    .await
}

async fn style_handler(
    State(state): State<Shared>,
    Json(req): Json<StyleUpdate>,
) -> Result<Json<LinesResponse>, ApiError> {
    with_state(state, move |app| {
        app.apply_style(&req)?;
        Ok(Vec::new())
    })
    .await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.log_level);

    let params = match &args.params {
        Some(path) => ShapeParams::load(path)?,
        None => ShapeParams::default(),
    };
    let state: Shared = Arc::new(Mutex::new(AppState::from_params(params, args.seed)?));

    let app = Router::new()
        .route("/api/lines", get(current_handler).post(lines_handler))
        .route("/api/style", post(style_handler))
        .fallback_service(ServeDir::new(&args.frontend))
        .with_state(state);

    log::info!("linefield server at http://{}", args.addr);

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
