//! Application state shared between UI events and rendering.
//!
//! The host owns one `AppState` and passes it to every event handler; shape
//! changes go through the generator, style changes only touch `style`.

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::{ParamUpdate, ShapeParams};
use crate::error::Result;
use crate::generator::LineFieldGenerator;
use crate::lines::LineSet;
use crate::render::{self, Style, StyleView};
use crate::rng::{JitterSource, Rng};

/// Preview canvas size in pixels.
pub const CANVAS_SIZE: usize = 500;

/// Color/thickness change from the UI. Absent fields are left alone.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StyleUpdate {
    pub row_color: Option<String>,
    pub column_color: Option<String>,
    pub line_thickness: Option<u32>,
}

/// Column-oriented line data, one list of `[a, b]` pairs per axis.
#[derive(Clone, Debug, Serialize)]
pub struct LineColumns {
    pub xs: Vec<[u32; 2]>,
    pub ys: Vec<[u32; 2]>,
}

impl From<&LineSet> for LineColumns {
    fn from(set: &LineSet) -> Self {
        Self {
            xs: set.xs().to_vec(),
            ys: set.ys().to_vec(),
        }
    }
}

/// Everything the frontend needs to redraw.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub params: ShapeParams,
    pub style: StyleView,
    pub horizontal: LineColumns,
    pub vertical: LineColumns,
}

pub struct AppState<R: JitterSource = Rng> {
    generator: LineFieldGenerator<R>,
    style: Style,
}

impl<R: JitterSource> AppState<R> {
    pub fn new(generator: LineFieldGenerator<R>) -> Self {
        Self {
            generator,
            style: Style::default(),
        }
    }

    pub fn generator(&self) -> &LineFieldGenerator<R> {
        &self.generator
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Forward a slider change to the generator. An empty update is a no-op
    /// and leaves the current line sets untouched.
    pub fn apply_params(&mut self, update: &ParamUpdate) -> Result<()> {
        if update.is_empty() {
            return Ok(());
        }
        self.generator.regenerate(update)
    }

    /// Swap in a new jitter source and regenerate with `update`, even when
    /// the update is empty.
    pub fn apply_params_with(&mut self, update: &ParamUpdate, rng: R) -> Result<()> {
        self.generator.set_rng(rng);
        self.generator.regenerate(update)
    }

    /// Apply a color/thickness change. All fields are checked before any is
    /// applied.
    pub fn apply_style(&mut self, update: &StyleUpdate) -> Result<()> {
        let mut next = self.style;
        if let Some(c) = &update.row_color {
            next.row_color = render::parse_color(c)?;
        }
        if let Some(c) = &update.column_color {
            next.column_color = render::parse_color(c)?;
        }
        if let Some(t) = update.line_thickness {
            next.set_thickness(t)?;
        }
        if next != self.style {
            info!("style changed to {:?}", StyleView::from(&next));
        }
        self.style = next;
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            params: self.generator.params(),
            style: StyleView::from(&self.style),
            horizontal: LineColumns::from(self.generator.horizontal_lines()),
            vertical: LineColumns::from(self.generator.vertical_lines()),
        }
    }

    /// Rasterized view of the current field, `CANVAS_SIZE` square RGBA.
    pub fn preview_rgba(&self) -> Vec<u8> {
        let view = self.generator.space().viewport();
        render::render_field(
            self.generator.horizontal_lines(),
            self.generator.vertical_lines(),
            &self.style,
            &view,
            CANVAS_SIZE,
            CANVAS_SIZE,
        )
    }
}

impl AppState<Rng> {
    /// State seeded from `seed`, or from entropy when `None`.
    pub fn from_params(params: ShapeParams, seed: Option<u64>) -> Result<Self> {
        let rng = seed.map(Rng::new).unwrap_or_else(Rng::from_entropy);
        Ok(Self::new(LineFieldGenerator::create(params, rng)?))
    }

    /// Like `apply_params`, but restarts the jitter stream from `seed` first
    /// when one is given.
    pub fn apply_seeded(&mut self, update: &ParamUpdate, seed: Option<u64>) -> Result<()> {
        match seed {
            Some(seed) => self.apply_params_with(update, Rng::new(seed)),
            None => self.apply_params(update),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceJitter;

    fn state() -> AppState<SequenceJitter> {
        let g = LineFieldGenerator::create(ShapeParams::default(), SequenceJitter::zero()).unwrap();
        AppState::new(g)
    }

    #[test]
    fn style_change_leaves_lines_alone() {
        let mut app = state();
        let before = app.generator().horizontal_lines().clone();
        app.apply_style(&StyleUpdate {
            row_color: Some("#ff0000".into()),
            line_thickness: Some(4),
            ..StyleUpdate::default()
        })
        .unwrap();
        assert_eq!(app.style().row_color, [255, 0, 0, 255]);
        assert_eq!(app.style().line_thickness, 4);
        assert_eq!(app.generator().horizontal_lines(), &before);
    }

    #[test]
    fn bad_style_update_is_atomic() {
        let mut app = state();
        let err = app.apply_style(&StyleUpdate {
            row_color: Some("#00ff00".into()),
            column_color: Some("nope".into()),
            line_thickness: None,
        });
        assert!(err.is_err());
        assert_eq!(app.style(), &Style::default());
    }

    #[test]
    fn snapshot_has_parallel_columns() {
        let app = state();
        let snap = app.snapshot();
        assert_eq!(snap.horizontal.xs.len(), snap.horizontal.ys.len());
        assert_eq!(snap.vertical.xs.len(), snap.vertical.ys.len());
        // Horizontal ys are constant per segment, vertical xs likewise.
        assert!(snap.horizontal.ys.iter().all(|p| p[0] == p[1]));
        assert!(snap.vertical.xs.iter().all(|p| p[0] == p[1]));
        assert_eq!(snap.style.row_color, "#000000");
    }

    #[test]
    fn empty_update_is_noop() {
        let mut app = state();
        let before = app.snapshot().params;
        app.apply_params(&ParamUpdate::default()).unwrap();
        assert_eq!(app.snapshot().params, before);
    }

    #[test]
    fn same_seed_same_field() {
        let mut app = AppState::from_params(ShapeParams::default(), Some(5)).unwrap();
        app.apply_seeded(&ParamUpdate::default(), Some(11)).unwrap();
        let first = app.generator().horizontal_lines().clone();
        app.apply_seeded(&ParamUpdate::default(), Some(11)).unwrap();
        assert_eq!(app.generator().horizontal_lines(), &first);
    }

    #[test]
    fn preview_has_canvas_size() {
        let app = state();
        assert_eq!(app.preview_rgba().len(), CANVAS_SIZE * CANVAS_SIZE * 4);
    }
}
