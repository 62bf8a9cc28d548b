use rayon::prelude::*;
use serde::Serialize;

use crate::config::THICKNESS_MAX;
use crate::error::{LineError, Result};
use crate::grid::Viewport;
use crate::lines::{LineSet, Orientation};

const BACKGROUND: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Cosmetic attributes. Changing them never touches the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    pub row_color: [u8; 4],
    pub column_color: [u8; 4],
    /// Line width in pixels; 0 hides every line.
    pub line_thickness: u32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            row_color: BLACK,
            column_color: BLACK,
            line_thickness: 1,
        }
    }
}

/// `Style` in the wire form used by the frontend (`#rrggbb` strings).
#[derive(Clone, Debug, Serialize)]
pub struct StyleView {
    pub row_color: String,
    pub column_color: String,
    pub line_thickness: u32,
}

impl From<&Style> for StyleView {
    fn from(s: &Style) -> Self {
        Self {
            row_color: format_color(s.row_color),
            column_color: format_color(s.column_color),
            line_thickness: s.line_thickness,
        }
    }
}

impl Style {
    pub fn set_thickness(&mut self, thickness: u32) -> Result<()> {
        if thickness > THICKNESS_MAX {
            return Err(LineError::Range {
                name: "line_thickness",
                value: thickness as i64,
                min: 0,
                max: THICKNESS_MAX as i64,
            });
        }
        self.line_thickness = thickness;
        Ok(())
    }
}

/// Parse `#rrggbb` (leading `#` optional) into opaque RGBA.
pub fn parse_color(s: &str) -> Result<[u8; 4]> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(LineError::InvalidColor(s.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| LineError::InvalidColor(s.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?, 255])
}

pub fn format_color(c: [u8; 4]) -> String {
    format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])
}

/// Pixel-space rectangle, half-open on both axes.
#[derive(Clone, Copy, Debug)]
struct Rect {
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
    color: [u8; 4],
}

/// Pixel span `[lo, hi)` for a band of `thickness` pixels centred on `center`.
#[inline]
fn band(center: f32, thickness: f32) -> (f32, f32) {
    let lo = (center - thickness * 0.5).round();
    let hi = (center + thickness * 0.5).round().max(lo + 1.0);
    (lo, hi)
}

/// Pixel span along a segment. Never narrower than one pixel, so short
/// segments still show at coarse resolutions.
#[inline]
fn span(a: f32, b: f32) -> (f32, f32) {
    let lo = a.round();
    (lo, b.round().max(lo + 1.0))
}

#[inline]
fn clip(lo: f32, hi: f32, pixels: usize) -> Option<(usize, usize)> {
    let lo = lo.max(0.0);
    let hi = hi.min(pixels as f32);
    if hi <= lo {
        return None;
    }
    Some((lo as usize, hi as usize))
}

fn line_rects(set: &LineSet, color: [u8; 4], thickness: u32, view: &Viewport, w: usize, h: usize) -> Vec<Rect> {
    if thickness == 0 {
        return Vec::new();
    }
    let t = thickness as f32;
    set.segments()
        .filter_map(|seg| {
            if seg.length() == 0 {
                return None;
            }
            // Grid y grows upward; pixel rows grow downward.
            let px0 = view.to_pixel(seg.start.0 as f32, w);
            let px1 = view.to_pixel(seg.end.0 as f32, w);
            let py0 = h as f32 - view.to_pixel(seg.end.1 as f32, h);
            let py1 = h as f32 - view.to_pixel(seg.start.1 as f32, h);
            let (xs, ys) = match set.orientation {
                Orientation::Horizontal => (span(px0, px1), band(py0, t)),
                Orientation::Vertical => (band(px0, t), span(py0, py1)),
            };
            let (x0, x1) = clip(xs.0, xs.1, w)?;
            let (y0, y1) = clip(ys.0, ys.1, h)?;
            Some(Rect { x0, x1, y0, y1, color })
        })
        .collect()
}

/// Rasterize both line sets inside `view` onto a `w` x `h` RGBA canvas.
/// Horizontal lines are drawn first, vertical lines on top.
pub fn render_field(
    horizontal: &LineSet,
    vertical: &LineSet,
    style: &Style,
    view: &Viewport,
    w: usize,
    h: usize,
) -> Vec<u8> {
    let mut rects = line_rects(horizontal, style.row_color, style.line_thickness, view, w, h);
    rects.extend(line_rects(vertical, style.column_color, style.line_thickness, view, w, h));

    let mut rgba = vec![0u8; w * h * 4];
    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for px in row.chunks_exact_mut(4) {
            px.copy_from_slice(&BACKGROUND);
        }
        for r in rects.iter().filter(|r| r.y0 <= y && y < r.y1) {
            for x in r.x0..r.x1 {
                row[x * 4..x * 4 + 4].copy_from_slice(&r.color);
            }
        }
    });

    rgba
}
