use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LineError, Result};

/// Logical grid resolution. The grid space spans `[0, 3 * GRID_RESOLUTION)`.
pub const GRID_RESOLUTION: usize = 1000;

/// User-facing density is stored as `DENSITY_BASE - density` (a stride).
pub const DENSITY_BASE: i32 = 100;

pub const DENSITY_MAX: i32 = 90;
pub const THICKNESS_MAX: u32 = 10;

/// Shape parameters, exposed as UI sliders in the frontend.
///
/// Densities are user-facing here (higher = more lines); the generator
/// keeps the inverted stride internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParams {
    pub line_length: i32,
    pub line_gap: i32,
    pub row_density: i32,
    pub column_density: i32,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            line_length: 250,
            line_gap: 50,
            row_density: 80,
            column_density: 80,
        }
    }
}

impl ShapeParams {
    /// Read a params file. Missing fields fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: ShapeParams = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    /// Check every field. Density and sign problems are reported before the
    /// degenerate-stride check.
    pub fn validate(&self) -> Result<()> {
        check_range("line_length", self.line_length, 0, i32::MAX)?;
        check_range("line_gap", self.line_gap, 0, i32::MAX)?;
        check_range("row_density", self.row_density, 0, DENSITY_MAX)?;
        check_range("column_density", self.column_density, 0, DENSITY_MAX)?;
        if (self.line_length as i64 + self.line_gap as i64) <= 0 {
            return Err(LineError::Configuration {
                line_length: self.line_length,
                line_gap: self.line_gap,
            });
        }
        Ok(())
    }

    /// Merge a partial update. Absent fields and fields set to `0` keep the
    /// current value: a zero in an update is indistinguishable from "not
    /// supplied" for callers driven by slider events.
    pub fn merged(&self, update: &ParamUpdate) -> Self {
        let pick = |new: Option<i32>, old: i32| match new {
            Some(v) if v != 0 => v,
            _ => old,
        };
        Self {
            line_length: pick(update.line_length, self.line_length),
            line_gap: pick(update.line_gap, self.line_gap),
            row_density: pick(update.row_density, self.row_density),
            column_density: pick(update.column_density, self.column_density),
        }
    }
}

/// Partial parameter update as delivered by a UI event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamUpdate {
    pub line_length: Option<i32>,
    pub line_gap: Option<i32>,
    pub row_density: Option<i32>,
    pub column_density: Option<i32>,
}

impl ParamUpdate {
    pub fn is_empty(&self) -> bool {
        self.line_length.is_none()
            && self.line_gap.is_none()
            && self.row_density.is_none()
            && self.column_density.is_none()
    }
}

impl From<ShapeParams> for ParamUpdate {
    fn from(p: ShapeParams) -> Self {
        Self {
            line_length: Some(p.line_length),
            line_gap: Some(p.line_gap),
            row_density: Some(p.row_density),
            column_density: Some(p.column_density),
        }
    }
}

fn check_range(name: &'static str, value: i32, min: i32, max: i32) -> Result<()> {
    if value < min || value > max {
        return Err(LineError::Range {
            name,
            value: value as i64,
            min: min as i64,
            max: max as i64,
        });
    }
    Ok(())
}
