//! Typed errors for line-field generation.
//!
//! Parameters are validated before any stored state changes, so a returned
//! error always leaves the generator holding its previous valid field.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineError {
    /// `line_length + line_gap` must be positive, otherwise the segment
    /// stride is zero.
    #[error("GapOrLength must be positive (line_length={line_length}, line_gap={line_gap})")]
    Configuration { line_length: i32, line_gap: i32 },

    /// A parameter fell outside its accepted range. No clamping is applied.
    #[error("{name} = {value} is out of range [{min}, {max}]")]
    Range {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A color string was not `#rrggbb`.
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    #[error("failed to read params file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse params file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LineError>;
