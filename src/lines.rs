//! Line-set construction.
//!
//! Each selected row (or column) gets a random start offset, then segments of
//! `line_length` repeat every `line_length + line_gap` units along it. A
//! trailing segment that would run past the grid is dropped, never truncated.

use crate::error::{LineError, Result};
use crate::grid::GridSpace;
use crate::rng::JitterSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Segment endpoints in grid coordinates, `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSegment {
    pub start: (u32, u32),
    pub end: (u32, u32),
}

impl LineSegment {
    #[inline]
    pub fn length(&self) -> u32 {
        (self.end.0 - self.start.0) + (self.end.1 - self.start.1)
    }
}

/// Segment lengths and spacing for one line set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spacing {
    pub line_length: usize,
    pub line_gap: usize,
}

impl Spacing {
    #[inline]
    pub fn step(&self) -> usize {
        self.line_length + self.line_gap
    }

    fn check(&self) -> Result<()> {
        if self.step() == 0 {
            return Err(LineError::Configuration {
                line_length: clamp_i32(self.line_length),
                line_gap: clamp_i32(self.line_gap),
            });
        }
        Ok(())
    }
}

fn clamp_i32(v: usize) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// All segments of one orientation.
///
/// `along[i]` holds segment `i`'s endpoints on its own axis; `orth[i]` holds
/// the constant coordinate on the other axis, repeated for both endpoints.
/// For horizontal sets `along` is the x column and `orth` the y column;
/// vertical sets are the other way round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSet {
    pub orientation: Orientation,
    pub along: Vec<[u32; 2]>,
    pub orth: Vec<[u32; 2]>,
    /// Row/column indices visited, in increasing order, including ones that
    /// produced no segments.
    pub indices: Vec<u32>,
}

impl LineSet {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            along: Vec::new(),
            orth: Vec::new(),
            indices: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.along.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.along.is_empty()
    }

    pub fn xs(&self) -> &[[u32; 2]] {
        match self.orientation {
            Orientation::Horizontal => &self.along,
            Orientation::Vertical => &self.orth,
        }
    }

    pub fn ys(&self) -> &[[u32; 2]] {
        match self.orientation {
            Orientation::Horizontal => &self.orth,
            Orientation::Vertical => &self.along,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = LineSegment> + '_ {
        self.xs().iter().zip(self.ys()).map(|(x, y)| LineSegment {
            start: (x[0], y[0]),
            end: (x[1], y[1]),
        })
    }

    fn push_row_col(&mut self, index: usize, along: Vec<[u32; 2]>, orth: Vec<[u32; 2]>) {
        debug_assert_eq!(along.len(), orth.len());
        self.indices.push(index as u32);
        self.along.extend(along);
        self.orth.extend(orth);
    }
}

/// Segments for the row/column at `index`: along-axis pairs and matching
/// orthogonal pairs, equal length.
///
/// Fails with `Configuration` when `line_length + line_gap` is zero.
pub fn generate_row_col_segments<R: JitterSource>(
    space: &GridSpace,
    spacing: Spacing,
    index: usize,
    rng: &mut R,
) -> Result<(Vec<[u32; 2]>, Vec<[u32; 2]>)> {
    spacing.check()?;
    Ok(row_col_segments(space, spacing, index, rng))
}

fn row_col_segments<R: JitterSource>(
    space: &GridSpace,
    spacing: Spacing,
    index: usize,
    rng: &mut R,
) -> (Vec<[u32; 2]>, Vec<[u32; 2]>) {
    let along = row_col_pairs(space, spacing, rng);
    let i = index as u32;
    let orth = vec![[i, i]; along.len()];
    (along, orth)
}

fn row_col_pairs<R: JitterSource>(
    space: &GridSpace,
    spacing: Spacing,
    rng: &mut R,
) -> Vec<[u32; 2]> {
    let step = spacing.step();
    let jitter = rng.jitter(step);

    // Ends are the starts shifted by line_length, so there is at most one
    // fewer end; the unmatched last start is dropped by the zip. Every
    // coordinate is below `space.len()`, which fits in u32.
    let starts = space.stride(jitter, step);
    let ends = space.stride(jitter + spacing.line_length, step);
    let mut pairs = Vec::with_capacity(space.stride_len(jitter, step));
    pairs.extend(starts.zip(ends).map(|(s, e)| [s as u32, e as u32]));
    pairs
}

/// Every row/column selected by `density_step`, concatenated in increasing
/// index order. One jitter draw is consumed per selected index.
///
/// Fails with `Configuration` on a zero spacing step and with `Range` when
/// `density_step` is zero. Nothing is drawn from `rng` on failure.
pub fn generate_all_lines<R: JitterSource>(
    space: &GridSpace,
    spacing: Spacing,
    orientation: Orientation,
    density_step: usize,
    rng: &mut R,
) -> Result<LineSet> {
    spacing.check()?;
    if density_step == 0 {
        return Err(LineError::Range {
            name: "density_step",
            value: 0,
            min: 1,
            max: i64::try_from(space.len()).unwrap_or(i64::MAX),
        });
    }
    let mut set = LineSet::new(orientation);
    for index in space.stride(0, density_step) {
        let (along, orth) = row_col_segments(space, spacing, index, rng);
        set.push_row_col(index, along, orth);
    }
    Ok(set)
}
