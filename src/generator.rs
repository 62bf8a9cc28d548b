use log::{debug, warn};

use crate::config::{DENSITY_BASE, ParamUpdate, ShapeParams};
use crate::error::Result;
use crate::grid::GridSpace;
use crate::lines::{LineSet, Orientation, Spacing, generate_all_lines};
use crate::rng::{JitterSource, Rng};

/// Parameters in the form the generator consumes: densities inverted into
/// row/column strides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct StoredParams {
    line_length: usize,
    line_gap: usize,
    row_step: usize,
    column_step: usize,
}

impl StoredParams {
    /// `params` must already be validated.
    fn from_user(params: &ShapeParams) -> Self {
        Self {
            line_length: params.line_length as usize,
            line_gap: params.line_gap as usize,
            row_step: (DENSITY_BASE - params.row_density) as usize,
            column_step: (DENSITY_BASE - params.column_density) as usize,
        }
    }

    fn spacing(&self) -> Spacing {
        Spacing {
            line_length: self.line_length,
            line_gap: self.line_gap,
        }
    }
}

/// Owns the shape parameters and the two most recently generated line sets.
///
/// Not internally synchronized: hosts that share it across threads must put
/// it behind a lock so regeneration and reads of both sets stay consistent.
pub struct LineFieldGenerator<R: JitterSource = Rng> {
    space: GridSpace,
    params: ShapeParams,
    stored: StoredParams,
    rng: R,
    horizontal: LineSet,
    vertical: LineSet,
}

impl<R: JitterSource> LineFieldGenerator<R> {
    /// Validate `params` and generate both line sets immediately.
    pub fn create(params: ShapeParams, rng: R) -> Result<Self> {
        Self::with_space(GridSpace::default(), params, rng)
    }

    pub fn with_space(space: GridSpace, params: ShapeParams, rng: R) -> Result<Self> {
        params.validate()?;
        let stored = StoredParams::from_user(&params);
        let mut generator = Self {
            space,
            params,
            stored,
            rng,
            horizontal: LineSet::new(Orientation::Horizontal),
            vertical: LineSet::new(Orientation::Vertical),
        };
        generator.rebuild()?;
        Ok(generator)
    }

    /// Apply a partial update and rebuild both line sets from scratch.
    ///
    /// Absent values and values of `0` leave the current parameter as is.
    /// The merged parameters are validated first; on error nothing changes.
    pub fn regenerate(&mut self, update: &ParamUpdate) -> Result<()> {
        let next = self.params.merged(update);
        if let Err(e) = next.validate() {
            warn!("rejected parameter update {update:?}: {e}");
            return Err(e);
        }
        let stored = StoredParams::from_user(&next);
        self.params = next;
        self.stored = stored;
        self.rebuild()
    }

    /// Both sets are built before either is replaced.
    fn rebuild(&mut self) -> Result<()> {
        let spacing = self.stored.spacing();
        let horizontal = generate_all_lines(
            &self.space,
            spacing,
            Orientation::Horizontal,
            self.stored.row_step,
            &mut self.rng,
        )?;
        let vertical = generate_all_lines(
            &self.space,
            spacing,
            Orientation::Vertical,
            self.stored.column_step,
            &mut self.rng,
        )?;
        self.horizontal = horizontal;
        self.vertical = vertical;
        debug!(
            "regenerated: {} rows / {} segments, {} columns / {} segments",
            self.horizontal.indices.len(),
            self.horizontal.len(),
            self.vertical.indices.len(),
            self.vertical.len(),
        );
        Ok(())
    }

    pub fn horizontal_lines(&self) -> &LineSet {
        &self.horizontal
    }

    pub fn vertical_lines(&self) -> &LineSet {
        &self.vertical
    }

    /// User-facing parameters currently in effect.
    pub fn params(&self) -> ShapeParams {
        self.params
    }

    /// Stride between drawn rows (`100 - row_density`).
    pub fn row_step(&self) -> usize {
        self.stored.row_step
    }

    /// Stride between drawn columns (`100 - column_density`).
    pub fn column_step(&self) -> usize {
        self.stored.column_step
    }

    /// Consume the generator, keeping only `(horizontal, vertical)`.
    pub fn into_lines(self) -> (LineSet, LineSet) {
        (self.horizontal, self.vertical)
    }

    pub fn space(&self) -> &GridSpace {
        &self.space
    }

    /// Replace the jitter source, e.g. to reseed. Takes effect on the next
    /// regeneration.
    pub fn set_rng(&mut self, rng: R) {
        self.rng = rng;
    }
}
