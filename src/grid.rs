use crate::config::GRID_RESOLUTION;
use crate::error::{LineError, Result};

/// Integer coordinate range `[0, 3N)`. Row/column indices and segment
/// endpoints are all drawn from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpace {
    resolution: usize,
}

impl Default for GridSpace {
    fn default() -> Self {
        Self {
            resolution: GRID_RESOLUTION,
        }
    }
}

impl GridSpace {
    /// Largest resolution whose coordinates, up to `3N`, all fit in `u32`.
    pub const MAX_RESOLUTION: usize = (u32::MAX / 3) as usize;

    pub fn new(resolution: usize) -> Result<Self> {
        if resolution > Self::MAX_RESOLUTION {
            return Err(LineError::Range {
                name: "grid_resolution",
                value: i64::try_from(resolution).unwrap_or(i64::MAX),
                min: 0,
                max: Self::MAX_RESOLUTION as i64,
            });
        }
        Ok(Self { resolution })
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Number of coordinates, `3N`.
    #[inline]
    pub fn len(&self) -> usize {
        self.resolution * 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resolution == 0
    }

    /// Coordinates `start, start + step, ...` below `len()`. Empty when
    /// `start >= len()`.
    #[inline]
    pub fn stride(&self, start: usize, step: usize) -> impl Iterator<Item = usize> {
        debug_assert!(step > 0);
        (start..self.len()).step_by(step)
    }

    /// Element count of `stride(start, step)` without iterating.
    #[inline]
    pub fn stride_len(&self, start: usize, step: usize) -> usize {
        if start >= self.len() {
            0
        } else {
            (self.len() - start).div_ceil(step)
        }
    }

    /// The visible window: the middle third on both axes.
    pub fn viewport(&self) -> Viewport {
        Viewport {
            min: self.resolution as f32,
            max: (self.resolution * 2) as f32,
        }
    }
}

/// Square window onto grid space, `[min, max)` on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub min: f32,
    pub max: f32,
}

impl Viewport {
    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Map a grid coordinate to a pixel coordinate on a `pixels` wide axis.
    #[inline]
    pub fn to_pixel(&self, v: f32, pixels: usize) -> f32 {
        (v - self.min) / self.span() * pixels as f32
    }
}
