//! Raster grid types.

use crate::error::{ThermalError, ThermalResult};
use crate::BoundingBox;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// Bytes per pixel once a grid is colorized.
const RGBA_BYTES: usize = 4;

const N256: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(n) => n,
    None => panic!("256 is non-zero"),
};

/// Validated raster dimensions. Both sides are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGridSize", into = "RawGridSize")]
pub struct GridSize {
    width: NonZeroUsize,
    height: NonZeroUsize,
}

#[derive(Serialize, Deserialize)]
struct RawGridSize {
    width: usize,
    height: usize,
}

impl GridSize {
    /// Size used whenever a synthetic raster stands in for a failed decode.
    pub const FALLBACK: GridSize = GridSize {
        width: N256,
        height: N256,
    };

    /// Validate dimensions, rejecting zero-sized grids and grids whose RGBA
    /// byte count does not fit in `usize`.
    pub fn new(width: usize, height: usize) -> ThermalResult<Self> {
        let (Some(w), Some(h)) = (NonZeroUsize::new(width), NonZeroUsize::new(height)) else {
            return Err(ThermalError::EmptyGrid { width, height });
        };
        if width
            .checked_mul(height)
            .and_then(|cells| cells.checked_mul(RGBA_BYTES))
            .is_none()
        {
            return Err(ThermalError::GridTooLarge { width, height });
        }
        Ok(Self {
            width: w,
            height: h,
        })
    }

    pub fn width(&self) -> usize {
        self.width.get()
    }

    pub fn height(&self) -> usize {
        self.height.get()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    /// Always false, a `GridSize` has no zero dimension.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl TryFrom<RawGridSize> for GridSize {
    type Error = ThermalError;

    fn try_from(raw: RawGridSize) -> Result<Self, Self::Error> {
        GridSize::new(raw.width, raw.height)
    }
}

impl From<GridSize> for RawGridSize {
    fn from(size: GridSize) -> Self {
        RawGridSize {
            width: size.width(),
            height: size.height(),
        }
    }
}

/// A row-major grid of raw samples with its geographic extent.
///
/// Immutable once built; the constructor enforces `samples.len() == width * height`.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGrid {
    size: GridSize,
    samples: Vec<f64>,
    bounds: BoundingBox,
}

impl RasterGrid {
    /// Build a grid from raw dimensions, rejecting empty or mis-sized input.
    pub fn new(
        width: usize,
        height: usize,
        samples: Vec<f64>,
        bounds: BoundingBox,
    ) -> ThermalResult<Self> {
        let size = GridSize::new(width, height)?;
        Self::with_size(size, samples, bounds)
    }

    /// Build a grid from an already validated size.
    pub fn with_size(size: GridSize, samples: Vec<f64>, bounds: BoundingBox) -> ThermalResult<Self> {
        if samples.len() != size.len() {
            return Err(ThermalError::SampleCount {
                width: size.width(),
                height: size.height(),
                expected: size.len(),
                actual: samples.len(),
            });
        }
        Ok(Self {
            size,
            samples,
            bounds,
        })
    }

    /// Build a grid by evaluating `f(col, row)` for every cell in row-major order.
    pub fn from_fn<F>(size: GridSize, bounds: BoundingBox, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut samples = Vec::with_capacity(size.len());
        for row in 0..size.height() {
            for col in 0..size.width() {
                samples.push(f(col, row));
            }
        }
        Self {
            size,
            samples,
            bounds,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.width()
    }

    pub fn height(&self) -> usize {
        self.size.height()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Sample at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.samples.get(y * self.width() + x).copied()
    }
}
