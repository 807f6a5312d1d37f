//! Rescaling raw samples to the `[0, 255]` palette domain.

use serde::Serialize;
use thermal_common::{GridSize, RasterGrid};
use tracing::warn;

/// Upper end of the normalized range.
pub const NORMALIZED_MAX: f64 = 255.0;

/// What the normalizer observed while scanning a grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NormalizeStats {
    /// Smallest finite sample, `None` if no sample was finite.
    pub min: Option<f64>,
    /// Largest finite sample, `None` if no sample was finite.
    pub max: Option<f64>,
    /// Count of NaN and infinite samples. These normalize to 0.
    pub non_finite: usize,
}

impl NormalizeStats {
    /// True when every sample was non-finite and the output is all zeros
    /// for lack of data rather than because the input was constant.
    pub fn is_degenerate(&self) -> bool {
        self.min.is_none()
    }
}

/// A grid whose values all lie in `[0, 255]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGrid {
    size: GridSize,
    values: Vec<f64>,
    stats: NormalizeStats,
}

impl NormalizedGrid {
    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.width()
    }

    pub fn height(&self) -> usize {
        self.size.height()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn stats(&self) -> &NormalizeStats {
        &self.stats
    }
}

/// Normalize a raster grid to `[0, 255]` using its finite min/max.
///
/// Values are computed as `(s - min) * 255 / range`, which can differ by one
/// ULP from `(s - min) / range * 255`. Palettes floor their channels, so at a
/// band edge that ULP can move a pixel by one color step.
pub fn normalize(grid: &RasterGrid) -> NormalizedGrid {
    let (values, stats) = normalize_samples(grid.samples());

    if stats.is_degenerate() {
        warn!(
            width = grid.width(),
            height = grid.height(),
            "Every sample is non-finite, normalized grid is all zeros"
        );
    } else if stats.non_finite > 0 {
        warn!(
            non_finite = stats.non_finite,
            total = grid.samples().len(),
            "Non-finite samples excluded from normalization"
        );
    }

    NormalizedGrid {
        size: grid.size(),
        values,
        stats,
    }
}

/// Two passes over `samples`: finite min/max, then
/// `(s - min) * 255 / (max - min)`. A zero range maps everything to 0.
/// See [`normalize`] on rounding.
pub fn normalize_samples(samples: &[f64]) -> (Vec<f64>, NormalizeStats) {
    let mut stats = NormalizeStats::default();
    let mut bounds: Option<(f64, f64)> = None;

    for &s in samples {
        if !s.is_finite() {
            stats.non_finite += 1;
            continue;
        }
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(s), max.max(s)),
            None => (s, s),
        });
    }

    let Some((min, max)) = bounds else {
        return (vec![0.0; samples.len()], stats);
    };
    stats.min = Some(min);
    stats.max = Some(max);

    let range = max - min;
    let values = samples
        .iter()
        .map(|&s| {
            if range > 0.0 && s.is_finite() {
                // Multiplying first keeps exact results exact (85 of 0..255 stays 85)
                let scaled = (s - min) * NORMALIZED_MAX / range;
                let v = if scaled.is_finite() {
                    scaled
                } else {
                    (s - min) / range * NORMALIZED_MAX
                };
                // min/max spanning most of f64 can overflow the subtraction
                if v.is_finite() {
                    v.clamp(0.0, NORMALIZED_MAX)
                } else {
                    0.0
                }
            } else {
                0.0
            }
        })
        .collect();

    (values, stats)
}
