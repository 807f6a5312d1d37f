//! Gradient rendering of thermal grids.

use crate::normalize::{normalize, NormalizedGrid};
use crate::palette::{ColorPixel, Palette};
use thermal_common::{GridSize, RasterGrid, ThermalError, ThermalResult};
use tracing::debug;

/// A colorized raster, row-major, one pixel per grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThermalImage {
    width: usize,
    height: usize,
    pixels: Vec<ColorPixel>,
}

impl ThermalImage {
    /// Build an image, checking that `pixels` covers `width * height` exactly.
    pub fn new(width: usize, height: usize, pixels: Vec<ColorPixel>) -> ThermalResult<Self> {
        let expected = GridSize::new(width, height)?.len();
        if pixels.len() != expected {
            return Err(ThermalError::SampleCount {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image of a single repeated color.
    pub fn filled(width: usize, height: usize, color: ColorPixel) -> ThermalResult<Self> {
        let size = GridSize::new(width, height)?;
        Self::new(width, height, vec![color; size.len()])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[ColorPixel] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<ColorPixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// RGBA bytes, 4 per pixel, row-major.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.pixels.len() * 4];
        self.copy_rgba_into(&mut bytes);
        bytes
    }

    /// Copy RGBA bytes into `dst`, which must hold exactly `width * height * 4` bytes.
    pub(crate) fn copy_rgba_into(&self, dst: &mut [u8]) {
        for (chunk, pixel) in dst.chunks_exact_mut(4).zip(&self.pixels) {
            chunk.copy_from_slice(&pixel.to_array());
        }
    }
}

/// Colorize an already normalized grid.
pub fn colorize_grid(grid: &NormalizedGrid, palette: Palette) -> ThermalImage {
    let pixels = grid.values().iter().map(|&v| palette.colorize(v)).collect();
    ThermalImage {
        width: grid.width(),
        height: grid.height(),
        pixels,
    }
}

/// Normalize and colorize a raw grid.
pub fn render_thermal(grid: &RasterGrid, palette: Palette) -> ThermalImage {
    let normalized = normalize(grid);
    let stats = normalized.stats();
    debug!(
        width = grid.width(),
        height = grid.height(),
        min = ?stats.min,
        max = ?stats.max,
        %palette,
        "Rendering thermal grid"
    );
    colorize_grid(&normalized, palette)
}
