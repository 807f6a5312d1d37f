//! The narrow interface every raster decoder exposes.

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use thermal_common::BoundingBox;

/// A decoded, georeferenced multi-band raster.
///
/// This is all the colorizer needs from a file format. Implementations own
/// their decoded samples; nothing here borrows the input buffer.
pub trait GeoRaster {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn band_count(&self) -> usize;

    fn bounding_box(&self) -> BoundingBox;

    /// Read one band as row-major f64 samples (`width * height` values).
    fn read_band(&self, index: usize) -> Result<Vec<f64>, DecodeError>;

    /// Summary of the raster's shape and extent.
    fn metadata(&self) -> RasterMetadata {
        RasterMetadata {
            width: self.width(),
            height: self.height(),
            band_count: self.band_count(),
            bounds: self.bounding_box(),
        }
    }
}

/// Shape and extent of a raster, reported alongside every render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterMetadata {
    pub width: usize,
    pub height: usize,
    pub band_count: usize,
    pub bounds: BoundingBox,
}
