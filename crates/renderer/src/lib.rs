//! Image rendering for thermal rasters.
//!
//! The pipeline is strictly sequential:
//! - [`normalize`]: raw samples to `[0, 255]`
//! - [`palette`]: normalized values to RGBA through a named thermal ramp
//! - [`canvas`]: RGBA pixels into a display surface
//! - [`export`]: PNG or GeoTIFF bytes for download

pub mod canvas;
pub mod export;
pub mod gradient;
pub mod normalize;
pub mod palette;
pub mod png;

pub use canvas::{write, RgbaSurface, Surface};
pub use export::{export, location_stem, ExportFormat, ExportOptions};
pub use gradient::{colorize_grid, render_thermal, ThermalImage};
pub use normalize::{normalize, NormalizeStats, NormalizedGrid};
pub use palette::{ColorPixel, Palette};
