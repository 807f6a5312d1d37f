//! Raster sources for the thermal colorizer.
//!
//! A raster either comes from a GeoTIFF band ([`geotiff`]) or is generated
//! procedurally ([`synthetic`]). [`RasterSource`] wraps both behind one type
//! and owns the degrade-gracefully policy: a failed decode is logged and
//! replaced by a 256x256 synthetic grid.

pub mod decoder;
pub mod error;
pub mod geotiff;
pub mod source;
pub mod synthetic;

pub use decoder::{GeoRaster, RasterMetadata};
pub use error::DecodeError;
pub use geotiff::TiffRaster;
pub use source::{load_band, load_real, FallbackPolicy, Provenance, RasterSource, SourcedRaster};
pub use synthetic::{synthesize, synthesize_with_rng, SyntheticPattern};
