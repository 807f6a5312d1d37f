//! Error types for raster decoding.

use thermal_common::ThermalError;
use thiserror::Error;

/// Errors that can occur while decoding a raster file.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The TIFF container itself could not be read.
    #[error("TIFF decode error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// Sample type the colorizer does not read.
    #[error("unsupported sample format: {0}")]
    UnsupportedSampleFormat(String),

    /// Band layout the colorizer does not read.
    #[error("unsupported band layout: {0}")]
    UnsupportedLayout(String),

    /// Neither tiepoint/pixel-scale nor a transformation matrix was found.
    #[error("image has no affine georeference")]
    MissingGeoreference,

    /// Georeference tags were present but describe an invalid extent.
    #[error("invalid georeference: {0}")]
    InvalidGeoreference(String),

    /// Image reports a zero dimension.
    #[error("image is empty: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// Requested band does not exist.
    #[error("band {index} out of range ({count} bands)")]
    BandOutOfRange { index: usize, count: usize },

    /// Decoded buffer disagrees with the declared dimensions.
    #[error("expected {expected} samples, decoded {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },
}

impl DecodeError {
    /// Create an UnsupportedSampleFormat error.
    pub fn unsupported_sample_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedSampleFormat(msg.into())
    }

    /// Create an InvalidGeoreference error.
    pub fn invalid_georeference(msg: impl Into<String>) -> Self {
        Self::InvalidGeoreference(msg.into())
    }
}

impl From<DecodeError> for ThermalError {
    fn from(err: DecodeError) -> Self {
        ThermalError::Decode(err.to_string())
    }
}
