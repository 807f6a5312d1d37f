//! Error types for the thermal colorizer.

use thiserror::Error;

/// Result type alias using ThermalError.
pub type ThermalResult<T> = Result<T, ThermalError>;

/// Primary error type for colorizer operations.
#[derive(Debug, Error)]
pub enum ThermalError {
    // === Source Errors ===
    #[error("Failed to decode raster: {0}")]
    Decode(String),

    #[error("Empty grid: {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("Grid {width}x{height} is too large to address")]
    GridTooLarge { width: usize, height: usize },

    #[error("Grid {width}x{height} needs {expected} samples, got {actual}")]
    SampleCount {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid bounding box: {0}")]
    InvalidBbox(String),

    // === Rendering Errors ===
    #[error(
        "Image is {image_width}x{image_height} but surface is {surface_width}x{surface_height}"
    )]
    SizeMismatch {
        image_width: usize,
        image_height: usize,
        surface_width: usize,
        surface_height: usize,
    },

    #[error("Encoding failed: {0}")]
    Encode(String),

    // === Infrastructure Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ThermalError {
    /// Whether the pipeline can recover from this error on its own.
    ///
    /// Decode failures are absorbed by the synthetic fallback. A size mismatch
    /// between an image and its surface is a caller bug and is never retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ThermalError::Decode(_))
    }

    /// Short stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ThermalError::Decode(_) => "decode",
            ThermalError::EmptyGrid { .. } => "empty_grid",
            ThermalError::GridTooLarge { .. } => "grid_too_large",
            ThermalError::SampleCount { .. } => "sample_count",
            ThermalError::InvalidBbox(_) => "invalid_bbox",
            ThermalError::SizeMismatch { .. } => "size_mismatch",
            ThermalError::Encode(_) => "encode",
            ThermalError::Config(_) => "config",
            ThermalError::Io(_) => "io",
        }
    }
}

impl From<serde_json::Error> for ThermalError {
    fn from(err: serde_json::Error) -> Self {
        ThermalError::Config(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_decode_is_recoverable() {
        assert!(ThermalError::Decode("bad magic".into()).is_recoverable());
        assert!(!ThermalError::EmptyGrid { width: 0, height: 4 }.is_recoverable());
        assert!(!ThermalError::SizeMismatch {
            image_width: 256,
            image_height: 256,
            surface_width: 128,
            surface_height: 128,
        }
        .is_recoverable());
    }

    #[test]
    fn test_size_mismatch_message() {
        let err = ThermalError::SizeMismatch {
            image_width: 256,
            image_height: 256,
            surface_width: 128,
            surface_height: 128,
        };
        assert_eq!(err.to_string(), "Image is 256x256 but surface is 128x128");
        assert_eq!(err.kind(), "size_mismatch");
    }
}
