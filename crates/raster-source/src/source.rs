//! One raster source abstraction over decoded and synthetic rasters.

use crate::decoder::{GeoRaster, RasterMetadata};
use crate::error::DecodeError;
use crate::geotiff::TiffRaster;
use crate::synthetic::{synthesize_with_rng, SyntheticPattern};
use bytes::Bytes;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thermal_common::{BoundingBox, GridSize, RasterGrid};
use tracing::{debug, warn};

/// Where a raster's samples should come from.
#[derive(Debug, Clone)]
pub enum RasterSource {
    /// GeoTIFF bytes and the band to read.
    Decoded { data: Bytes, band: usize },
    /// A procedurally generated grid.
    Synthetic {
        size: GridSize,
        pattern: SyntheticPattern,
        bounds: BoundingBox,
    },
}

/// How a produced raster was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    /// Samples read from the input file.
    Decoded,
    /// Samples generated on request.
    Synthetic,
    /// Decoding failed and synthetic samples were substituted.
    Fallback { reason: String },
}

impl Provenance {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Provenance::Fallback { .. })
    }
}

/// What to synthesize when decoding fails. The size is always
/// [`GridSize::FALLBACK`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FallbackPolicy {
    pub pattern: SyntheticPattern,
    pub bounds: BoundingBox,
}

/// A raster grid together with its metadata and origin.
#[derive(Debug, Clone)]
pub struct SourcedRaster {
    pub grid: RasterGrid,
    pub metadata: RasterMetadata,
    pub provenance: Provenance,
}

impl RasterSource {
    /// Source reading band 0 of a GeoTIFF buffer.
    pub fn decoded(data: impl Into<Bytes>) -> Self {
        Self::Decoded {
            data: data.into(),
            band: 0,
        }
    }

    /// Source generating `pattern` over the default bounds.
    pub fn synthetic(size: GridSize, pattern: SyntheticPattern) -> Self {
        Self::Synthetic {
            size,
            pattern,
            bounds: BoundingBox::default(),
        }
    }

    /// Produce the raster, surfacing decode failures to the caller.
    pub fn produce<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SourcedRaster, DecodeError> {
        match self {
            Self::Decoded { data, band } => {
                let (grid, metadata) = load_band(data, *band)?;
                Ok(SourcedRaster {
                    grid,
                    metadata,
                    provenance: Provenance::Decoded,
                })
            }
            Self::Synthetic {
                size,
                pattern,
                bounds,
            } => Ok(synthetic_raster(*size, *pattern, *bounds, Provenance::Synthetic, rng)),
        }
    }

    /// Produce the raster, replacing any decode failure with a 256x256
    /// synthetic grid built from `policy`. Never fails.
    pub fn resolve<R: Rng + ?Sized>(&self, policy: &FallbackPolicy, rng: &mut R) -> SourcedRaster {
        match self.produce(rng) {
            Ok(raster) => raster,
            Err(e) => {
                warn!(
                    error = %e,
                    pattern = %policy.pattern,
                    size = %GridSize::FALLBACK,
                    "Raster decode failed, using synthetic fallback"
                );
                synthetic_raster(
                    GridSize::FALLBACK,
                    policy.pattern,
                    policy.bounds,
                    Provenance::Fallback {
                        reason: e.to_string(),
                    },
                    rng,
                )
            }
        }
    }
}

/// Decode band 0 of a GeoTIFF buffer.
pub fn load_real(data: &[u8]) -> Result<RasterGrid, DecodeError> {
    load_band(data, 0).map(|(grid, _)| grid)
}

/// Decode one band of a GeoTIFF buffer, returning the grid and file metadata.
pub fn load_band(data: &[u8], band: usize) -> Result<(RasterGrid, RasterMetadata), DecodeError> {
    let raster = TiffRaster::from_bytes(data)?;
    let metadata = raster.metadata();
    let samples = raster.read_band(band)?;

    let actual = samples.len();
    let grid = RasterGrid::new(metadata.width, metadata.height, samples, metadata.bounds).map_err(
        |_| DecodeError::SampleCountMismatch {
            expected: metadata.width * metadata.height,
            actual,
        },
    )?;

    debug!(
        width = metadata.width,
        height = metadata.height,
        band,
        band_count = metadata.band_count,
        "Loaded raster band"
    );

    Ok((grid, metadata))
}

fn synthetic_raster<R: Rng + ?Sized>(
    size: GridSize,
    pattern: SyntheticPattern,
    bounds: BoundingBox,
    provenance: Provenance,
    rng: &mut R,
) -> SourcedRaster {
    let grid = synthesize_with_rng(size, pattern, bounds, rng);
    let metadata = RasterMetadata {
        width: size.width(),
        height: size.height(),
        band_count: 1,
        bounds,
    };
    SourcedRaster {
        grid,
        metadata,
        provenance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_garbage_falls_back_to_fallback_size() {
        let source = RasterSource::decoded(&b"GIF89a not a tiff"[..]);
        let raster = source.resolve(&FallbackPolicy::default(), &mut StdRng::seed_from_u64(1));

        assert!(raster.provenance.is_fallback());
        assert_eq!(raster.grid.width(), 256);
        assert_eq!(raster.grid.height(), 256);
        assert_eq!(raster.metadata.band_count, 1);
        assert_eq!(raster.grid.bounds(), &BoundingBox::default());
    }

    #[test]
    fn test_produce_surfaces_decode_error() {
        let source = RasterSource::decoded(Bytes::new());
        assert!(source.produce(&mut StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn test_synthetic_source_keeps_requested_size() {
        let size = GridSize::new(32, 8).unwrap();
        let source = RasterSource::synthetic(size, SyntheticPattern::RadialGradient);
        let raster = source
            .produce(&mut StdRng::seed_from_u64(3))
            .unwrap();

        assert_eq!(raster.provenance, Provenance::Synthetic);
        assert_eq!(raster.grid.size(), size);
    }
}
