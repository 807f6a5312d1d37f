//! GeoTIFF decoding on top of the `tiff` crate.
//!
//! Only the pieces the colorizer needs are read: dimensions, samples per
//! pixel, the pixel data and the affine georeference. Bounds come from
//! ModelTiepointTag + ModelPixelScaleTag, or from ModelTransformationTag.

use crate::decoder::GeoRaster;
use crate::error::DecodeError;
use std::io::{Cursor, Read, Seek};
use thermal_common::BoundingBox;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::debug;

/// PlanarConfiguration value for band-sequential storage.
const PLANAR_SEPARATE: u32 = 2;

/// A fully decoded GeoTIFF image (first IFD only).
#[derive(Debug, Clone)]
pub struct TiffRaster {
    width: usize,
    height: usize,
    band_count: usize,
    bounds: BoundingBox,
    /// Pixel-interleaved samples, `width * height * band_count` long.
    samples: Vec<f64>,
}

impl TiffRaster {
    /// Decode a GeoTIFF from an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        Self::decode(Cursor::new(data))
    }

    fn decode<R: Read + Seek>(reader: R) -> Result<Self, DecodeError> {
        let mut decoder = Decoder::new(reader)?;

        let (width, height) = decoder.dimensions()?;
        if width == 0 || height == 0 {
            return Err(DecodeError::EmptyImage { width, height });
        }

        let band_count = decoder.get_tag_u32(Tag::SamplesPerPixel).unwrap_or(1).max(1) as usize;
        let planar = decoder.get_tag_u32(Tag::PlanarConfiguration).unwrap_or(1);
        if planar == PLANAR_SEPARATE && band_count > 1 {
            return Err(DecodeError::UnsupportedLayout(
                "band-sequential (planar) storage".to_string(),
            ));
        }

        let bounds = read_bounds(&mut decoder, width as f64, height as f64)?;

        let samples = samples_to_f64(decoder.read_image()?)?;
        let (width, height) = (width as usize, height as usize);
        let expected = width * height * band_count;
        if samples.len() != expected {
            return Err(DecodeError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }

        debug!(width, height, band_count, ?bounds, "Decoded GeoTIFF");

        Ok(Self {
            width,
            height,
            band_count,
            bounds,
            samples,
        })
    }
}

impl GeoRaster for TiffRaster {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn band_count(&self) -> usize {
        self.band_count
    }

    fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    fn read_band(&self, index: usize) -> Result<Vec<f64>, DecodeError> {
        if index >= self.band_count {
            return Err(DecodeError::BandOutOfRange {
                index,
                count: self.band_count,
            });
        }

        Ok(self
            .samples
            .iter()
            .skip(index)
            .step_by(self.band_count)
            .copied()
            .collect())
    }
}

/// Widen whatever sample type the file stores to f64.
fn samples_to_f64(result: DecodingResult) -> Result<Vec<f64>, DecodeError> {
    let samples = match result {
        DecodingResult::U8(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::U16(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::U32(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::I8(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::I16(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::I32(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::F32(buf) => buf.into_iter().map(f64::from).collect(),
        DecodingResult::F64(buf) => buf,
        _ => {
            return Err(DecodeError::unsupported_sample_format(
                "64-bit integer samples",
            ))
        }
    };
    Ok(samples)
}

/// Resolve the geographic extent from the GeoTIFF model tags.
fn read_bounds<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    width: f64,
    height: f64,
) -> Result<BoundingBox, DecodeError> {
    let scale = decoder.get_tag_f64_vec(Tag::ModelPixelScaleTag).ok();
    let tiepoint = decoder.get_tag_f64_vec(Tag::ModelTiepointTag).ok();

    if let (Some(scale), Some(tiepoint)) = (scale, tiepoint) {
        if scale.len() >= 2 && tiepoint.len() >= 6 {
            // tiepoint: [I, J, K, X, Y, Z], scale: [ScaleX, ScaleY, ScaleZ]
            let west = tiepoint[3] - tiepoint[0] * scale[0];
            let north = tiepoint[4] + tiepoint[1] * scale[1];
            let east = west + width * scale[0];
            let south = north - height * scale[1];
            return BoundingBox::new(north, south, east, west)
                .map_err(|e| DecodeError::invalid_georeference(e.to_string()));
        }
    }

    let matrix = decoder
        .get_tag_f64_vec(Tag::ModelTransformationTag)
        .map_err(|_| DecodeError::MissingGeoreference)?;
    if matrix.len() < 16 {
        return Err(DecodeError::invalid_georeference(format!(
            "transformation matrix has {} entries",
            matrix.len()
        )));
    }

    // Row-major 4x4: x = a*i + b*j + d, y = e*i + f*j + h
    let project = |i: f64, j: f64| {
        (
            matrix[0] * i + matrix[1] * j + matrix[3],
            matrix[4] * i + matrix[5] * j + matrix[7],
        )
    };
    let corners = [
        project(0.0, 0.0),
        project(width, 0.0),
        project(0.0, height),
        project(width, height),
    ];

    let west = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
    let east = corners.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max);
    let south = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
    let north = corners.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max);

    BoundingBox::new(north, south, east, west)
        .map_err(|e| DecodeError::invalid_georeference(e.to_string()))
}
