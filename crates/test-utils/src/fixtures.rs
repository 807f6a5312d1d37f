//! Common test fixtures: bounding boxes and in-memory GeoTIFF files.
//!
//! GeoTIFFs are written with the `tiff` encoder and georeferenced with
//! ModelPixelScaleTag + ModelTiepointTag, or ModelTransformationTag.

use std::io::{Cursor, Write};
use tempfile::NamedTempFile;
use thermal_common::BoundingBox;
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;

/// Bytes that are not a TIFF at all.
pub const GARBAGE: &[u8] = b"\x89PNG\r\n\x1a\nthis is not a thermal raster";

/// Common bounding boxes as `(north, south, east, west)`.
pub mod bbox {
    /// Downtown Los Angeles tile
    pub const LOS_ANGELES: (f64, f64, f64, f64) = (34.1, 34.0, -118.2, -118.3);

    /// Sahara desert scene
    pub const SAHARA: (f64, f64, f64, f64) = (24.0, 22.0, 13.0, 10.0);

    /// Crosses antimeridian (Pacific-centric)
    pub const PACIFIC: (f64, f64, f64, f64) = (50.0, -50.0, -140.0, 160.0);
}

/// Build a [`BoundingBox`] from one of the [`bbox`] tuples.
pub fn bounding_box(edges: (f64, f64, f64, f64)) -> BoundingBox {
    let (north, south, east, west) = edges;
    BoundingBox::new(north, south, east, west).expect("fixture bbox is valid")
}

/// Single-band 32-bit float GeoTIFF georeferenced with tiepoint + pixel scale.
pub fn geotiff_f32(width: u32, height: u32, samples: &[f32], bounds: &BoundingBox) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buf)).expect("create TIFF encoder");
        let mut image = encoder
            .new_image::<colortype::Gray32Float>(width, height)
            .expect("create TIFF image");

        let scale = [
            (bounds.east - bounds.west) / width as f64,
            (bounds.north - bounds.south) / height as f64,
            0.0,
        ];
        let tiepoint = [0.0, 0.0, 0.0, bounds.west, bounds.north, 0.0];
        image
            .encoder()
            .write_tag(Tag::ModelPixelScaleTag, &scale[..])
            .expect("write pixel scale tag");
        image
            .encoder()
            .write_tag(Tag::ModelTiepointTag, &tiepoint[..])
            .expect("write tiepoint tag");

        image.write_data(samples).expect("write TIFF samples");
    }
    buf
}

/// Single-band 16-bit GeoTIFF georeferenced with a transformation matrix.
pub fn geotiff_u16_transformed(
    width: u32,
    height: u32,
    samples: &[u16],
    bounds: &BoundingBox,
) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buf)).expect("create TIFF encoder");
        let mut image = encoder
            .new_image::<colortype::Gray16>(width, height)
            .expect("create TIFF image");

        let sx = (bounds.east - bounds.west) / width as f64;
        let sy = (bounds.north - bounds.south) / height as f64;
        #[rustfmt::skip]
        let matrix = [
            sx,  0.0, 0.0, bounds.west,
            0.0, -sy, 0.0, bounds.north,
            0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        image
            .encoder()
            .write_tag(Tag::ModelTransformationTag, &matrix[..])
            .expect("write transformation tag");

        image.write_data(samples).expect("write TIFF samples");
    }
    buf
}

/// Three-band 8-bit RGB GeoTIFF. `samples` is pixel-interleaved.
pub fn geotiff_rgb8(width: u32, height: u32, samples: &[u8], bounds: &BoundingBox) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buf)).expect("create TIFF encoder");
        let mut image = encoder
            .new_image::<colortype::RGB8>(width, height)
            .expect("create TIFF image");

        let scale = [
            (bounds.east - bounds.west) / width as f64,
            (bounds.north - bounds.south) / height as f64,
            0.0,
        ];
        let tiepoint = [0.0, 0.0, 0.0, bounds.west, bounds.north, 0.0];
        image
            .encoder()
            .write_tag(Tag::ModelPixelScaleTag, &scale[..])
            .expect("write pixel scale tag");
        image
            .encoder()
            .write_tag(Tag::ModelTiepointTag, &tiepoint[..])
            .expect("write tiepoint tag");

        image.write_data(samples).expect("write TIFF samples");
    }
    buf
}

/// A plain TIFF with no georeference tags.
pub fn tiff_without_georeference(width: u32, height: u32, samples: &[f32]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buf)).expect("create TIFF encoder");
        encoder
            .write_image::<colortype::Gray32Float>(width, height, samples)
            .expect("write TIFF image");
    }
    buf
}

/// Cut a valid file short, keeping the first `keep` bytes.
pub fn truncated(mut bytes: Vec<u8>, keep: usize) -> Vec<u8> {
    bytes.truncate(keep);
    bytes
}

/// Write `bytes` to a temporary file that lives as long as the handle.
pub fn temp_file_with(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(bytes).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
