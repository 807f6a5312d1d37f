//! Exporting rendered images as downloadable files.

use crate::gradient::ThermalImage;
use crate::png::encode_png;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;
use thermal_common::{BoundingBox, ThermalError, ThermalResult};
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;
use tracing::debug;

/// Stem used for exported file names.
pub const DEFAULT_FILE_STEM: &str = "processed";

/// Stem for a scene named after a place, e.g. `"Los Angeles"` becomes
/// `los-angeles-processed`.
pub fn location_stem(location: &str) -> String {
    let slug = location
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        format!("{}-{}", slug, DEFAULT_FILE_STEM)
    }
}

/// Container format for an exported image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    GeoTiff,
    Png,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::GeoTiff => "tif",
            ExportFormat::Png => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::GeoTiff => "image/tiff",
            ExportFormat::Png => "image/png",
        }
    }

    /// File name for a download, e.g. `processed.tif`.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::GeoTiff => f.write_str("geotiff"),
            ExportFormat::Png => f.write_str("png"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ThermalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "geotiff" | "tiff" | "tif" => Ok(ExportFormat::GeoTiff),
            "png" => Ok(ExportFormat::Png),
            other => Err(ThermalError::Config(format!("unknown export format: {}", other))),
        }
    }
}

/// Options for [`export`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Georeference written into GeoTIFF output. Ignored for PNG.
    pub bounds: Option<BoundingBox>,
}

/// Encode a rendered image into the bytes of a downloadable file.
pub fn export(image: &ThermalImage, options: &ExportOptions) -> ThermalResult<Vec<u8>> {
    let bytes = match options.format {
        ExportFormat::Png => encode_png(image)?,
        ExportFormat::GeoTiff => encode_geotiff(image, options.bounds.as_ref())?,
    };
    debug!(
        format = %options.format,
        width = image.width(),
        height = image.height(),
        bytes = bytes.len(),
        "Exported thermal image"
    );
    Ok(bytes)
}

/// Encode as an RGBA8 TIFF, adding GeoTIFF model tags when `bounds` is given.
fn encode_geotiff(image: &ThermalImage, bounds: Option<&BoundingBox>) -> ThermalResult<Vec<u8>> {
    let (width, height) = match (u32::try_from(image.width()), u32::try_from(image.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(ThermalError::Encode(format!(
                "{}x{} exceeds TIFF dimension limits",
                image.width(),
                image.height()
            )))
        }
    };
    let tiff_err = |e: tiff::TiffError| ThermalError::Encode(format!("TIFF encoding failed: {}", e));

    let mut buf = Vec::new();
    {
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buf)).map_err(tiff_err)?;
        let mut tiff_image = encoder
            .new_image::<colortype::RGBA8>(width, height)
            .map_err(tiff_err)?;

        if let Some(bounds) = bounds {
            let scale = [
                bounds.width() / width as f64,
                bounds.height() / height as f64,
                0.0,
            ];
            let tiepoint = [0.0, 0.0, 0.0, bounds.west, bounds.north, 0.0];
            // Version 1.1.0, 3 keys: geographic model, pixel-is-area, WGS 84
            let geokeys: [u16; 16] = [
                1, 1, 0, 3, //
                1024, 0, 1, 2, //
                1025, 0, 1, 1, //
                2048, 0, 1, 4326,
            ];

            let directory = tiff_image.encoder();
            directory
                .write_tag(Tag::ModelPixelScaleTag, &scale[..])
                .map_err(tiff_err)?;
            directory
                .write_tag(Tag::ModelTiepointTag, &tiepoint[..])
                .map_err(tiff_err)?;
            directory
                .write_tag(Tag::GeoKeyDirectoryTag, &geokeys[..])
                .map_err(tiff_err)?;
        }

        tiff_image
            .write_data(&image.to_rgba_bytes())
            .map_err(tiff_err)?;
    }
    Ok(buf)
}
