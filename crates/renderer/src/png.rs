//! PNG encoding for thermal images.
//!
//! Always writes 8-bit RGBA (color type 6). Thermal ramps rarely fit a
//! 256-entry palette, so indexed output is not attempted.

use crate::gradient::ThermalImage;
use std::io::Write;
use thermal_common::{ThermalError, ThermalResult};

/// PNG file signature
const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Bytes per RGBA pixel
const RGBA_STRIDE: usize = 4;

/// Encode a thermal image as an RGBA PNG.
pub fn encode_png(image: &ThermalImage) -> ThermalResult<Vec<u8>> {
    encode_rgba(&image.to_rgba_bytes(), image.width(), image.height())
}

/// Encode raw RGBA bytes (4 per pixel, row-major) as a PNG.
pub fn encode_rgba(pixels: &[u8], width: usize, height: usize) -> ThermalResult<Vec<u8>> {
    if pixels.len() != width * height * RGBA_STRIDE {
        return Err(ThermalError::Encode(format!(
            "{} bytes cannot hold a {}x{} RGBA image",
            pixels.len(),
            width,
            height
        )));
    }
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(ThermalError::Encode(format!(
                "{}x{} exceeds PNG dimension limits",
                width, height
            )))
        }
    };

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&w.to_be_bytes());
    ihdr.extend_from_slice(&h.to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(6); // color type (RGBA)
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr);

    let idat = deflate_scanlines(pixels, width, height)
        .map_err(|e| ThermalError::Encode(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Prefix each scanline with filter type 0 and zlib-compress the lot.
fn deflate_scanlines(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let row_len = width * RGBA_STRIDE;
    let mut raw = Vec::with_capacity(height * (1 + row_len));
    for row in pixels.chunks_exact(row_len) {
        raw.push(0);
        raw.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&raw)?;
    encoder.finish()
}

/// Append a length-prefixed, CRC-terminated chunk.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_and_ihdr() {
        let png = encode_rgba(&[255, 0, 0, 255], 1, 1).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
        // length (13) + "IHDR"
        assert_eq!(&png[8..16], &[0, 0, 0, 13, b'I', b'H', b'D', b'R']);
        // width, height
        assert_eq!(&png[16..24], &[0, 0, 0, 1, 0, 0, 0, 1]);
        // bit depth 8, color type 6
        assert_eq!(&png[24..26], &[8, 6]);
    }

    #[test]
    fn test_ends_with_iend() {
        let png = encode_rgba(&[0; 16], 2, 2).unwrap();
        let tail = &png[png.len() - 12..];
        assert_eq!(&tail[0..8], &[0, 0, 0, 0, b'I', b'E', b'N', b'D']);
        assert_eq!(&tail[8..], &crc32fast::hash(b"IEND").to_be_bytes());
    }

    #[test]
    fn test_rejects_short_buffer() {
        let err = encode_rgba(&[0; 15], 2, 2).unwrap_err();
        assert!(matches!(err, ThermalError::Encode(_)));
    }
}
