//! Writing thermal images into pixel surfaces.

use crate::gradient::ThermalImage;
use thermal_common::{ThermalError, ThermalResult};

/// A writable RGBA8 pixel surface of fixed dimensions.
pub trait Surface {
    /// Declared `(width, height)` in pixels.
    fn extent(&self) -> (usize, usize);

    /// Backing RGBA buffer, 4 bytes per pixel, row-major.
    fn rgba_buffer_mut(&mut self) -> &mut [u8];
}

/// An owned RGBA surface, the in-memory equivalent of a canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaSurface {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaSurface {
    /// Transparent black surface. Fails with [`ThermalError::GridTooLarge`]
    /// when `width * height * 4` does not fit in `usize`.
    pub fn new(width: usize, height: usize) -> ThermalResult<Self> {
        let len = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or(ThermalError::GridTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl Surface for RgbaSurface {
    fn extent(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn rgba_buffer_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Surface for image::RgbaImage {
    fn extent(&self) -> (usize, usize) {
        (self.width() as usize, self.height() as usize)
    }

    fn rgba_buffer_mut(&mut self) -> &mut [u8] {
        &mut **self
    }
}

/// Write `image` into `surface`.
///
/// Fails with [`ThermalError::SizeMismatch`] when the surface's declared
/// dimensions differ from the image's, or when its buffer does not hold
/// exactly `width * height * 4` bytes.
pub fn write<S: Surface + ?Sized>(image: &ThermalImage, surface: &mut S) -> ThermalResult<()> {
    let (surface_width, surface_height) = surface.extent();
    let mismatch = || ThermalError::SizeMismatch {
        image_width: image.width(),
        image_height: image.height(),
        surface_width,
        surface_height,
    };

    if surface_width != image.width() || surface_height != image.height() {
        return Err(mismatch());
    }

    let buffer = surface.rgba_buffer_mut();
    if buffer.len() != image.width() * image.height() * 4 {
        return Err(mismatch());
    }

    image.copy_rgba_into(buffer);
    Ok(())
}
