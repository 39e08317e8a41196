//! Decoded RGBA pixel access.

use crate::{PicasciiError, Result};
use image::{DynamicImage, RgbaImage};
use std::path::Path;

/// Anything the converter can read pixels from.
pub trait PixelSource {
    fn dimensions(&self) -> (u32, u32);

    /// RGBA of the pixel at `(x, y)`. Fails with
    /// [`PicasciiError::PixelAccessDenied`] when the data cannot be read.
    fn rgba(&self, x: u32, y: u32) -> Result<[u8; 4]>;
}

/// Owned, immutable RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw row-major RGBA bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PicasciiError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(PicasciiError::PixelAccessDenied(format!(
                "expected {expected} bytes of RGBA data for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    /// Decode an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = image::open(path.as_ref())?;
        Self::from_image(&image)
    }
}

impl PixelSource for PixelBuffer {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn rgba(&self, x: u32, y: u32) -> Result<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return Err(PicasciiError::PixelAccessDenied(format!(
                "pixel ({x}, {y}) outside {}x{} buffer",
                self.width, self.height
            )));
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Ok([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn rgba(&self, x: u32, y: u32) -> Result<[u8; 4]> {
        self.get_pixel_checked(x, y).map(|p| p.0).ok_or_else(|| {
            PicasciiError::PixelAccessDenied(format!("pixel ({x}, {y}) outside image"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            PixelBuffer::from_rgba(0, 3, vec![]),
            Err(PicasciiError::InvalidDimensions { width: 0, height: 3 })
        ));
        assert!(matches!(
            PixelBuffer::from_rgba(3, 0, vec![]),
            Err(PicasciiError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn rejects_short_data() {
        let err = PixelBuffer::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, PicasciiError::PixelAccessDenied(_)));
    }

    #[test]
    fn reads_row_major() {
        let data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
        let buf = PixelBuffer::from_rgba(2, 2, data).unwrap();
        assert_eq!(buf.rgba(1, 0).unwrap(), [5, 6, 7, 8]);
        assert_eq!(buf.rgba(0, 1).unwrap(), [9, 10, 11, 12]);
        assert!(buf.rgba(2, 0).is_err());
    }

    #[test]
    fn from_dynamic_image() {
        let img = RgbaImage::from_pixel(3, 2, image::Rgba([9, 8, 7, 255]));
        let buf = PixelBuffer::from_image(&DynamicImage::ImageRgba8(img.clone())).unwrap();
        assert_eq!(buf.dimensions(), (3, 2));
        assert_eq!(buf.rgba(2, 1).unwrap(), img.rgba(2, 1).unwrap());
    }
}
