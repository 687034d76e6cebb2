//! Image carriers for LSB steganography.
//!
//! Exposes the colour channels of a lossless image (PNG, BMP) as a flat run of
//! least significant bits. Pixels are scanned row-major and channels in
//! storage order; the alpha channel is never used.

use image::{
    DynamicImage, GenericImageView, GrayAlphaImage, GrayImage, ImageFormat, RgbImage, RgbaImage,
};
use std::io::Cursor;
use std::path::Path;

use super::error::StegoError;
use super::BitCarrier;

/// Channel layout of the pixel buffer held by an [`ImageCarrier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    Luma,
    LumaAlpha,
    Rgb,
    Rgba,
}

impl PixelLayout {
    /// Bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Luma => 1,
            Self::LumaAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Channels per pixel that may carry payload bits.
    pub fn color_channels(self) -> usize {
        match self {
            Self::Luma | Self::LumaAlpha => 1,
            Self::Rgb | Self::Rgba => 3,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, Self::LumaAlpha | Self::Rgba)
    }
}

/// A decoded image whose colour channel LSBs are addressable.
#[derive(Debug, Clone)]
pub struct ImageCarrier {
    width: u32,
    height: u32,
    layout: PixelLayout,
    format: ImageFormat,
    raw: Vec<u8>,
}

impl ImageCarrier {
    /// Loads an image carrier from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StegoError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Loads an image carrier from encoded bytes.
    ///
    /// Only lossless formats are accepted; anything that would be re-encoded
    /// lossily (JPEG, WebP, ...) or that is palette based (GIF) is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StegoError> {
        let format = image::guess_format(bytes)
            .map_err(|_| StegoError::UnsupportedFormat("unrecognized image data".to_string()))?;
        if !is_lossless(format) {
            return Err(StegoError::UnsupportedFormat(format!(
                "{:?} images cannot hold LSB data, use PNG or BMP",
                format
            )));
        }

        let image = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| StegoError::CarrierLoad(e.to_string()))?;
        Self::from_image(image, format)
    }

    /// Wraps an already decoded image.
    ///
    /// Only 8-bit grey, grey+alpha, RGB and RGBA buffers are accepted. Other
    /// layouts (16-bit, float) would have to be converted, and the written
    /// image would then differ from the input in more than its LSBs.
    pub fn from_image(image: DynamicImage, format: ImageFormat) -> Result<Self, StegoError> {
        let (width, height) = image.dimensions();
        let (layout, raw) = match image {
            DynamicImage::ImageLuma8(buf) => (PixelLayout::Luma, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (PixelLayout::LumaAlpha, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (PixelLayout::Rgb, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (PixelLayout::Rgba, buf.into_raw()),
            other => {
                return Err(StegoError::UnsupportedFormat(format!(
                    "{:?} pixels are not supported, use an 8-bit image",
                    other.color()
                )))
            }
        };

        log::debug!(
            "Loaded {}x{} {:?} image as {:?}",
            width,
            height,
            format,
            layout
        );

        Ok(Self {
            width,
            height,
            layout,
            format,
            raw,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Container format the image was loaded from and will be written back as.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Raw interleaved channel bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.raw
    }

    /// Rebuilds a [`DynamicImage`] from the current pixel buffer.
    pub fn to_image(&self) -> Result<DynamicImage, StegoError> {
        let (w, h) = (self.width, self.height);
        let raw = self.raw.clone();
        let image = match self.layout {
            PixelLayout::Luma => GrayImage::from_raw(w, h, raw).map(DynamicImage::ImageLuma8),
            PixelLayout::LumaAlpha => {
                GrayAlphaImage::from_raw(w, h, raw).map(DynamicImage::ImageLumaA8)
            }
            PixelLayout::Rgb => RgbImage::from_raw(w, h, raw).map(DynamicImage::ImageRgb8),
            PixelLayout::Rgba => RgbaImage::from_raw(w, h, raw).map(DynamicImage::ImageRgba8),
        };
        image.ok_or_else(|| StegoError::CarrierSave("pixel buffer does not match dimensions".to_string()))
    }

    /// Encodes the image in its original container format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StegoError> {
        let mut bytes = Vec::new();
        self.to_image()?
            .write_to(&mut Cursor::new(&mut bytes), self.format)
            .map_err(|e| StegoError::CarrierSave(e.to_string()))?;
        Ok(bytes)
    }

    /// Saves the image to a file in its original container format.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StegoError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Maps an eligible sample index to its byte offset in `raw`.
    fn offset(&self, index: usize) -> Result<usize, StegoError> {
        let len = self.sample_count();
        if index >= len {
            return Err(StegoError::IndexOutOfRange { index, len });
        }
        let color = self.layout.color_channels();
        Ok((index / color) * self.layout.channels() + index % color)
    }
}

impl BitCarrier for ImageCarrier {
    fn sample_count(&self) -> usize {
        (self.width as usize) * (self.height as usize) * self.layout.color_channels()
    }

    fn get_lsb(&self, index: usize) -> Result<bool, StegoError> {
        let offset = self.offset(index)?;
        Ok(self.raw[offset] & 1 == 1)
    }

    fn set_lsb(&mut self, index: usize, bit: bool) -> Result<(), StegoError> {
        let offset = self.offset(index)?;
        self.raw[offset] = (self.raw[offset] & 0xFE) | bit as u8;
        Ok(())
    }
}

fn is_lossless(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Png | ImageFormat::Bmp)
}
