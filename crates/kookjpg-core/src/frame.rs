//! 8-bit interleaved image frames passed between the tensor layer and the codec.

use serde::{Deserialize, Serialize};

/// Channel layout of a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelLayout {
    /// One 8-bit grayscale sample per pixel.
    Luma,
    /// Three 8-bit samples per pixel, red, green and blue.
    Rgb,
}

impl PixelLayout {
    /// Number of bytes each pixel occupies.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Luma => 1,
            PixelLayout::Rgb => 3,
        }
    }
}

/// A single image with 8-bit pixel data in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Layout of `pixels`.
    pub layout: PixelLayout,
    /// Pixel data, `width * height * layout.channels()` bytes.
    pub pixels: Vec<u8>,
}

impl Frame {
    /// Create a new frame with the given dimensions, layout and pixel data.
    pub fn new(width: u32, height: u32, layout: PixelLayout, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * layout.channels(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            layout,
            pixels,
        }
    }

    /// Create an RGB frame.
    pub fn rgb(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::new(width, height, PixelLayout::Rgb, pixels)
    }

    /// Create a grayscale frame.
    pub fn luma(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::new(width, height, PixelLayout::Luma, pixels)
    }

    /// Create a frame from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::rgb(width, height, img.into_raw())
    }

    /// Create a frame from an `image::GrayImage`.
    pub fn from_luma_image(img: image::GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self::luma(width, height, img.into_raw())
    }

    /// Broadcast a grayscale frame to three equal channels.
    ///
    /// RGB frames are returned unchanged.
    pub fn into_rgb(self) -> Self {
        match self.layout {
            PixelLayout::Rgb => self,
            PixelLayout::Luma => {
                let pixels = self.pixels.iter().flat_map(|&v| [v, v, v]).collect();
                Self::rgb(self.width, self.height, pixels)
            }
        }
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this frame has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
