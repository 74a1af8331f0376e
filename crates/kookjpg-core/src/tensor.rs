//! Conversion between host image tensors and 8-bit frames.
//!
//! The host represents a batch of images as a float32 array shaped
//! `(batch, height, width, channel)` with values in `[0, 1]`.

use ndarray::{Array4, Axis};
use thiserror::Error;

use crate::frame::{Frame, PixelLayout};

/// Errors raised while moving between tensors and frames.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TensorError {
    /// Channel axis is not grayscale, RGB or RGBA.
    #[error("Unsupported channel count {channels}: expected 1, 3 or 4")]
    UnsupportedChannels { channels: usize },

    /// Requested image is past the end of the batch.
    #[error("Image index {index} out of range for batch of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Height or width does not fit the codec's `u32` dimensions.
    #[error("Image dimensions {width}x{height} are too large")]
    DimensionsTooLarge { width: usize, height: usize },

    /// A frame does not match the dimensions of the batch being assembled.
    #[error("Frame {index} is {actual_width}x{actual_height}, expected {width}x{height}")]
    FrameMismatch {
        index: usize,
        width: usize,
        height: usize,
        actual_width: u32,
        actual_height: u32,
    },
}

/// A batch of images in the host's `(batch, height, width, channel)` layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBatch {
    data: Array4<f32>,
}

impl ImageBatch {
    /// Wrap a host tensor. Only 1, 3 or 4 channels are accepted.
    pub fn new(data: Array4<f32>) -> Result<Self, TensorError> {
        let channels = data.shape()[3];
        if !matches!(channels, 1 | 3 | 4) {
            return Err(TensorError::UnsupportedChannels { channels });
        }
        Ok(Self { data })
    }

    /// Number of images in the batch.
    pub fn len(&self) -> usize {
        self.data.shape()[0]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn height(&self) -> usize {
        self.data.shape()[1]
    }

    pub fn width(&self) -> usize {
        self.data.shape()[2]
    }

    pub fn channels(&self) -> usize {
        self.data.shape()[3]
    }

    /// `[batch, height, width, channel]`.
    pub fn shape(&self) -> [usize; 4] {
        [self.len(), self.height(), self.width(), self.channels()]
    }

    pub fn as_array(&self) -> &Array4<f32> {
        &self.data
    }

    pub fn into_array(self) -> Array4<f32> {
        self.data
    }

    /// Extract one image as an 8-bit frame.
    ///
    /// Values are clamped to `[0, 1]` and scaled by 255 with truncation.
    /// RGBA images lose their alpha channel; grayscale stays single-channel.
    pub fn frame(&self, index: usize) -> Result<Frame, TensorError> {
        if index >= self.len() {
            return Err(TensorError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }

        let (height, width) = (self.height(), self.width());
        let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(TensorError::DimensionsTooLarge { width, height }),
        };

        let layout = if self.channels() == 1 {
            PixelLayout::Luma
        } else {
            PixelLayout::Rgb
        };
        let keep = layout.channels();

        let image = self.data.index_axis(Axis(0), index);
        let mut pixels = Vec::with_capacity(width * height * keep);
        for row in image.outer_iter() {
            for pixel in row.outer_iter() {
                pixels.extend(pixel.iter().take(keep).map(|&v| to_u8(v)));
            }
        }

        Ok(Frame::new(w, h, layout, pixels))
    }

    /// Assemble a 3-channel batch from frames of identical dimensions.
    ///
    /// Grayscale frames are broadcast to R = G = B.
    pub fn from_frames(frames: &[Frame], height: usize, width: usize) -> Result<Self, TensorError> {
        let mut data = Array4::<f32>::zeros((frames.len(), height, width, 3));

        for (index, frame) in frames.iter().enumerate() {
            if frame.width as usize != width || frame.height as usize != height {
                return Err(TensorError::FrameMismatch {
                    index,
                    width,
                    height,
                    actual_width: frame.width,
                    actual_height: frame.height,
                });
            }

            let step = frame.layout.channels();
            let mut image = data.index_axis_mut(Axis(0), index);
            for (i, pixel) in frame.pixels.chunks_exact(step).enumerate() {
                let (y, x) = (i / width, i % width);
                for c in 0..3 {
                    let sample = if step == 1 { pixel[0] } else { pixel[c] };
                    image[[y, x, c]] = from_u8(sample);
                }
            }
        }

        Ok(Self { data })
    }
}

/// Scale a `[0, 1]` float to 8-bit, truncating toward zero. NaN maps to 0.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

#[inline]
fn from_u8(value: u8) -> f32 {
    f32::from(value) / 255.0
}
