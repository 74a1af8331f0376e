//! In-memory JPEG round trip for image batches.
//!
//! Each image is scaled to 8-bit, encoded to JPEG at the requested
//! quality, decoded again and scaled back to `[0, 1]`. The output batch
//! always has three channels: alpha is dropped before encoding and
//! grayscale results are broadcast after decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::decode::{decode_jpeg, DecodeError};
use crate::encode::{encode_jpeg, EncodeError, EncodeOptions, Subsampling};
use crate::frame::Frame;
use crate::quality::Quality;
use crate::tensor::{ImageBatch, TensorError};

/// Errors that abort a compression run.
#[derive(Debug, Error)]
pub enum CompressError {
    #[error(transparent)]
    Tensor(#[from] TensorError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Encoder settings used by [`Compressor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressorConfig {
    /// Chroma subsampling (4:2:2 by default).
    pub subsampling: Subsampling,
    /// Optimized Huffman tables (on by default).
    pub optimize: bool,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            subsampling: Subsampling::Yuv422,
            optimize: true,
        }
    }
}

/// Re-encodes image batches through JPEG.
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: CompressorConfig,
}

impl Compressor {
    pub fn new(config: CompressorConfig) -> Self {
        Self { config }
    }

    /// Compress every image in `batch` at `quality`.
    ///
    /// The result has the same batch size, height and width, with three
    /// channels. The first failing image aborts the whole batch.
    pub fn compress(&self, batch: &ImageBatch, quality: Quality) -> Result<ImageBatch, CompressError> {
        let mut frames = Vec::with_capacity(batch.len());

        for index in 0..batch.len() {
            let frame = batch.frame(index)?;
            debug!(index, width = frame.width, height = frame.height, "compressing image");
            frames.push(self.round_trip(&frame, quality)?);
        }

        let output = ImageBatch::from_frames(&frames, batch.height(), batch.width())?;
        info!(batch_size = batch.len(), %quality, "compressed batch");
        Ok(output)
    }

    /// Encode a single frame and decode it again, returning an RGB frame.
    pub fn round_trip(&self, frame: &Frame, quality: Quality) -> Result<Frame, CompressError> {
        let options = EncodeOptions::new(quality)
            .with_subsampling(self.config.subsampling)
            .with_optimize(self.config.optimize);

        let bytes = encode_jpeg(frame, &options)?;
        debug!(bytes = bytes.len(), "encoded jpeg");

        Ok(decode_jpeg(&bytes)?.into_rgb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::PixelLayout;
    use ndarray::Array4;

    fn quality(value: u8) -> Quality {
        Quality::new(value).unwrap()
    }

    fn solid_batch(n: usize, h: usize, w: usize, c: usize, value: f32) -> ImageBatch {
        ImageBatch::new(Array4::from_elem((n, h, w, c), value)).unwrap()
    }

    #[test]
    fn test_compress_preserves_shape() {
        let batch = solid_batch(1, 64, 64, 3, 0.5);
        let output = Compressor::default().compress(&batch, quality(50)).unwrap();

        assert_eq!(output.shape(), [1, 64, 64, 3]);
        assert!(output.as_array().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_compress_multiple_images() {
        let mut data = Array4::<f32>::zeros((3, 16, 24, 3));
        data.index_axis_mut(ndarray::Axis(0), 1).fill(1.0);
        data.index_axis_mut(ndarray::Axis(0), 2).fill(0.25);
        let batch = ImageBatch::new(data).unwrap();

        let output = Compressor::default().compress(&batch, quality(90)).unwrap();
        assert_eq!(output.shape(), [3, 16, 24, 3]);

        let out = output.as_array();
        assert!(out[[0, 8, 8, 0]] < 0.05);
        assert!(out[[1, 8, 8, 0]] > 0.95);
        assert!((out[[2, 8, 8, 1]] - 0.25).abs() < 0.05);
    }

    #[test]
    fn test_solid_color_survives_quality_100() {
        let mut data = Array4::<f32>::zeros((1, 32, 32, 3));
        for mut pixel in data.lanes_mut(ndarray::Axis(3)) {
            pixel[0] = 0.8;
            pixel[1] = 0.4;
            pixel[2] = 0.2;
        }
        let batch = ImageBatch::new(data).unwrap();

        let output = Compressor::default().compress(&batch, quality(100)).unwrap();
        let out = output.as_array();

        for (c, expected) in [0.8f32, 0.4, 0.2].into_iter().enumerate() {
            let actual = out[[0, 16, 16, c]];
            assert!(
                (actual - expected).abs() < 0.03,
                "channel {c}: expected {expected}, got {actual}"
            );
        }
    }

    #[test]
    fn test_alpha_is_dropped() {
        let batch = solid_batch(2, 8, 8, 4, 0.6);
        let output = Compressor::default().compress(&batch, quality(80)).unwrap();

        assert_eq!(output.shape(), [2, 8, 8, 3]);
    }

    #[test]
    fn test_grayscale_is_broadcast() {
        let batch = solid_batch(1, 8, 8, 1, 0.5);
        let output = Compressor::default().compress(&batch, quality(90)).unwrap();

        assert_eq!(output.shape(), [1, 8, 8, 3]);
        let out = output.as_array();
        assert_eq!(out[[0, 3, 3, 0]], out[[0, 3, 3, 1]]);
        assert_eq!(out[[0, 3, 3, 1]], out[[0, 3, 3, 2]]);
    }

    #[test]
    fn test_quality_zero_compresses() {
        let batch = solid_batch(1, 16, 16, 3, 0.3);
        assert!(Compressor::default().compress(&batch, quality(0)).is_ok());
    }

    #[test]
    fn test_empty_batch() {
        let batch = solid_batch(0, 16, 16, 3, 0.0);
        let output = Compressor::default().compress(&batch, quality(90)).unwrap();

        assert!(output.is_empty());
        assert_eq!(output.shape(), [0, 16, 16, 3]);
    }

    #[test]
    fn test_zero_sized_image_fails() {
        let batch = solid_batch(1, 0, 16, 3, 0.0);
        let result = Compressor::default().compress(&batch, quality(90));

        assert!(matches!(
            result,
            Err(CompressError::Encode(EncodeError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn test_round_trip_returns_rgb() {
        let frame = Frame::luma(4, 4, vec![128u8; 16]);
        let result = Compressor::default().round_trip(&frame, quality(90)).unwrap();

        assert_eq!(result.layout, PixelLayout::Rgb);
        assert_eq!(result.byte_size(), 4 * 4 * 3);
    }

    #[test]
    fn test_config_default() {
        let config = CompressorConfig::default();
        assert_eq!(config.subsampling, Subsampling::Yuv422);
        assert!(config.optimize);
    }
}
