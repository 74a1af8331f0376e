//! The JPEG compression node.

use kookjpg_core::{Compressor, ImageBatch, Quality};
use ndarray::Array4;
use tracing::warn;

use crate::error::NodeError;
use crate::schema::{InputSpec, InputTypes, IntOptions, IoType, NodeDefinition};

/// Quality widget: default 90, range 0 to 100 in steps of 1.
pub const QUALITY_WIDGET: IntOptions = IntOptions {
    default: 90,
    min: Quality::MIN as i64,
    max: Quality::MAX as i64,
    step: 1,
    display: "number",
};

/// Re-encodes the incoming images through JPEG and passes them on.
#[derive(Debug, Clone, Default)]
pub struct JpgImageCompression {
    compressor: Compressor,
}

impl JpgImageCompression {
    pub fn new(compressor: Compressor) -> Self {
        Self { compressor }
    }

    /// Compress `image` (`(batch, height, width, channel)`, values in
    /// `[0, 1]`) at `quality`, returning a 3-channel tensor.
    ///
    /// Quality outside `0..=100` is rejected before any image is touched.
    pub fn compress(&self, image: Array4<f32>, quality: i64) -> Result<Array4<f32>, NodeError> {
        let quality = Quality::try_from(quality).map_err(|e| {
            warn!(error = %e, "rejected compression quality");
            e
        })?;

        let batch = ImageBatch::new(image)?;
        let output = self.compressor.compress(&batch, quality)?;
        Ok(output.into_array())
    }
}

impl NodeDefinition for JpgImageCompression {
    const FUNCTION: &'static str = "compress";
    const CATEGORY: &'static str = "image";
    const DESCRIPTION: &'static str = "KOOK JPG Image Compression Node";
    const RETURN_TYPES: &'static [IoType] = &[IoType::Image];
    const RETURN_NAMES: &'static [&'static str] = &["image"];

    fn input_types() -> InputTypes {
        InputTypes::new()
            .required("image", InputSpec::socket(IoType::Image))
            .required("quality", InputSpec::int(QUALITY_WIDGET))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_matches_quality_bounds() {
        assert_eq!(QUALITY_WIDGET.min, 0);
        assert_eq!(QUALITY_WIDGET.max, 100);
        assert_eq!(QUALITY_WIDGET.default, i64::from(Quality::DEFAULT));
    }

    #[test]
    fn test_rejects_out_of_range_quality() {
        let node = JpgImageCompression::default();
        for quality in [-1, 101, 1000] {
            let result = node.compress(Array4::zeros((1, 4, 4, 3)), quality);
            assert!(matches!(result, Err(NodeError::Quality(_))), "quality {quality}");
        }
    }

    #[test]
    fn test_rejects_unsupported_channels() {
        let node = JpgImageCompression::default();
        let result = node.compress(Array4::zeros((1, 4, 4, 2)), 90);
        assert!(matches!(result, Err(NodeError::Tensor(_))));
    }
}
