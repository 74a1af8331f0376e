//! Encoder settings.

use jpeg_encoder::SamplingFactor;
use serde::{Deserialize, Serialize};

use crate::quality::Quality;

/// Chroma subsampling ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Subsampling {
    /// Full chroma resolution.
    Yuv444,
    /// Chroma halved horizontally.
    Yuv422,
    /// Chroma halved in both directions.
    #[default]
    Yuv420,
}

impl Subsampling {
    /// Convert to the encoder's sampling factor.
    pub fn to_sampling_factor(self) -> SamplingFactor {
        match self {
            Subsampling::Yuv444 => SamplingFactor::R_4_4_4,
            Subsampling::Yuv422 => SamplingFactor::R_4_2_2,
            Subsampling::Yuv420 => SamplingFactor::R_4_2_0,
        }
    }
}

/// Settings for a single JPEG encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncodeOptions {
    pub quality: Quality,
    pub subsampling: Subsampling,
    /// Build Huffman tables from the image statistics instead of the
    /// standard tables. Smaller files, same pixels.
    pub optimize: bool,
}

impl EncodeOptions {
    pub fn new(quality: Quality) -> Self {
        Self {
            quality,
            ..Self::default()
        }
    }

    pub fn with_subsampling(mut self, subsampling: Subsampling) -> Self {
        self.subsampling = subsampling;
        self
    }

    pub fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsampling_conversion() {
        assert!(matches!(
            Subsampling::Yuv444.to_sampling_factor(),
            SamplingFactor::R_4_4_4
        ));
        assert!(matches!(
            Subsampling::Yuv422.to_sampling_factor(),
            SamplingFactor::R_4_2_2
        ));
        assert!(matches!(
            Subsampling::Yuv420.to_sampling_factor(),
            SamplingFactor::R_4_2_0
        ));
    }

    #[test]
    fn test_options_builder() {
        let quality = Quality::new(42).unwrap();
        let options = EncodeOptions::new(quality)
            .with_subsampling(Subsampling::Yuv422)
            .with_optimize(true);

        assert_eq!(options.quality, quality);
        assert_eq!(options.subsampling, Subsampling::Yuv422);
        assert!(options.optimize);
    }

    #[test]
    fn test_options_default() {
        let options = EncodeOptions::default();
        assert_eq!(options.quality.get(), 90);
        assert_eq!(options.subsampling, Subsampling::Yuv420);
        assert!(!options.optimize);
    }
}
