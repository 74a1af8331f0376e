//! JPEG stream decoding.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader};
use thiserror::Error;

use crate::frame::Frame;

/// Error types for JPEG decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stream is corrupted, truncated or not a JPEG.
    #[error("Corrupted or incomplete JPEG stream: {0}")]
    CorruptedFile(String),
}

/// Decode JPEG bytes into a frame.
///
/// 8-bit grayscale streams decode to a `Luma` frame; every other color
/// type is converted to `Rgb`.
pub fn decode_jpeg(bytes: &[u8]) -> Result<Frame, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::CorruptedFile("empty stream".to_string()));
    }

    let img = ImageReader::with_format(Cursor::new(bytes), ImageFormat::Jpeg)
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(match img {
        DynamicImage::ImageLuma8(gray) => Frame::from_luma_image(gray),
        other => Frame::from_rgb_image(other.into_rgb8()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_jpeg, EncodeOptions};
    use crate::frame::PixelLayout;
    use crate::quality::Quality;

    fn encoded(frame: &Frame) -> Vec<u8> {
        let options = EncodeOptions::new(Quality::new(95).unwrap()).with_optimize(true);
        encode_jpeg(frame, &options).unwrap()
    }

    #[test]
    fn test_decode_rgb() {
        let frame = Frame::rgb(24, 16, vec![90u8; 24 * 16 * 3]);
        let decoded = decode_jpeg(&encoded(&frame)).unwrap();

        assert_eq!((decoded.width, decoded.height), (24, 16));
        assert_eq!(decoded.layout, PixelLayout::Rgb);
        assert_eq!(decoded.byte_size(), 24 * 16 * 3);
        assert!(decoded.pixels.iter().all(|&v| v.abs_diff(90) <= 2));
    }

    #[test]
    fn test_decode_grayscale_stays_luma() {
        let frame = Frame::luma(8, 8, vec![200u8; 64]);
        let decoded = decode_jpeg(&encoded(&frame)).unwrap();

        assert_eq!(decoded.layout, PixelLayout::Luma);
        assert_eq!(decoded.byte_size(), 64);
        assert!(decoded.pixels.iter().all(|&v| v.abs_diff(200) <= 2));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_jpeg(&[]), Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_jpeg(&[0x00, 0x01, 0x02, 0x03]);
        match result {
            Err(DecodeError::CorruptedFile(_)) => {}
            Err(e) => panic!("Expected CorruptedFile error, got: {:?}", e),
            Ok(_) => panic!("Expected error, got success"),
        }
    }

    #[test]
    fn test_decode_truncated() {
        let bytes = encoded(&Frame::rgb(16, 16, vec![50u8; 16 * 16 * 3]));
        assert!(decode_jpeg(&bytes[..20]).is_err());
    }
}
