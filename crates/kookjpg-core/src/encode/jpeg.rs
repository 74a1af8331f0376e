//! JPEG encoding of 8-bit frames.

use std::io::Write;

use jpeg_encoder::{ColorType, Encoder};
use thiserror::Error;
use tracing::debug;

use super::EncodeOptions;
use crate::frame::{Frame, PixelLayout};

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match the frame dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero or exceeds the JPEG limit of 65535
    #[error("Invalid dimensions: {width}x{height} (each side must be 1 to 65535)")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the encoded stream failed
    #[error("Failed to write JPEG stream: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode a frame to JPEG bytes in memory.
///
/// Grayscale frames produce a single-component JPEG; RGB frames are
/// encoded with the subsampling in `options`.
///
/// With `optimize` set, a stream whose optimized Huffman tables collapse
/// to a single symbol (flat images) is re-encoded with the standard
/// tables. The encoder emits such tables with codes the decoder cannot
/// resolve, which corrupts every pixel.
pub fn encode_jpeg(frame: &Frame, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = validate(frame)?;

    let bytes = encode_raw(frame, width, height, options)?;
    if options.optimize && has_degenerate_huffman_table(&bytes) {
        debug!(
            width = frame.width,
            height = frame.height,
            "optimized huffman table has a single symbol, using standard tables"
        );
        return encode_raw(frame, width, height, &options.with_optimize(false));
    }

    Ok(bytes)
}

/// Encode a frame to JPEG, writing the stream into `writer`.
pub fn encode_jpeg_to<W: Write>(
    frame: &Frame,
    options: &EncodeOptions,
    mut writer: W,
) -> Result<(), EncodeError> {
    let bytes = encode_jpeg(frame, options)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Check dimensions and buffer length, returning the codec's `u16` size.
fn validate(frame: &Frame) -> Result<(u16, u16), EncodeError> {
    let (width, height) = match (u16::try_from(frame.width), u16::try_from(frame.height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => {
            return Err(EncodeError::InvalidDimensions {
                width: frame.width,
                height: frame.height,
            })
        }
    };

    let expected = frame.pixel_count() * frame.layout.channels();
    if frame.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: frame.pixels.len(),
        });
    }

    Ok((width, height))
}

fn encode_raw(
    frame: &Frame,
    width: u16,
    height: u16,
    options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    let color_type = match frame.layout {
        PixelLayout::Luma => ColorType::Luma,
        PixelLayout::Rgb => ColorType::Rgb,
    };

    let mut buffer = Vec::new();
    let mut encoder = Encoder::new(&mut buffer, options.quality.encoder_value());
    encoder.set_sampling_factor(options.subsampling.to_sampling_factor());
    encoder.set_optimized_huffman_tables(options.optimize);

    encoder
        .encode(&frame.pixels, width, height, color_type)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}

/// Scan the header segments up to the first SOS and report whether any
/// DHT table defines fewer than two codes.
fn has_degenerate_huffman_table(jpeg: &[u8]) -> bool {
    const DHT: u8 = 0xC4;
    const SOS: u8 = 0xDA;

    // Skip SOI
    let mut pos = 2;
    while pos + 4 <= jpeg.len() {
        if jpeg[pos] != 0xFF {
            return false;
        }
        let marker = jpeg[pos + 1];
        if marker == SOS {
            return false;
        }
        let len = usize::from(u16::from_be_bytes([jpeg[pos + 2], jpeg[pos + 3]]));
        let end = (pos + 2 + len).min(jpeg.len());

        if marker == DHT {
            // Each table: class/id byte, 16 length counts, then the symbols
            let mut table = pos + 4;
            while table + 17 <= end {
                let symbols: usize = jpeg[table + 1..table + 17]
                    .iter()
                    .map(|&n| usize::from(n))
                    .sum();
                if symbols < 2 {
                    return true;
                }
                table += 17 + symbols;
            }
        }

        pos = end;
    }
    false
}
