//! JPEG encoding for compression and saving.
//!
//! This module provides functionality for:
//! - Encoding 8-bit frames to JPEG with configurable quality
//! - Choosing the chroma subsampling ratio
//! - Optimized Huffman tables (the "optimize" switch)
//!
//! Encoding is backed by the `jpeg-encoder` crate.

mod jpeg;
mod options;

pub use jpeg::{encode_jpeg, encode_jpeg_to, EncodeError};
pub use options::{EncodeOptions, Subsampling};
