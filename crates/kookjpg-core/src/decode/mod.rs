//! JPEG decoding back into 8-bit frames.
//!
//! Decoding goes through the `image` crate. Grayscale streams stay
//! single-channel so callers can decide how to normalize them.

mod jpeg;

pub use jpeg::{decode_jpeg, DecodeError};
