//! kookjpg Core - JPEG compression and saving for image tensors
//!
//! This crate converts the host's batched float image tensors to 8-bit
//! frames, runs them through a JPEG codec, and either brings the result
//! back as a tensor ([`Compressor`]) or writes it to disk ([`Saver`]).
//!
//! # Module Structure
//!
//! - `tensor` - `(batch, height, width, channel)` tensors and frame conversion
//! - `frame` - 8-bit interleaved frames
//! - `quality` - validated JPEG quality
//! - `encode` / `decode` - JPEG codec wrappers
//! - `compress` - in-memory JPEG round trip
//! - `save` - JPEG files on disk

pub mod compress;
pub mod decode;
pub mod encode;
pub mod frame;
pub mod quality;
pub mod save;
pub mod tensor;

pub use compress::{CompressError, Compressor, CompressorConfig};
pub use frame::{Frame, PixelLayout};
pub use quality::{Quality, QualityError};
pub use save::{FolderType, SaveError, SavedImage, Saver, SaverConfig};
pub use tensor::{ImageBatch, TensorError};
