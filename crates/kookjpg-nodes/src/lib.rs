//! kookjpg Nodes - host adapters for JPEG compression and saving
//!
//! This crate exposes the two nodes the host loads:
//!
//! - [`JpgImageCompression`] - round-trips images through JPEG in memory
//! - [`SaveJpgImage`] - writes images to `output/` and returns a preview payload
//!
//! Each node declares its inputs and outputs through [`NodeDefinition`],
//! which serializes to the host's schema format.

mod compression;
mod error;
mod logging;
mod save;
mod schema;

pub use compression::{JpgImageCompression, QUALITY_WIDGET};
pub use error::NodeError;
pub use logging::{init_logging, DEFAULT_FILTER};
pub use save::{NodeOutput, SaveJpgImage, UiPayload};
pub use schema::{node_info, InputSpec, InputTypes, IntOptions, IoType, NodeDefinition, NodeInfo};

/// Get the version of the node package
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
