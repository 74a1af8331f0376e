//! The JPEG save node.

use kookjpg_core::{ImageBatch, SavedImage, Saver};
use ndarray::Array4;
use serde::Serialize;

use crate::error::NodeError;
use crate::schema::{InputSpec, InputTypes, IoType, NodeDefinition};

/// Preview payload: the files the host should display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiPayload {
    pub images: Vec<SavedImage>,
}

/// Result of an output node: UI payload plus an empty result tuple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeOutput {
    pub ui: UiPayload,
    pub result: Vec<serde_json::Value>,
}

impl NodeOutput {
    pub fn from_saved(images: Vec<SavedImage>) -> Self {
        Self {
            ui: UiPayload { images },
            result: Vec::new(),
        }
    }

    /// Render as the JSON object handed back to the host.
    pub fn to_json(&self) -> Result<serde_json::Value, NodeError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Writes the incoming images to the output folder as JPEG (quality 90).
#[derive(Debug, Clone, Default)]
pub struct SaveJpgImage {
    saver: Saver,
}

impl SaveJpgImage {
    pub fn new(saver: Saver) -> Self {
        Self { saver }
    }

    /// Save `images` and report the written files for preview.
    pub fn save_jpg(&self, images: Array4<f32>) -> Result<NodeOutput, NodeError> {
        let batch = ImageBatch::new(images)?;
        let saved = self.saver.save(&batch)?;
        Ok(NodeOutput::from_saved(saved))
    }
}

impl NodeDefinition for SaveJpgImage {
    const FUNCTION: &'static str = "save_jpg";
    const CATEGORY: &'static str = "image";
    const DESCRIPTION: &'static str = "KOOK Save JPG Image Node";
    const RETURN_TYPES: &'static [IoType] = &[];
    const RETURN_NAMES: &'static [&'static str] = &[];
    const OUTPUT_NODE: bool = true;

    fn input_types() -> InputTypes {
        InputTypes::new().required("images", InputSpec::socket(IoType::Image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_output_json() {
        let output = NodeOutput::from_saved(vec![SavedImage::output("a_1.jpg")]);
        assert_eq!(
            output.to_json().unwrap(),
            json!({
                "ui": {"images": [{"filename": "a_1.jpg", "subfolder": "", "type": "output"}]},
                "result": []
            })
        );
    }

    #[test]
    fn test_empty_output_json() {
        let output = NodeOutput::default();
        assert_eq!(
            output.to_json().unwrap(),
            json!({"ui": {"images": []}, "result": []})
        );
    }
}
