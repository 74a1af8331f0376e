//! Input and output type declarations in the host's JSON shape.
//!
//! A node declares its inputs as
//! `{"required": {"name": ["TYPE", {options}]}}`, where the options object
//! is only present for widgets such as integer sliders.

use std::collections::BTreeMap;

use serde::Serialize;

/// Socket and widget types understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IoType {
    Image,
    Int,
}

/// Integer widget settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntOptions {
    pub default: i64,
    pub min: i64,
    pub max: i64,
    pub step: i64,
    pub display: &'static str,
}

/// One declared input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InputSpec {
    /// A plain socket, serialized as `["TYPE"]`.
    Socket((IoType,)),
    /// An integer widget, serialized as `["INT", {...}]`.
    Int((IoType, IntOptions)),
}

impl InputSpec {
    pub fn socket(io_type: IoType) -> Self {
        InputSpec::Socket((io_type,))
    }

    pub fn int(options: IntOptions) -> Self {
        InputSpec::Int((IoType::Int, options))
    }
}

/// Full input declaration of a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputTypes {
    pub required: BTreeMap<&'static str, InputSpec>,
}

impl InputTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: &'static str, spec: InputSpec) -> Self {
        self.required.insert(name, spec);
        self
    }
}

/// Static description of a node as the host reads it.
pub trait NodeDefinition {
    /// Method the host calls to run the node.
    const FUNCTION: &'static str;
    const CATEGORY: &'static str;
    const DESCRIPTION: &'static str;
    const RETURN_TYPES: &'static [IoType];
    const RETURN_NAMES: &'static [&'static str];
    /// Output nodes run even when nothing consumes their result.
    const OUTPUT_NODE: bool = false;

    fn input_types() -> InputTypes;
}

/// Serializable snapshot of a [`NodeDefinition`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeInfo {
    pub input: InputTypes,
    pub output: &'static [IoType],
    pub output_name: &'static [&'static str],
    pub function: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub output_node: bool,
}

/// Collect the declaration of node `N`.
pub fn node_info<N: NodeDefinition>() -> NodeInfo {
    NodeInfo {
        input: N::input_types(),
        output: N::RETURN_TYPES,
        output_name: N::RETURN_NAMES,
        function: N::FUNCTION,
        category: N::CATEGORY,
        description: N::DESCRIPTION,
        output_node: N::OUTPUT_NODE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_socket_serializes_as_one_element_list() {
        let value = serde_json::to_value(InputSpec::socket(IoType::Image)).unwrap();
        assert_eq!(value, json!(["IMAGE"]));
    }

    #[test]
    fn test_int_widget_serialization() {
        let spec = InputSpec::int(IntOptions {
            default: 5,
            min: 1,
            max: 9,
            step: 2,
            display: "slider",
        });
        let value = serde_json::to_value(spec).unwrap();
        assert_eq!(
            value,
            json!(["INT", {"default": 5, "min": 1, "max": 9, "step": 2, "display": "slider"}])
        );
    }

    #[test]
    fn test_input_types_builder() {
        let types = InputTypes::new().required("images", InputSpec::socket(IoType::Image));
        let value = serde_json::to_value(types).unwrap();
        assert_eq!(value, json!({"required": {"images": ["IMAGE"]}}));
    }
}
