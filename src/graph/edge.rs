use serde::{Deserialize, Serialize};

use super::node::{DEFAULT_INPUT_PORT, DEFAULT_OUTPUT_PORT};

/// What an edge carries. Only the topology cares; propagation pushes
/// schemas across every kind alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    #[default]
    DataFlow,
    ControlFlow,
    ErrorFlow,
}

/// How a single field mapping relates its source to its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MappingKind {
    #[default]
    Direct,
    Rename,
    MapNested,
    Constant,
    Transform,
}

/// One source-path to target-path mapping, optionally annotated with named
/// transforms or an expression. Used both in mapper configurations and in
/// edge transformations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub source_path: String,
    #[serde(default)]
    pub target_path: Option<String>,
    #[serde(default)]
    pub kind: MappingKind,
    /// Names of transforms applied along this mapping (e.g. `TRIM`).
    /// Recorded in the lineage trail, never executed here.
    #[serde(default)]
    pub transforms: Vec<String>,
    #[serde(default)]
    pub expression: Option<String>,
}

impl FieldMapping {
    pub fn direct(source_path: impl Into<String>, target_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            target_path: Some(target_path.into()),
            kind: MappingKind::Direct,
            transforms: Vec::new(),
            expression: None,
        }
    }

    pub fn with_transforms(mut self, transforms: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.transforms = transforms.into_iter().map(Into::into).collect();
        self
    }

    /// A path that names a real upstream field: not dotted and not the
    /// `"(expression)"` placeholder. Only these participate in reverse
    /// inference.
    pub fn has_simple_source(&self) -> bool {
        !self.source_path.contains('.') && self.source_path != "(expression)"
    }
}

/// The shape of an edge-level transformation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransformationKind {
    #[default]
    FieldMapping,
    Custom,
}

/// Ordered field mappings applied while a schema crosses an edge. An empty
/// mapping list means pass-through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeTransformation {
    #[serde(default)]
    pub kind: TransformationKind,
    #[serde(default)]
    pub mappings: Vec<FieldMapping>,
}

impl EdgeTransformation {
    pub fn mapping(mappings: Vec<FieldMapping>) -> Self {
        Self {
            kind: TransformationKind::FieldMapping,
            mappings,
        }
    }
}

/// Buffering/backpressure policy, consumed by the external execution
/// engine. Opaque to schema propagation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowControl {
    #[serde(default)]
    pub buffer_size: Option<u32>,
    #[serde(default)]
    pub backpressure: Option<BackpressureMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackpressureMode {
    Block,
    DropOldest,
    DropNewest,
}

/// A directed connection between two node ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source_node_id: String,
    #[serde(default = "default_source_port")]
    pub source_port: String,
    pub target_node_id: String,
    #[serde(default = "default_target_port")]
    pub target_port: String,
    #[serde(default)]
    pub kind: EdgeKind,
    #[serde(default)]
    pub transformation: Option<EdgeTransformation>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub flow_control: Option<FlowControl>,
}

fn default_source_port() -> String {
    DEFAULT_OUTPUT_PORT.to_string()
}

fn default_target_port() -> String {
    DEFAULT_INPUT_PORT.to_string()
}

impl Edge {
    /// A plain data-flow edge between default ports.
    pub fn new(
        id: impl Into<String>,
        source_node_id: impl Into<String>,
        target_node_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_node_id: source_node_id.into(),
            source_port: default_source_port(),
            target_node_id: target_node_id.into(),
            target_port: default_target_port(),
            kind: EdgeKind::DataFlow,
            transformation: None,
            condition: None,
            flow_control: None,
        }
    }

    pub fn with_kind(mut self, kind: EdgeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_transformation(mut self, transformation: EdgeTransformation) -> Self {
        self.transformation = Some(transformation);
        self
    }
}
