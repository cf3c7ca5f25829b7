use crate::field::Schema;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to an input port synthesized during propagation for a node
/// that declared none.
pub const DEFAULT_INPUT_PORT: &str = "Input Port";
/// Name given to a synthesized output port.
pub const DEFAULT_OUTPUT_PORT: &str = "Output Port";

/// Opaque source configuration for reader-family nodes. The engine carries
/// it for the external scheduler but never interprets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReaderConfig {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub options: AHashMap<String, serde_json::Value>,
}

/// Opaque sink configuration for writer-family nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriterConfig {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub options: AHashMap<String, serde_json::Value>,
}

/// Field-level mapping table for a mapper node.
///
/// An empty mapping list makes the mapper behave like any other
/// pass-through processor during propagation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapperConfig {
    #[serde(default)]
    pub mappings: Vec<crate::graph::edge::FieldMapping>,
}

/// The closed set of node kinds. Type-specific configuration travels as
/// variant payload, so "a mapper node has a mapper configuration" is a
/// structural fact rather than a runtime null check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node_type", content = "config", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    // Readers
    FileReader(ReaderConfig),
    DatabaseReader(ReaderConfig),
    ApiReader(ReaderConfig),
    StreamReader(ReaderConfig),
    CloudReader(ReaderConfig),
    // Processors
    Mapper(MapperConfig),
    Filter,
    Aggregator,
    Joiner,
    Sorter,
    Deduplicator,
    Splitter,
    Union,
    Lookup,
    Validator,
    // Writers
    FileWriter(WriterConfig),
    DatabaseWriter(WriterConfig),
    ApiWriter(WriterConfig),
    StreamWriter(WriterConfig),
    // Control
    Trigger,
    Checkpoint,
}

impl NodeKind {
    /// Stable SCREAMING_SNAKE name, used in trace text and display.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::FileReader(_) => "FILE_READER",
            NodeKind::DatabaseReader(_) => "DATABASE_READER",
            NodeKind::ApiReader(_) => "API_READER",
            NodeKind::StreamReader(_) => "STREAM_READER",
            NodeKind::CloudReader(_) => "CLOUD_READER",
            NodeKind::Mapper(_) => "MAPPER",
            NodeKind::Filter => "FILTER",
            NodeKind::Aggregator => "AGGREGATOR",
            NodeKind::Joiner => "JOINER",
            NodeKind::Sorter => "SORTER",
            NodeKind::Deduplicator => "DEDUPLICATOR",
            NodeKind::Splitter => "SPLITTER",
            NodeKind::Union => "UNION",
            NodeKind::Lookup => "LOOKUP",
            NodeKind::Validator => "VALIDATOR",
            NodeKind::FileWriter(_) => "FILE_WRITER",
            NodeKind::DatabaseWriter(_) => "DATABASE_WRITER",
            NodeKind::ApiWriter(_) => "API_WRITER",
            NodeKind::StreamWriter(_) => "STREAM_WRITER",
            NodeKind::Trigger => "TRIGGER",
            NodeKind::Checkpoint => "CHECKPOINT",
        }
    }

    /// True for the reader family (every kind whose name ends in `_READER`).
    pub fn is_reader(&self) -> bool {
        matches!(
            self,
            NodeKind::FileReader(_)
                | NodeKind::DatabaseReader(_)
                | NodeKind::ApiReader(_)
                | NodeKind::StreamReader(_)
                | NodeKind::CloudReader(_)
        )
    }

    pub fn is_writer(&self) -> bool {
        matches!(
            self,
            NodeKind::FileWriter(_)
                | NodeKind::DatabaseWriter(_)
                | NodeKind::ApiWriter(_)
                | NodeKind::StreamWriter(_)
        )
    }

    pub fn is_trigger(&self) -> bool {
        matches!(self, NodeKind::Trigger)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A named slot on a node holding the schema observed at that point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    #[serde(default)]
    pub schema: Option<Schema>,
}

impl Port {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
        }
    }
}

/// One processing step in the pipeline graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique within a DAG.
    pub id: String,
    /// Human-readable label, used in trace text.
    pub name: String,
    pub kind: NodeKind,
    /// Node-level schema, set by reverse inference and forward propagation.
    /// Pre-existing values act as hints and seed the first computation.
    #[serde(default)]
    pub schema: Option<Schema>,
    #[serde(default)]
    pub input_ports: Vec<Port>,
    #[serde(default)]
    pub output_ports: Vec<Port>,
    /// Upstream node ids. Consulted only to decide source-node eligibility
    /// during traversal seeding, never for cycle checking.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl Node {
    /// A node whose label defaults to its id.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            schema: None,
            input_ports: Vec::new(),
            output_ports: Vec::new(),
            depends_on: Vec::new(),
        }
    }

    pub fn named(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            schema: None,
            input_ports: Vec::new(),
            output_ports: Vec::new(),
            depends_on: Vec::new(),
        }
    }

    pub fn with_depends_on(mut self, upstream: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.depends_on = upstream.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// The schema on the first input port, if any.
    pub fn first_input_schema(&self) -> Option<&Schema> {
        self.input_ports.first().and_then(|p| p.schema.as_ref())
    }

    /// The schema on the first output port, if any.
    pub fn first_output_schema(&self) -> Option<&Schema> {
        self.output_ports.first().and_then(|p| p.schema.as_ref())
    }
}
