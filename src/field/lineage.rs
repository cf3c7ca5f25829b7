use serde::{Deserialize, Serialize};

/// Per-field provenance record: the node and path a field originated from,
/// plus the ordered history of transformation steps applied since.
///
/// The `flow_trace` is append-only within a single propagation run. Entries
/// are never removed or reordered; stages that rebuild a field copy the
/// trace forward and append their own entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldLineage {
    #[serde(default)]
    pub source_node_id: Option<String>,
    #[serde(default)]
    pub source_path: Option<String>,
    #[serde(default)]
    pub flow_trace: Vec<String>,
}

impl FieldLineage {
    /// A lineage anchored at a concrete node and path.
    pub fn from_source(node_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            source_node_id: Some(node_id.into()),
            source_path: Some(path.into()),
            flow_trace: Vec::new(),
        }
    }

    /// A lineage that only knows the path it was derived from.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            source_node_id: None,
            source_path: Some(path.into()),
            flow_trace: Vec::new(),
        }
    }

    /// Appends one human-readable step to the flow trace.
    pub fn add_trace(&mut self, entry: impl Into<String>) {
        self.flow_trace.push(entry.into());
    }
}
