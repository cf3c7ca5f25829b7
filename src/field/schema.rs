use super::definition::FieldDefinition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, timestamped snapshot of the fields flowing at one point in the
/// graph. Only top-level fields live here; nesting lives inside each
/// field's `children`.
///
/// A schema is always rebuilt by the stage that produces it, never mutated
/// in place, and ownership transfers to the node or port that stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The node that produced this schema.
    pub node_id: String,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default = "Utc::now")]
    pub captured_at: DateTime<Utc>,
    #[serde(default)]
    pub version: Option<String>,
}

impl Schema {
    pub fn new(
        node_id: impl Into<String>,
        name: impl Into<String>,
        fields: Vec<FieldDefinition>,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            name: name.into(),
            fields,
            captured_at: Utc::now(),
            version: None,
        }
    }

    /// A fresh schema for a node, named after it.
    pub fn rebuilt(node_id: &str, fields: Vec<FieldDefinition>) -> Self {
        Self::new(node_id, format!("{}_schema", node_id), fields)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
