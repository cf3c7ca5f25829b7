use super::lineage::FieldLineage;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of data types a field can carry.
///
/// When a type cannot be determined (inferred fields, unresolved mappings),
/// the engine falls back to [`FieldType::String`] rather than failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    String,
    Integer,
    Long,
    Double,
    Decimal,
    Boolean,
    Date,
    Timestamp,
    Object,
    Array,
    Binary,
    Any,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Long => "long",
            FieldType::Double => "double",
            FieldType::Decimal => "decimal",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Timestamp => "timestamp",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Binary => "binary",
            FieldType::Any => "any",
        };
        write!(f, "{}", name)
    }
}

/// A single field in a schema: a name, a type, optional nested children
/// (for `object`/`array` types) and an optional lineage record.
///
/// The children form an exclusively-owned recursive tree. A field is never
/// aliased between two schemas; every propagation step deep-copies via
/// `Clone` so that appending trace entries downstream cannot retroactively
/// alter an upstream node's recorded schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub children: Vec<FieldDefinition>,
    #[serde(default)]
    pub lineage: Option<FieldLineage>,
    /// Open metadata map (nullability, DDL precision, ...). Carried along
    /// verbatim, never interpreted by the engine.
    #[serde(default)]
    pub properties: AHashMap<String, serde_json::Value>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            ..Default::default()
        }
    }

    /// A field with nested children (the type should be `Object` or `Array`).
    pub fn with_children(
        name: impl Into<String>,
        field_type: FieldType,
        children: Vec<FieldDefinition>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            children,
            ..Default::default()
        }
    }

    pub fn with_lineage(mut self, lineage: FieldLineage) -> Self {
        self.lineage = Some(lineage);
        self
    }

    /// Appends one step to this field's flow trace, creating an empty
    /// lineage record first when the field has none yet.
    pub fn add_trace(&mut self, entry: impl Into<String>) {
        self.lineage
            .get_or_insert_with(FieldLineage::default)
            .add_trace(entry);
    }
}
