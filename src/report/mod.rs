use crate::graph::DagDefinition;
use serde::{Deserialize, Serialize};

pub mod formatter;

pub use formatter::ReportFormatter;

/// One row of the lineage audit trail: a field arriving at a terminal node,
/// traced back to its point of origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageRecord {
    pub destination_node: String,
    pub target_field: String,
    pub source_node: Option<String>,
    pub source_field: Option<String>,
    /// Ordered transformation steps the field passed through.
    pub history: Vec<String>,
}

/// Flat audit trail over every field reaching a leaf node.
///
/// Record order follows leaf-node iteration order, then field order within
/// each leaf's schema. No sorting or deduplication is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineageReport {
    pub records: Vec<LineageRecord>,
}

impl LineageReport {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Walks backward from the leaf nodes (no outgoing edges of any kind) and
/// emits one record per leaf field. Expects a freshly propagated graph;
/// the [`Propagator::report`](crate::engine::Propagator::report) entry
/// point takes care of that.
pub(crate) fn build_report(dag: &DagDefinition) -> LineageReport {
    let mut records = Vec::new();
    for leaf in dag.leaf_nodes() {
        let Some(schema) = &leaf.schema else {
            continue;
        };
        for field in &schema.fields {
            let lineage = field.lineage.as_ref();
            records.push(LineageRecord {
                destination_node: leaf.id.clone(),
                target_field: field.name.clone(),
                source_node: lineage.and_then(|l| l.source_node_id.clone()),
                source_field: lineage.and_then(|l| l.source_path.clone()),
                history: lineage.map(|l| l.flow_trace.clone()).unwrap_or_default(),
            });
        }
    }
    LineageReport { records }
}
