use crate::field::Schema;
use crate::graph::{DEFAULT_INPUT_PORT, DEFAULT_OUTPUT_PORT, DagDefinition, Port};
use ahash::AHashMap;

/// Schemas computed during one traversal, keyed by node id.
///
/// The forward pass accumulates into this overlay instead of mutating the
/// graph mid-walk, then writes everything back in one step. Keeps the
/// traversal itself free of hidden side effects and testable in isolation.
#[derive(Debug, Default)]
pub(crate) struct SchemaState {
    /// Computed output schema per node.
    node_schemas: AHashMap<String, Schema>,
    /// Latest schema pushed onto a node's input ports. Nodes with multiple
    /// inbound edges keep whichever arrived last in traversal order.
    input_schemas: AHashMap<String, Schema>,
}

impl SchemaState {
    pub(crate) fn set_node_schema(&mut self, node_id: &str, schema: Schema) {
        self.node_schemas.insert(node_id.to_string(), schema);
    }

    pub(crate) fn set_input_schema(&mut self, node_id: &str, schema: Schema) {
        self.input_schemas.insert(node_id.to_string(), schema);
    }

    pub(crate) fn input_schema(&self, node_id: &str) -> Option<&Schema> {
        self.input_schemas.get(node_id)
    }

    /// Writes every computed schema back onto the graph: node-level
    /// schemas, every output port (synthesizing a default one for nodes
    /// that declared none), and every input port likewise.
    pub(crate) fn apply(self, dag: &mut DagDefinition) {
        for node in &mut dag.nodes {
            if let Some(schema) = self.node_schemas.get(&node.id) {
                node.schema = Some(schema.clone());
                if node.output_ports.is_empty() {
                    node.output_ports.push(Port::new(DEFAULT_OUTPUT_PORT));
                }
                for port in &mut node.output_ports {
                    port.schema = Some(schema.clone());
                }
            }
            if let Some(schema) = self.input_schemas.get(&node.id) {
                if node.input_ports.is_empty() {
                    node.input_ports.push(Port::new(DEFAULT_INPUT_PORT));
                }
                for port in &mut node.input_ports {
                    port.schema = Some(schema.clone());
                }
            }
        }
    }
}
