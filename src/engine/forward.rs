use super::state::SchemaState;
use crate::field::{
    FieldDefinition, FieldLineage, FieldType, Schema, find_field_by_path, last_segment,
};
use crate::graph::{DagDefinition, Edge, MapperConfig, Node, NodeKind};
use ahash::AHashMap;
use itertools::Itertools;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    Queued,
    Processed,
}

/// Breadth-first forward propagation.
///
/// Seeds every source node, then pushes computed output schemas across
/// outgoing edges until the queue drains. The traversal accumulates into a
/// [`SchemaState`] overlay and writes back onto the graph at the end.
///
/// A node with multiple inbound edges keeps the input schema of whichever
/// edge was processed last in traversal order. Last-writer-wins for
/// multi-input convergence is a documented trade-off of this engine, not
/// an accident.
pub(crate) fn propagate_schemas(dag: &mut DagDefinition) {
    let state = traverse(dag);
    state.apply(dag);
}

fn traverse(dag: &DagDefinition) -> SchemaState {
    let mut state = SchemaState::default();
    let mut status: AHashMap<&str, Visit> = dag
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), Visit::Unvisited))
        .collect();
    let mut queue: VecDeque<&Node> = VecDeque::new();

    // Sources: no declared dependencies, reader-family, or trigger nodes.
    // The conditions overlap; a node is enqueued once.
    for node in &dag.nodes {
        let is_source =
            node.depends_on.is_empty() || node.kind.is_reader() || node.kind.is_trigger();
        if is_source && status[node.id.as_str()] == Visit::Unvisited {
            status.insert(node.id.as_str(), Visit::Queued);
            queue.push_back(node);
        }
    }

    while let Some(node) = queue.pop_front() {
        let output = compute_output_schema(node, &state);
        status.insert(node.id.as_str(), Visit::Processed);

        for edge in dag.outgoing_edges(&node.id) {
            let transformed = apply_edge_transformation(edge, &output);
            state.set_input_schema(&edge.target_node_id, transformed);

            let target_status = status
                .get(edge.target_node_id.as_str())
                .copied()
                .unwrap_or(Visit::Unvisited);
            if target_status == Visit::Unvisited {
                if let Some(target) = dag.node(&edge.target_node_id) {
                    status.insert(target.id.as_str(), Visit::Queued);
                    queue.push_back(target);
                }
            }
        }

        state.set_node_schema(&node.id, output);
    }

    state
}

/// Computes a node's output schema from its input schema plus its
/// kind-specific transformation rule.
fn compute_output_schema(node: &Node, state: &SchemaState) -> Schema {
    let input = state
        .input_schema(&node.id)
        .or_else(|| node.first_input_schema());

    let fields = match input {
        // Reader-like / first-visited: no input arrived, fall back to
        // whatever shape is already known for this node.
        None => seed_fields(node),
        Some(input) => match &node.kind {
            NodeKind::Mapper(config) if !config.mappings.is_empty() => {
                mapped_fields(config, input, node)
            }
            _ => pass_through_fields(input, node),
        },
    };

    Schema::rebuilt(&node.id, fields)
}

/// Field source priority for nodes without an input schema: the node-level
/// schema (explicit or reverse-inferred), then the first output port's
/// existing schema, then nothing.
fn seed_fields(node: &Node) -> Vec<FieldDefinition> {
    if let Some(schema) = &node.schema {
        if !schema.fields.is_empty() {
            return schema.fields.clone();
        }
    }
    if let Some(schema) = node.first_output_schema() {
        return schema.fields.clone();
    }
    Vec::new()
}

/// Default transformation: a deep copy of every input field with a trace
/// entry recording the hop. Filters never alter structure but leave an
/// extra mark.
fn pass_through_fields(input: &Schema, node: &Node) -> Vec<FieldDefinition> {
    input
        .fields
        .iter()
        .map(|field| {
            let mut copy = field.clone();
            copy.add_trace(format!(
                "Processed by node: {} ({})",
                node.id,
                node.kind.type_name()
            ));
            if matches!(node.kind, NodeKind::Filter) {
                copy.add_trace("Passed through Filter");
            }
            copy
        })
        .collect()
}

/// Mapper transformation: one output field per mapping entry, named from
/// the last segment of the target path.
fn mapped_fields(config: &MapperConfig, input: &Schema, node: &Node) -> Vec<FieldDefinition> {
    let mut fields = Vec::with_capacity(config.mappings.len());
    for mapping in &config.mappings {
        let source = find_field_by_path(&input.fields, &mapping.source_path);
        let target_path = mapping
            .target_path
            .as_deref()
            .unwrap_or(&mapping.source_path);
        let target_name = last_segment(target_path);

        let mut field = match source {
            Some(source_field) => {
                let mut copy = FieldDefinition::new(target_name, source_field.field_type);
                copy.properties = source_field.properties.clone();
                copy.lineage = Some(
                    source_field
                        .lineage
                        .clone()
                        .unwrap_or_else(|| FieldLineage::from_path(source_field.name.clone())),
                );
                copy
            }
            // Virtual/expression field: no upstream counterpart, so the
            // mapper itself becomes the point of origin.
            None => FieldDefinition::new(target_name, FieldType::String).with_lineage(
                FieldLineage::from_source(node.id.clone(), mapping.source_path.clone()),
            ),
        };

        if !mapping.transforms.is_empty() {
            field.add_trace(format!(
                "Transforms: {}",
                mapping.transforms.iter().join(", ")
            ));
        }
        field.add_trace(format!("Mapped to {} in {}", target_path, node.name));
        fields.push(field);
    }
    fields
}

/// Applies an edge's field mappings while the schema crosses it. Without a
/// transformation the field list passes through under a fresh schema
/// wrapper carrying the target node id. Mappings whose source path does
/// not resolve emit nothing: intentional filtering, not an error.
fn apply_edge_transformation(edge: &Edge, upstream: &Schema) -> Schema {
    let mappings = edge
        .transformation
        .as_ref()
        .map(|t| t.mappings.as_slice())
        .unwrap_or(&[]);

    if mappings.is_empty() {
        return Schema::rebuilt(&edge.target_node_id, upstream.fields.clone());
    }

    let mut fields = Vec::with_capacity(mappings.len());
    for mapping in mappings {
        let Some(source_field) = find_field_by_path(&upstream.fields, &mapping.source_path)
        else {
            continue;
        };
        let mut field = source_field.clone();
        if let Some(target_path) = &mapping.target_path {
            field.name = last_segment(target_path).to_string();
        }
        field.add_trace(format!("Mapped via edge: {}", edge.id));
        fields.push(field);
    }
    Schema::rebuilt(&edge.target_node_id, fields)
}
