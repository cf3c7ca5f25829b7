use crate::field::{FieldDefinition, FieldLineage, FieldType, Schema};
use crate::graph::{DagDefinition, NodeKind};

/// The reverse "look-ahead" pass.
///
/// Mapper nodes spell out which source fields they consume. When the
/// upstream reader never declared a schema, those consumptions are the only
/// evidence of what should be flowing, so this pass back-fills a plausible
/// field definition onto the reader for every simple (non-dotted,
/// non-expression) source path of every downstream mapper.
///
/// Inferred fields default to the string type and carry a lineage trail
/// naming the mapper that justified them. Existing fields are never
/// overwritten; when two mappers infer the same field name onto the same
/// reader, the first edge in input order wins.
pub(crate) fn infer_upstream_schemas(dag: &mut DagDefinition) {
    // Collect the inferences first; the node list cannot be borrowed
    // mutably while edges are being walked.
    let mut planned: Vec<(String, String, String)> = Vec::new();
    for edge in &dag.edges {
        let Some(target) = dag.node(&edge.target_node_id) else {
            continue;
        };
        let NodeKind::Mapper(config) = &target.kind else {
            continue;
        };
        if config.mappings.is_empty() {
            continue;
        }
        let Some(source) = dag.node(&edge.source_node_id) else {
            continue;
        };
        if !source.kind.is_reader() {
            continue;
        }
        for mapping in &config.mappings {
            if mapping.has_simple_source() {
                planned.push((
                    source.id.clone(),
                    mapping.source_path.clone(),
                    target.id.clone(),
                ));
            }
        }
    }

    for (reader_id, field_name, mapper_id) in planned {
        let Some(reader) = dag.node_mut(&reader_id) else {
            continue;
        };
        let schema = reader
            .schema
            .get_or_insert_with(|| Schema::rebuilt(&reader_id, Vec::new()));
        // First writer wins.
        if schema.fields.iter().any(|f| f.name == field_name) {
            continue;
        }
        let mut lineage = FieldLineage::from_source(reader_id.clone(), field_name.clone());
        lineage.add_trace("Inferred via Reverse Mapping Analysis");
        lineage.add_trace(format!("Inferred from downstream Mapper: {}", mapper_id));
        schema
            .fields
            .push(FieldDefinition::new(field_name, FieldType::String).with_lineage(lineage));
    }
}
