//! Integration tests for keifu
//!
//! End-to-end scenarios covering reverse inference, forward propagation,
//! edge transformations and lineage reporting.
mod common;
use common::*;
use keifu::error::PropagationError;
use keifu::prelude::*;

/// Extracts the field names of a node's schema, in order.
fn field_names(dag: &DagDefinition, node_id: &str) -> Vec<String> {
    dag.node(node_id)
        .and_then(|n| n.schema.as_ref())
        .map(|s| s.fields.iter().map(|f| f.name.clone()).collect())
        .unwrap_or_default()
}

#[test]
fn test_reader_mapper_writer_scenario() {
    let dag = create_linear_dag();
    let (dag, report) = Propagator::new(dag).report().expect("propagation failed");

    // The reader gained inferred fields `id` and `name`, both strings.
    let src = dag.node("src").expect("src exists");
    let src_schema = src.schema.as_ref().expect("src schema inferred");
    assert_eq!(field_names(&dag, "src"), vec!["id", "name"]);
    for field in &src_schema.fields {
        assert_eq!(field.field_type, FieldType::String);
        let lineage = field.lineage.as_ref().expect("inferred field has lineage");
        assert_eq!(
            lineage.flow_trace[0],
            "Inferred via Reverse Mapping Analysis"
        );
        assert_eq!(
            lineage.flow_trace[1],
            "Inferred from downstream Mapper: map"
        );
    }

    // The mapper renamed `name` to the last target path segment.
    assert_eq!(field_names(&dag, "map"), vec!["id", "full_name"]);

    // The writer's input schema equals the mapper's output schema.
    let map_fields = &dag.node("map").unwrap().schema.as_ref().unwrap().fields;
    let sink_input = dag
        .node("sink")
        .unwrap()
        .first_input_schema()
        .expect("sink input populated");
    assert_eq!(&sink_input.fields, map_fields);

    // Two lineage records, tracing back to the inferred reader fields.
    assert_eq!(report.len(), 2);
    assert_eq!(report.records[0].destination_node, "sink");
    assert_eq!(report.records[0].source_node.as_deref(), Some("src"));
    assert_eq!(report.records[0].source_field.as_deref(), Some("id"));
    assert_eq!(report.records[1].target_field, "full_name");
    assert_eq!(report.records[1].source_field.as_deref(), Some("name"));
}

#[test]
fn test_propagation_is_idempotent() {
    let dag = create_linear_dag();
    let first = Propagator::new(dag).propagate().expect("first run");
    let second = Propagator::new(first.clone())
        .propagate()
        .expect("second run");

    for (a, b) in first.nodes.iter().zip(&second.nodes) {
        assert_eq!(a.id, b.id);
        let fields_a = a.schema.as_ref().map(|s| &s.fields);
        let fields_b = b.schema.as_ref().map(|s| &s.fields);
        assert_eq!(fields_a, fields_b, "node schema drifted on node {}", a.id);

        for (pa, pb) in a.input_ports.iter().zip(&b.input_ports) {
            let port_a = pa.schema.as_ref().map(|s| &s.fields);
            let port_b = pb.schema.as_ref().map(|s| &s.fields);
            assert_eq!(port_a, port_b, "input port drifted on node {}", a.id);
        }
        for (pa, pb) in a.output_ports.iter().zip(&b.output_ports) {
            let port_a = pa.schema.as_ref().map(|s| &s.fields);
            let port_b = pb.schema.as_ref().map(|s| &s.fields);
            assert_eq!(port_a, port_b, "output port drifted on node {}", a.id);
        }
    }
}

#[test]
fn test_reverse_inference_monotonicity() {
    let dag = create_linear_dag();
    let dag = Propagator::new(dag).propagate().expect("propagation");

    // Every simple source path of the mapper now exists on the reader.
    let names = field_names(&dag, "src");
    assert!(names.contains(&"id".to_string()));
    assert!(names.contains(&"name".to_string()));
}

#[test]
fn test_reverse_inference_first_writer_wins() {
    // Two mappers inferring the same field name onto the same reader: the
    // first edge in input order attributes the trace.
    let dag = DagDefinition::new(
        vec![
            reader("src"),
            mapper(
                "map_a",
                vec![FieldMapping::direct("id", "id_a")],
                &["src"],
            ),
            mapper(
                "map_b",
                vec![FieldMapping::direct("id", "id_b")],
                &["src"],
            ),
        ],
        vec![
            Edge::new("e1", "src", "map_a"),
            Edge::new("e2", "src", "map_b"),
        ],
    );
    let dag = Propagator::new(dag).propagate().expect("propagation");

    let src = dag.node("src").unwrap();
    let schema = src.schema.as_ref().unwrap();
    let id_fields: Vec<_> = schema.fields.iter().filter(|f| f.name == "id").collect();
    assert_eq!(id_fields.len(), 1, "field inferred exactly once");
    let lineage = id_fields[0].lineage.as_ref().unwrap();
    assert!(
        lineage
            .flow_trace
            .contains(&"Inferred from downstream Mapper: map_a".to_string())
    );
}

#[test]
fn test_reverse_inference_skips_dotted_and_expression_paths() {
    let dag = DagDefinition::new(
        vec![
            reader("src"),
            mapper(
                "map",
                vec![
                    FieldMapping::direct("plain", "plain"),
                    FieldMapping::direct("customer.name", "name"),
                    FieldMapping::direct("(expression)", "total"),
                ],
                &["src"],
            ),
        ],
        vec![Edge::new("e1", "src", "map")],
    );
    let dag = Propagator::new(dag).propagate().expect("propagation");

    assert_eq!(field_names(&dag, "src"), vec!["plain"]);
}

#[test]
fn test_lineage_trail_grows_through_default_nodes() {
    let dag = DagDefinition::new(
        vec![
            declared_reader("src", vec![string_field("x")]),
            filter("f1", &["src"]),
            filter("f2", &["f1"]),
            writer("sink", &["f2"]),
        ],
        vec![
            Edge::new("e1", "src", "f1"),
            Edge::new("e2", "f1", "f2"),
            Edge::new("e3", "f2", "sink"),
        ],
    );
    let dag = Propagator::new(dag).propagate().expect("propagation");

    let sink = dag.node("sink").unwrap();
    let field = &sink.schema.as_ref().unwrap().fields[0];
    let trace = &field.lineage.as_ref().unwrap().flow_trace;

    // Three default-transform hops leave at least three entries, in order.
    assert!(trace.len() >= 3, "trace too short: {:?}", trace);
    let f1_pos = trace
        .iter()
        .position(|t| t == "Processed by node: f1 (FILTER)")
        .expect("f1 trace present");
    let f2_pos = trace
        .iter()
        .position(|t| t == "Processed by node: f2 (FILTER)")
        .expect("f2 trace present");
    let sink_pos = trace
        .iter()
        .position(|t| t == "Processed by node: sink (FILE_WRITER)")
        .expect("sink trace present");
    assert!(f1_pos < f2_pos && f2_pos < sink_pos);
    assert!(trace.contains(&"Passed through Filter".to_string()));
}

#[test]
fn test_mapper_renames_to_last_target_segment() {
    let dag = DagDefinition::new(
        vec![
            declared_reader("src", vec![string_field("first_name")]),
            mapper(
                "map",
                vec![FieldMapping::direct("first_name", "profile.full_name")],
                &["src"],
            ),
        ],
        vec![Edge::new("e1", "src", "map")],
    );
    let dag = Propagator::new(dag).propagate().expect("propagation");

    let names = field_names(&dag, "map");
    assert_eq!(names, vec!["full_name"]);
    let field = &dag.node("map").unwrap().schema.as_ref().unwrap().fields[0];
    assert!(
        field
            .lineage
            .as_ref()
            .unwrap()
            .flow_trace
            .contains(&"Mapped to profile.full_name in map".to_string())
    );
}

#[test]
fn test_mapper_resolves_nested_source_paths() {
    let dag = create_nested_dag();
    let dag = Propagator::new(dag).propagate().expect("propagation");

    let map = dag.node("map").unwrap();
    let fields = &map.schema.as_ref().unwrap().fields;
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, "zip_code");
    assert_eq!(fields[0].field_type, FieldType::Integer);

    // Dotted paths never trigger reverse inference onto the reader.
    assert_eq!(field_names(&dag, "src"), vec!["customer"]);
}

#[test]
fn test_mapper_virtual_field_defaults_to_string() {
    let dag = DagDefinition::new(
        vec![
            declared_reader("src", vec![string_field("a")]),
            mapper(
                "map",
                vec![FieldMapping {
                    source_path: "(expression)".to_string(),
                    target_path: Some("total".to_string()),
                    kind: MappingKind::Transform,
                    transforms: vec![],
                    expression: Some("a * 2".to_string()),
                }],
                &["src"],
            ),
        ],
        vec![Edge::new("e1", "src", "map")],
    );
    let dag = Propagator::new(dag).propagate().expect("propagation");

    let field = &dag.node("map").unwrap().schema.as_ref().unwrap().fields[0];
    assert_eq!(field.name, "total");
    assert_eq!(field.field_type, FieldType::String);
    let lineage = field.lineage.as_ref().unwrap();
    // The mapper itself is the point of origin for virtual fields.
    assert_eq!(lineage.source_node_id.as_deref(), Some("map"));
    assert_eq!(lineage.source_path.as_deref(), Some("(expression)"));
}

#[test]
fn test_mapper_records_transform_names() {
    let dag = DagDefinition::new(
        vec![
            declared_reader("src", vec![string_field("name")]),
            mapper(
                "map",
                vec![
                    FieldMapping::direct("name", "name")
                        .with_transforms(["TRIM", "TO_UPPER"]),
                ],
                &["src"],
            ),
        ],
        vec![Edge::new("e1", "src", "map")],
    );
    let dag = Propagator::new(dag).propagate().expect("propagation");

    let field = &dag.node("map").unwrap().schema.as_ref().unwrap().fields[0];
    let trace = &field.lineage.as_ref().unwrap().flow_trace;
    assert!(trace.contains(&"Transforms: TRIM, TO_UPPER".to_string()));
}

#[test]
fn test_unresolved_edge_mappings_are_dropped() {
    let dag = DagDefinition::new(
        vec![
            declared_reader("src", vec![string_field("id"), string_field("name")]),
            writer("sink", &["src"]),
        ],
        vec![
            Edge::new("e1", "src", "sink").with_transformation(EdgeTransformation::mapping(
                vec![
                    FieldMapping::direct("id", "id"),
                    FieldMapping::direct("does_not_exist", "x"),
                ],
            )),
        ],
    );
    let dag = Propagator::new(dag).propagate().expect("propagation");

    // Two mappings, one unresolved: exactly one field crosses the edge.
    let sink_input = dag.node("sink").unwrap().first_input_schema().unwrap();
    assert_eq!(sink_input.fields.len(), 1);
    assert_eq!(sink_input.fields[0].name, "id");
    assert!(
        sink_input.fields[0]
            .lineage
            .as_ref()
            .unwrap()
            .flow_trace
            .contains(&"Mapped via edge: e1".to_string())
    );
}

#[test]
fn test_edge_transformation_renames_fields() {
    let dag = DagDefinition::new(
        vec![
            declared_reader("src", vec![string_field("raw_value")]),
            writer("sink", &["src"]),
        ],
        vec![
            Edge::new("e1", "src", "sink").with_transformation(EdgeTransformation::mapping(
                vec![FieldMapping::direct("raw_value", "clean.value")],
            )),
        ],
    );
    let dag = Propagator::new(dag).propagate().expect("propagation");

    let sink_input = dag.node("sink").unwrap().first_input_schema().unwrap();
    assert_eq!(sink_input.fields[0].name, "value");
}

#[test]
fn test_unknown_node_reference_fails_the_run() {
    let mut dag = create_linear_dag();
    dag.edges.push(Edge::new("e9", "map", "ghost"));

    let err = Propagator::new(dag).propagate().unwrap_err();
    match err {
        PropagationError::UnknownNodeReference { edge_id, node_id } => {
            assert_eq!(edge_id, "e9");
            assert_eq!(node_id, "ghost");
        }
    }
}

#[test]
fn test_synthetic_default_ports_are_created() {
    let dag = create_linear_dag();
    let dag = Propagator::new(dag).propagate().expect("propagation");

    let src = dag.node("src").unwrap();
    assert_eq!(src.output_ports.len(), 1);
    assert_eq!(src.output_ports[0].name, "Output Port");
    assert!(src.output_ports[0].schema.is_some());

    let sink = dag.node("sink").unwrap();
    assert_eq!(sink.input_ports.len(), 1);
    assert_eq!(sink.input_ports[0].name, "Input Port");
    assert!(sink.input_ports[0].schema.is_some());
}

#[test]
fn test_multi_input_convergence_is_last_writer_wins() {
    let dag = DagDefinition::new(
        vec![
            declared_reader("r1", vec![string_field("a")]),
            declared_reader("r2", vec![string_field("b")]),
            Node::new("merge", NodeKind::Union).with_depends_on(["r1", "r2"]),
        ],
        vec![
            Edge::new("e1", "r1", "merge"),
            Edge::new("e2", "r2", "merge"),
        ],
    );
    let dag = Propagator::new(dag).propagate().expect("propagation");

    // r2's edge is processed last, so its schema overwrites r1's.
    assert_eq!(field_names(&dag, "merge"), vec!["b"]);
}

#[test]
fn test_reverse_inference_can_be_disabled() {
    let dag = create_linear_dag();
    let dag = Propagator::builder(dag)
        .with_reverse_inference(false)
        .build()
        .propagate()
        .expect("propagation");

    // Nothing declared, nothing inferred: the reader propagates an empty
    // field list and the mapper's fields become virtual.
    assert!(field_names(&dag, "src").is_empty());
    let map_field = &dag.node("map").unwrap().schema.as_ref().unwrap().fields[0];
    assert_eq!(
        map_field.lineage.as_ref().unwrap().source_node_id.as_deref(),
        Some("map")
    );
}

#[test]
fn test_pre_declared_schema_is_not_overwritten_by_inference() {
    let declared = FieldDefinition::new("id", FieldType::Long);
    let dag = DagDefinition::new(
        vec![
            declared_reader("src", vec![declared]),
            mapper(
                "map",
                vec![
                    FieldMapping::direct("id", "id"),
                    FieldMapping::direct("name", "name"),
                ],
                &["src"],
            ),
        ],
        vec![Edge::new("e1", "src", "map")],
    );
    let dag = Propagator::new(dag).propagate().expect("propagation");

    let src = dag.node("src").unwrap();
    let fields = &src.schema.as_ref().unwrap().fields;
    // `id` keeps its declared type; only `name` was inferred.
    assert_eq!(fields[0].name, "id");
    assert_eq!(fields[0].field_type, FieldType::Long);
    assert_eq!(fields[1].name, "name");
    assert_eq!(fields[1].field_type, FieldType::String);

    // The mapper output carries the declared type through.
    let map_fields = &dag.node("map").unwrap().schema.as_ref().unwrap().fields;
    assert_eq!(map_fields[0].field_type, FieldType::Long);
}

#[test]
fn test_trigger_nodes_are_seeded_as_sources() {
    let dag = DagDefinition::new(
        vec![
            Node::new("cron", NodeKind::Trigger).with_depends_on(["external_scheduler"]),
            writer("sink", &["cron"]),
        ],
        vec![Edge::new("e1", "cron", "sink")],
    );
    // `depends_on` is non-empty, but triggers are seeded regardless.
    let dag = Propagator::new(dag).propagate().expect("propagation");
    assert!(dag.node("cron").unwrap().schema.is_some());
    assert!(dag.node("sink").unwrap().schema.is_some());
}

#[test]
fn test_report_covers_only_leaf_nodes() {
    let mut dag = create_linear_dag();
    dag.nodes
        .push(Node::new("audit", NodeKind::Checkpoint).with_depends_on(["sink"]));
    dag.edges
        .push(Edge::new("e3", "sink", "audit").with_kind(EdgeKind::ControlFlow));

    let (_dag, report) = Propagator::new(dag).report().expect("report");

    // The writer has an outgoing control edge, so only the checkpoint is a
    // leaf and every record lands there.
    assert!(!report.is_empty());
    for record in &report.records {
        assert_eq!(record.destination_node, "audit");
    }
}

#[test]
fn test_existing_output_port_schema_seeds_a_sourceless_node() {
    let mut src = reader("src");
    src.output_ports.push(Port {
        name: "Output Port".to_string(),
        schema: Some(Schema::rebuilt("src", vec![string_field("hinted")])),
    });
    let dag = DagDefinition::new(
        vec![src, writer("sink", &["src"])],
        vec![Edge::new("e1", "src", "sink")],
    );
    let dag = Propagator::new(dag).propagate().expect("propagation");

    assert_eq!(field_names(&dag, "src"), vec!["hinted"]);
    assert_eq!(
        dag.node("sink")
            .unwrap()
            .first_input_schema()
            .unwrap()
            .fields[0]
            .name,
        "hinted"
    );
}
