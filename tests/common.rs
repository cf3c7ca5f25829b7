//! Common test utilities for building DAG definitions.
use keifu::prelude::*;

#[allow(dead_code)]
pub fn reader(id: &str) -> Node {
    Node::new(id, NodeKind::FileReader(ReaderConfig::default()))
}

/// A reader with an explicitly declared schema.
#[allow(dead_code)]
pub fn declared_reader(id: &str, fields: Vec<FieldDefinition>) -> Node {
    let schema = Schema::rebuilt(id, fields);
    reader(id).with_schema(schema)
}

#[allow(dead_code)]
pub fn writer(id: &str, depends_on: &[&str]) -> Node {
    Node::new(id, NodeKind::FileWriter(WriterConfig::default()))
        .with_depends_on(depends_on.iter().copied())
}

#[allow(dead_code)]
pub fn mapper(id: &str, mappings: Vec<FieldMapping>, depends_on: &[&str]) -> Node {
    Node::new(id, NodeKind::Mapper(MapperConfig { mappings }))
        .with_depends_on(depends_on.iter().copied())
}

#[allow(dead_code)]
pub fn filter(id: &str, depends_on: &[&str]) -> Node {
    Node::new(id, NodeKind::Filter).with_depends_on(depends_on.iter().copied())
}

#[allow(dead_code)]
pub fn string_field(name: &str) -> FieldDefinition {
    FieldDefinition::new(name, FieldType::String)
}

/// The canonical end-to-end scenario:
///
/// `READER(src)` -> `MAPPER(map: id->id, name->profile.full_name)` -> `WRITER(sink)`
///
/// The reader declares no schema; its fields must be inferred from the
/// mapper's mappings.
#[allow(dead_code)]
pub fn create_linear_dag() -> DagDefinition {
    DagDefinition::new(
        vec![
            reader("src"),
            mapper(
                "map",
                vec![
                    FieldMapping::direct("id", "id"),
                    FieldMapping::direct("name", "profile.full_name"),
                ],
                &["src"],
            ),
            writer("sink", &["map"]),
        ],
        vec![Edge::new("e1", "src", "map"), Edge::new("e2", "map", "sink")],
    )
}

/// A reader with a nested `customer.address.zip` tree feeding a mapper
/// that flattens the zip code out.
#[allow(dead_code)]
pub fn create_nested_dag() -> DagDefinition {
    let address = FieldDefinition::with_children(
        "address",
        FieldType::Object,
        vec![FieldDefinition::new("zip", FieldType::Integer)],
    );
    let customer = FieldDefinition::with_children("customer", FieldType::Object, vec![address]);

    DagDefinition::new(
        vec![
            declared_reader("src", vec![customer]),
            mapper(
                "map",
                vec![FieldMapping::direct("customer.address.zip", "zip_code")],
                &["src"],
            ),
            writer("sink", &["map"]),
        ],
        vec![Edge::new("e1", "src", "map"), Edge::new("e2", "map", "sink")],
    )
}
