//! # Keifu - Schema Propagation and Field-Lineage Engine
//!
//! **Keifu** models an ETL pipeline as a directed acyclic graph of typed
//! processing nodes and computes, for every node and every port, the shape
//! of data flowing through it. Shapes nobody declared are *inferred* from
//! downstream usage, and every inferred or transformed field carries a
//! lineage trail back to its point of origin.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic. It operates on a canonical internal model
//! of a pipeline, the `DagDefinition`. The primary workflow is:
//!
//! 1.  **Load Your Data**: Parse your custom pipeline format (JSON, YAML, a
//!     designer export, ...) into your own Rust structs.
//! 2.  **Convert to Keifu's Model**: Implement the `IntoDag` trait for your
//!     structs to provide a translation layer into `DagDefinition`.
//! 3.  **Propagate**: Hand the definition to a `Propagator`. A reverse
//!     inference pass back-fills reader schemas from downstream mapper
//!     usage, then a breadth-first forward pass computes and stores a
//!     schema on every node and port.
//! 4.  **Report**: Ask for a `LineageReport` to get a flat audit trail
//!     mapping each terminal field to its origin and the ordered history of
//!     transformations it passed through.
//!
//! The engine performs no I/O, assumes the caller guarantees acyclicity,
//! and reasons about shapes only, never values.
//!
//! ## Quick Start
//!
//! ```rust
//! use keifu::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // A reader with no declared schema, feeding a mapper, feeding a writer.
//!     let reader = Node::new("src", NodeKind::FileReader(ReaderConfig::default()));
//!     let mapper = Node::new(
//!         "map",
//!         NodeKind::Mapper(MapperConfig {
//!             mappings: vec![
//!                 FieldMapping::direct("id", "id"),
//!                 FieldMapping::direct("name", "profile.full_name"),
//!             ],
//!         }),
//!     )
//!     .with_depends_on(["src"]);
//!     let writer = Node::new("sink", NodeKind::FileWriter(WriterConfig::default()))
//!         .with_depends_on(["map"]);
//!
//!     let dag = DagDefinition::new(
//!         vec![reader, mapper, writer],
//!         vec![Edge::new("e1", "src", "map"), Edge::new("e2", "map", "sink")],
//!     );
//!
//!     let (dag, report) = Propagator::new(dag).report()?;
//!
//!     // The reader's schema was inferred from the mapper's mappings.
//!     let src = dag.node("src").unwrap();
//!     assert_eq!(src.schema.as_ref().unwrap().fields.len(), 2);
//!
//!     // Two fields reach the sink; print where they came from.
//!     println!("{}", ReportFormatter::format_report(&report));
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod field;
pub mod graph;
pub mod prelude;
pub mod report;
