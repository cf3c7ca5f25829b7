//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the keifu crate. Import
//! this module to get access to the core functionality without having to
//! import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use keifu::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let dag_json = std::fs::read_to_string("path/to/dag.json")?;
//! let dag: DagDefinition = serde_json::from_str(&dag_json)?;
//!
//! let (dag, report) = Propagator::new(dag).report()?;
//! println!("{}", ReportFormatter::format_report(&report));
//! # Ok(())
//! # }
//! ```

// Propagation engine
pub use crate::engine::{Propagator, PropagatorBuilder};

// Graph model
pub use crate::graph::{
    BackpressureMode, DagDefinition, Edge, EdgeKind, EdgeTransformation, FieldMapping,
    FlowControl, IntoDag, MapperConfig, MappingKind, Node, NodeKind, Port, ReaderConfig,
    TransformationKind, WriterConfig,
};

// Field tree model
pub use crate::field::{FieldDefinition, FieldLineage, FieldType, Schema, find_field_by_path};

// Lineage reporting
pub use crate::report::{LineageRecord, LineageReport, ReportFormatter};

// Error types
pub use crate::error::{DagConversionError, PropagationError};

// Standard library re-exports commonly used with this crate
pub use std::collections::HashMap;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
