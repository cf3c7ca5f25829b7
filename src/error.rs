use thiserror::Error;

/// Errors that can fail a whole propagation run.
///
/// The engine degrades gracefully almost everywhere (missing fields,
/// unresolved paths, absent ports all fall back to defaults); only
/// structural corruption the caller is responsible for preventing
/// surfaces here.
#[derive(Error, Debug, Clone)]
pub enum PropagationError {
    #[error("Edge '{edge_id}' references node '{node_id}', which does not exist in the DAG")]
    UnknownNodeReference { edge_id: String, node_id: String },
}

/// Errors that can occur when converting a custom user format into a keifu
/// `DagDefinition`.
#[derive(Error, Debug, Clone)]
pub enum DagConversionError {
    #[error("Invalid DAG data: {0}")]
    Invalid(String),
}
