use super::definition::DagDefinition;
use crate::error::DagConversionError;

/// A trait for custom data models that can be converted into a keifu
/// [`DagDefinition`].
///
/// This is the primary extension point for making keifu format-agnostic.
/// Parse your own pipeline format (JSON, YAML, a designer export, ...)
/// into your own structs, then implement `IntoDag` to translate them into
/// the canonical graph model the propagation engine understands.
///
/// # Example
///
/// ```rust,no_run
/// use keifu::error::DagConversionError;
/// use keifu::graph::{DagDefinition, IntoDag, Node, NodeKind, ReaderConfig, WriterConfig};
///
/// struct MyStep { id: String, step_type: String }
/// struct MyPipeline { steps: Vec<MyStep> }
///
/// impl IntoDag for MyPipeline {
///     fn into_dag(self) -> Result<DagDefinition, DagConversionError> {
///         let mut nodes = Vec::new();
///         for step in self.steps {
///             let kind = match step.step_type.as_str() {
///                 "source" => NodeKind::FileReader(ReaderConfig::default()),
///                 "sink" => NodeKind::FileWriter(WriterConfig::default()),
///                 other => {
///                     return Err(DagConversionError::Invalid(format!(
///                         "unknown step type '{}'",
///                         other
///                     )));
///                 }
///             };
///             nodes.push(Node::new(step.id, kind));
///         }
///         Ok(DagDefinition::new(nodes, vec![]))
///     }
/// }
/// ```
pub trait IntoDag {
    /// Consumes the object and converts it into a keifu-compatible graph.
    fn into_dag(self) -> Result<DagDefinition, DagConversionError>;
}
