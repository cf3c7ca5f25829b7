use crate::error::PropagationError;
use crate::graph::DagDefinition;
use crate::report::{LineageReport, build_report};

mod forward;
mod inference;
mod state;

/// The schema propagation engine.
///
/// A `Propagator` owns one [`DagDefinition`] for the duration of a single
/// synchronous run: reverse inference back-fills reader schemas, then a
/// breadth-first forward pass computes and stores a schema on every node
/// and port. The mutated definition is handed back to the caller, who is
/// responsible for persisting or rendering it.
///
/// The engine performs no I/O and holds no state between invocations.
pub struct Propagator {
    dag: DagDefinition,
    infer_upstream: bool,
}

/// Configures a [`Propagator`] before a run.
pub struct PropagatorBuilder {
    dag: DagDefinition,
    infer_upstream: bool,
}

impl PropagatorBuilder {
    pub fn new(dag: DagDefinition) -> Self {
        Self {
            dag,
            infer_upstream: true,
        }
    }

    /// Enables or disables the reverse inference pass (enabled by default).
    /// With it disabled, readers without a declared schema propagate an
    /// empty field list.
    pub fn with_reverse_inference(mut self, enabled: bool) -> Self {
        self.infer_upstream = enabled;
        self
    }

    pub fn build(self) -> Propagator {
        Propagator {
            dag: self.dag,
            infer_upstream: self.infer_upstream,
        }
    }
}

impl Propagator {
    /// A propagator with default settings.
    pub fn new(dag: DagDefinition) -> Self {
        Self::builder(dag).build()
    }

    pub fn builder(dag: DagDefinition) -> PropagatorBuilder {
        PropagatorBuilder::new(dag)
    }

    /// Runs reverse inference followed by forward propagation and returns
    /// the mutated definition.
    ///
    /// Repeated runs over the same graph are idempotent: schemas are
    /// rebuilt from scratch on every pass, so flow traces do not grow
    /// across re-runs.
    pub fn propagate(self) -> Result<DagDefinition, PropagationError> {
        let Propagator {
            mut dag,
            infer_upstream,
        } = self;
        validate(&dag)?;
        if infer_upstream {
            inference::infer_upstream_schemas(&mut dag);
        }
        forward::propagate_schemas(&mut dag);
        Ok(dag)
    }

    /// Runs a full propagation (guaranteeing the schemas are fresh) and
    /// derives the lineage report from the leaf nodes.
    pub fn report(self) -> Result<(DagDefinition, LineageReport), PropagationError> {
        let dag = self.propagate()?;
        let report = build_report(&dag);
        Ok((dag, report))
    }
}

/// Structural validation the caller is responsible for upholding: every
/// edge endpoint must exist in the node list. Anything else degrades
/// gracefully instead of failing.
fn validate(dag: &DagDefinition) -> Result<(), PropagationError> {
    for edge in &dag.edges {
        for node_id in [&edge.source_node_id, &edge.target_node_id] {
            if dag.node(node_id).is_none() {
                return Err(PropagationError::UnknownNodeReference {
                    edge_id: edge.id.clone(),
                    node_id: node_id.clone(),
                });
            }
        }
    }
    Ok(())
}
