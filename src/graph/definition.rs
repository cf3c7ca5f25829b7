use super::edge::Edge;
use super::node::Node;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// The complete, canonical definition of a pipeline graph, ready for
/// schema propagation. This is the target structure for any custom data
/// model conversion.
///
/// A definition is constructed once per request, mutated in place during a
/// single synchronous propagation run, and handed back. It is not designed
/// for concurrent mutation; callers must serialize runs per instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DagDefinition {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub metadata: AHashMap<String, serde_json::Value>,
}

impl DagDefinition {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges,
            metadata: AHashMap::new(),
        }
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn node_mut(&mut self, node_id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == node_id)
    }

    /// Outgoing edges of a node, in input order.
    pub fn outgoing_edges(&self, node_id: &str) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.source_node_id == node_id)
    }

    /// A leaf has no outgoing edges of any kind. Control- and error-flow
    /// edges disqualify leaf status just like data-flow edges do.
    pub fn is_leaf(&self, node_id: &str) -> bool {
        self.outgoing_edges(node_id).next().is_none()
    }

    /// Leaf nodes in node-list order.
    pub fn leaf_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| self.is_leaf(&n.id))
    }
}
