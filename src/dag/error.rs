// src/dag/error.rs

//! Errors reported by [`Graph`](crate::dag::Graph) operations.

use thiserror::Error;

/// Structural errors raised by the DAG engine.
///
/// None of these leave the graph in a partially-updated state; the graph
/// stays usable after any of them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DagError<N> {
    /// A node was declared to depend on itself.
    #[error("invalid edge: node {0:?} cannot depend on itself")]
    InvalidEdge(N),

    /// The edge `child -> parent` would close a cycle, because `parent`
    /// already (transitively) depends on `child`.
    #[error("cycle detected: {parent:?} already depends on {child:?}")]
    CycleDetected { child: N, parent: N },

    /// The node was never declared to the graph.
    #[error("node not found: {0:?}")]
    NotFound(N),
}
