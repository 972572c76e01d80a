// src/dag/mod.rs

//! DAG representation, querying and layering.
//!
//! - [`graph`] holds the dependency graph itself: edge declaration with
//!   cycle rejection, transitive queries, removal and layered sorting.
//! - [`error`] defines the structural errors the graph reports.
//! - [`export`] renders a graph for tools outside this crate (Graphviz,
//!   content fingerprints).

pub mod error;
pub mod export;
pub mod graph;

pub use error::DagError;
pub use export::{fingerprint, render_dot, to_digraph};
pub use graph::Graph;
