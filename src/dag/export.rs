// src/dag/export.rs

//! Export helpers for string-keyed graphs.
//!
//! Edge direction for exported graphs is `parent -> child`: an edge points
//! from a node to the nodes that depend on it, so that arrows follow the
//! order in which layers are processed.

use petgraph::dot::{Config, Dot};
use petgraph::graphmap::DiGraphMap;

use crate::dag::Graph;

/// Build a petgraph view of `graph` borrowing its node names.
pub fn to_digraph(graph: &Graph<String>) -> DiGraphMap<&str, ()> {
    let mut digraph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for node in graph.nodes() {
        digraph.add_node(node.as_str());
    }

    for (child, parent) in graph.edges() {
        digraph.add_edge(parent.as_str(), child.as_str(), ());
    }

    digraph
}

/// Render `graph` in Graphviz DOT format.
pub fn render_dot(graph: &Graph<String>) -> String {
    let digraph = to_digraph(graph);
    format!("{:?}", Dot::with_config(&digraph, &[Config::EdgeNoLabel]))
}

/// Content hash of the node and edge sets, independent of insertion order.
///
/// Formatted as `blake3:<hex>`.
pub fn fingerprint(graph: &Graph<String>) -> String {
    let mut nodes: Vec<&str> = graph.nodes().map(String::as_str).collect();
    nodes.sort_unstable();

    let mut edges: Vec<(&str, &str)> = graph
        .edges()
        .map(|(child, parent)| (child.as_str(), parent.as_str()))
        .collect();
    edges.sort_unstable();

    let mut hasher = blake3::Hasher::new();
    for node in nodes {
        hasher.update(node.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for (child, parent) in edges {
        hasher.update(child.as_bytes());
        hasher.update(b"\x00");
        hasher.update(parent.as_bytes());
        hasher.update(b"\x00");
    }

    format!("blake3:{}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::algo::toposort;

    fn chain() -> Graph<String> {
        let mut g = Graph::new();
        g.depend_on("c".to_string(), "b".to_string()).unwrap();
        g.depend_on("b".to_string(), "a".to_string()).unwrap();
        g.add_node("lonely".to_string());
        g
    }

    #[test]
    fn digraph_mirrors_nodes_and_edges() {
        let g = chain();
        let dg = to_digraph(&g);

        assert_eq!(dg.node_count(), 4);
        assert_eq!(dg.edge_count(), 2);
        assert!(dg.contains_edge("a", "b"));
        assert!(dg.contains_edge("b", "c"));

        let order = toposort(&dg, None).expect("exported graph must be acyclic");
        let pos = |n: &str| order.iter().position(|o| *o == n).unwrap();
        assert!(pos("a") < pos("b"));
        assert!(pos("b") < pos("c"));
    }

    #[test]
    fn dot_output_lists_every_node() {
        let dot = render_dot(&chain());
        assert!(dot.starts_with("digraph"));
        for name in ["a", "b", "c", "lonely"] {
            assert!(dot.contains(name), "missing {name} in:\n{dot}");
        }
        assert_eq!(dot.matches("->").count(), 2);
    }

    #[test]
    fn fingerprint_ignores_insertion_order() {
        let mut other = Graph::new();
        other.add_node("lonely".to_string());
        other.depend_on("b".to_string(), "a".to_string()).unwrap();
        other.depend_on("c".to_string(), "b".to_string()).unwrap();

        let fp = fingerprint(&chain());
        assert!(fp.starts_with("blake3:"));
        assert_eq!(fp, fingerprint(&other));
    }

    #[test]
    fn fingerprint_changes_with_edges() {
        let g = chain();
        let mut h = g.clone();
        h.depend_on("c".to_string(), "a".to_string()).unwrap();
        assert_ne!(fingerprint(&g), fingerprint(&h));

        let mut isolated = Graph::new();
        isolated.add_node("a".to_string());
        isolated.add_node("b".to_string());
        let mut linked = Graph::new();
        linked.depend_on("b".to_string(), "a".to_string()).unwrap();
        assert_ne!(fingerprint(&isolated), fingerprint(&linked));
    }
}
