// src/config/validate.rs

use tracing::debug;

use crate::config::model::ManifestFile;
use crate::dag::Graph;
use crate::errors::{LayerdagError, Result};

/// Validate a loaded manifest and build its graph.
///
/// This checks:
/// - there is at least one `[node.<name>]` section
/// - no node name or `after` entry is empty
/// - all `after` entries refer to declared nodes, unless
///   `[graph].allow_undeclared` is set
/// - no node depends on itself and the graph has no cycles (reported by the
///   graph as `InvalidEdge` / `CycleDetected`)
///
/// Nodes and edges are inserted in name order, so the first offending edge
/// reported is deterministic.
pub fn validate_manifest(manifest: &ManifestFile) -> Result<Graph<String>> {
    ensure_has_nodes(manifest)?;
    validate_node_references(manifest)?;
    build_graph(manifest)
}

fn ensure_has_nodes(manifest: &ManifestFile) -> Result<()> {
    if manifest.node.is_empty() {
        return Err(LayerdagError::ConfigError(
            "manifest must contain at least one [node.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_node_references(manifest: &ManifestFile) -> Result<()> {
    for (name, node) in manifest.node.iter() {
        if name.trim().is_empty() {
            return Err(LayerdagError::ConfigError(
                "node names must not be empty".to_string(),
            ));
        }

        for dep in node.after.iter() {
            if dep.trim().is_empty() {
                return Err(LayerdagError::ConfigError(format!(
                    "node '{name}' has an empty entry in `after`"
                )));
            }
            if !manifest.graph.allow_undeclared && !manifest.node.contains_key(dep) {
                return Err(LayerdagError::ConfigError(format!(
                    "node '{name}' has unknown dependency '{dep}' in `after`"
                )));
            }
        }
    }
    Ok(())
}

fn build_graph(manifest: &ManifestFile) -> Result<Graph<String>> {
    let mut graph = Graph::new();

    for (name, node) in manifest.node.iter() {
        graph.add_node(name.clone());
        for dep in node.after.iter() {
            graph.depend_on(name.clone(), dep.clone())?;
        }
    }

    debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "built graph from manifest"
    );

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::NodeConfig;
    use crate::dag::DagError;

    fn node(after: &[&str]) -> NodeConfig {
        NodeConfig {
            after: after.iter().map(|s| s.to_string()).collect(),
            description: None,
        }
    }

    fn manifest(nodes: Vec<(&str, Vec<&str>)>) -> ManifestFile {
        let mut m = ManifestFile::default();
        for (name, after) in nodes {
            m.node.insert(name.to_string(), node(&after));
        }
        m
    }

    #[test]
    fn empty_manifest_is_rejected() {
        let err = validate_manifest(&ManifestFile::default()).unwrap_err();
        assert!(matches!(err, LayerdagError::ConfigError(msg) if msg.contains("at least one")));
    }

    #[test]
    fn unknown_dependency_is_config_error() {
        let m = manifest(vec![("a", vec!["missing"])]);
        match validate_manifest(&m) {
            Err(LayerdagError::ConfigError(msg)) => {
                assert!(msg.contains("unknown dependency"));
                assert!(msg.contains("missing"));
            }
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn undeclared_dependencies_allowed_when_opted_in() {
        let mut m = manifest(vec![("a", vec!["missing"])]);
        m.graph.allow_undeclared = true;
        let g = validate_manifest(&m).unwrap();
        assert!(g.contains(&"missing".to_string()));
        assert!(g.depends_on(&"a".to_string(), &"missing".to_string()));
    }

    #[test]
    fn self_dependency_surfaces_invalid_edge() {
        let m = manifest(vec![("a", vec!["a"])]);
        let err = validate_manifest(&m).unwrap_err();
        assert!(matches!(
            err,
            LayerdagError::Dag(DagError::InvalidEdge(ref n)) if n == "a"
        ));
    }

    #[test]
    fn cycle_surfaces_cycle_detected() {
        let m = manifest(vec![("a", vec!["b"]), ("b", vec!["c"]), ("c", vec!["a"])]);
        let err = validate_manifest(&m).unwrap_err();
        assert!(matches!(err, LayerdagError::Dag(DagError::CycleDetected { .. })));
        assert!(err.to_string().contains("cycle detected"));
    }

    #[test]
    fn isolated_nodes_are_kept() {
        let m = manifest(vec![("a", vec![]), ("b", vec!["c"]), ("c", vec![])]);
        let g = validate_manifest(&m).unwrap();
        assert_eq!(g.len(), 3);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.topo_sorted_layers().len(), 2);
    }
}
