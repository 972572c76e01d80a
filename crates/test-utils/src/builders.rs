#![allow(dead_code)]

use std::io::Write;

use layerdag::config::{GraphSection, ManifestFile, NodeConfig};
use layerdag::dag::Graph;
use tempfile::NamedTempFile;

/// Edges of the classic recipe example, as `(child, parent)` pairs.
pub const RECIPE_EDGES: &[(&str, &str)] = &[
    ("cake", "eggs"),
    ("cake", "flour"),
    ("eggs", "chickens"),
    ("flour", "grain"),
    ("chickens", "grain"),
    ("grain", "soil"),
    ("grain", "water"),
    ("chickens", "water"),
];

/// Build a string graph from `(child, parent)` pairs, panicking on any
/// rejected edge.
pub fn graph_from_edges(edges: &[(&str, &str)]) -> Graph<String> {
    let mut graph = Graph::new();
    for (child, parent) in edges {
        graph
            .depend_on(child.to_string(), parent.to_string())
            .unwrap_or_else(|e| panic!("edge {child} -> {parent} rejected: {e}"));
    }
    graph
}

/// The recipe graph used throughout the docs and tests.
pub fn recipe_graph() -> Graph<String> {
    graph_from_edges(RECIPE_EDGES)
}

/// Builder for `ManifestFile` to simplify test setup.
pub struct ManifestBuilder {
    manifest: ManifestFile,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self {
            manifest: ManifestFile {
                graph: GraphSection::default(),
                node: Default::default(),
            },
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.manifest.graph.name = Some(name.to_string());
        self
    }

    pub fn allow_undeclared(mut self, val: bool) -> Self {
        self.manifest.graph.allow_undeclared = val;
        self
    }

    pub fn with_node(mut self, name: &str, node: NodeConfig) -> Self {
        self.manifest.node.insert(name.to_string(), node);
        self
    }

    pub fn build(self) -> ManifestFile {
        self.manifest
    }

    /// Render the manifest back to TOML.
    pub fn to_toml(&self) -> String {
        let mut out = String::new();
        if self.manifest.graph.name.is_some() || self.manifest.graph.allow_undeclared {
            out.push_str("[graph]\n");
            if let Some(name) = &self.manifest.graph.name {
                out.push_str(&format!("name = {name:?}\n"));
            }
            if self.manifest.graph.allow_undeclared {
                out.push_str("allow_undeclared = true\n");
            }
            out.push('\n');
        }
        for (name, node) in &self.manifest.node {
            out.push_str(&format!("[node.{name:?}]\n"));
            out.push_str(&format!("after = {:?}\n", node.after));
            if let Some(desc) = &node.description {
                out.push_str(&format!("description = {desc:?}\n"));
            }
            out.push('\n');
        }
        out
    }

    /// Write the manifest to a temporary file that lives as long as the
    /// returned handle.
    pub fn write_temp(&self) -> anyhow::Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(self.to_toml().as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `NodeConfig`.
pub struct NodeBuilder {
    node: NodeConfig,
}

impl NodeBuilder {
    pub fn new() -> Self {
        Self {
            node: NodeConfig {
                after: vec![],
                description: None,
            },
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.node.after.push(dep.to_string());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.node.description = Some(text.to_string());
        self
    }

    pub fn build(self) -> NodeConfig {
        self.node
    }
}

impl Default for NodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Manifest equivalent of [`recipe_graph`], with every node declared.
pub fn recipe_manifest() -> ManifestBuilder {
    let mut builder = ManifestBuilder::new().named("recipe");
    for name in ["soil", "water"] {
        builder = builder.with_node(name, NodeBuilder::new().build());
    }
    let mut nodes: std::collections::BTreeMap<&str, NodeBuilder> = Default::default();
    for (child, parent) in RECIPE_EDGES {
        let entry = nodes.remove(child).unwrap_or_default();
        nodes.insert(*child, entry.after(parent));
    }
    for (name, node) in nodes {
        builder = builder.with_node(name, node.build());
    }
    builder
}
