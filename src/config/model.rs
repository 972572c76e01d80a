// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::config::validate::validate_manifest;
use crate::dag::Graph;
use crate::errors::Result;

/// Top-level dependency manifest as read from a TOML file.
///
/// ```toml
/// [graph]
/// name = "recipe"
///
/// [node.cake]
/// after = ["eggs", "flour"]
/// description = "the end goal"
///
/// [node.eggs]
/// after = ["chickens"]
/// ```
///
/// All sections are optional, although validation requires at least one
/// node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestFile {
    /// Graph-wide settings from `[graph]`.
    #[serde(default)]
    pub graph: GraphSection,

    /// All nodes from `[node.<name>]`, keyed by node name.
    #[serde(default)]
    pub node: BTreeMap<String, NodeConfig>,
}

/// `[graph]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphSection {
    /// Optional human-readable label, used in output headers.
    #[serde(default)]
    pub name: Option<String>,

    /// If true, `after` may reference nodes that have no `[node.<name>]`
    /// section; they are created on first reference.
    ///
    /// Otherwise such references are a configuration error.
    #[serde(default)]
    pub allow_undeclared: bool,
}

/// `[node.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeConfig {
    /// Nodes this node depends on.
    #[serde(default)]
    pub after: Vec<String>,

    /// Free-text payload; the graph itself never looks at it.
    #[serde(default)]
    pub description: Option<String>,
}

impl ManifestFile {
    /// Validate the manifest and build the dependency graph it describes.
    pub fn build_graph(&self) -> Result<Graph<String>> {
        validate_manifest(self)
    }

    /// Description attached to `name`, if it has a section and one was set.
    pub fn description_of(&self, name: &str) -> Option<&str> {
        self.node.get(name)?.description.as_deref()
    }
}
