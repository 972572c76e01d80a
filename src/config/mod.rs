// src/config/mod.rs

//! Dependency manifests for layerdag.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a manifest from disk (`loader.rs`).
//! - Validate it and turn it into a [`Graph`](crate::dag::Graph) (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{GraphSection, ManifestFile, NodeConfig};
pub use validate::validate_manifest;
