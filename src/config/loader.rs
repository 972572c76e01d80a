// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::ManifestFile;
use crate::config::validate::validate_manifest;
use crate::errors::Result;

/// Load a manifest from a given path and return the raw `ManifestFile`.
///
/// This only performs TOML deserialization; it does **not** check
/// references or cycles. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ManifestFile> {
    let path = path.as_ref();
    debug!(?path, "reading manifest");

    let contents = fs::read_to_string(path)?;
    let manifest: ManifestFile = toml::from_str(&contents)?;

    debug!(nodes = manifest.node.len(), "parsed manifest");
    Ok(manifest)
}

/// Load a manifest from path and run full validation.
///
/// Checks for:
/// - an empty manifest,
/// - unknown `after` references (unless `allow_undeclared`),
/// - self-dependencies and cycles.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ManifestFile> {
    let manifest = load_from_path(&path)?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LayerdagError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from_path(dir.path().join("nope.toml"));
        assert!(matches!(result, Err(LayerdagError::IoError(_))));
    }

    #[test]
    fn malformed_toml_is_toml_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[node.a\nafter = ").unwrap();
        let result = load_from_path(file.path());
        assert!(matches!(result, Err(LayerdagError::TomlError(_))));
    }

    #[test]
    fn sections_default_when_absent() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[node.a]").unwrap();
        let manifest = load_and_validate(file.path()).unwrap();
        assert!(manifest.graph.name.is_none());
        assert!(!manifest.graph.allow_undeclared);
        assert!(manifest.node["a"].after.is_empty());
    }
}
