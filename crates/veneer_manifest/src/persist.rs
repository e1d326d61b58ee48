//! Manifest persistence in the two on-disk formats.

use std::io::Write;
use std::path::Path;

use veneer_engine::AbstractionManifest;

use crate::error::ManifestError;
use crate::runtime::RuntimeManifest;

/// Persists the abstraction manifest as a structured JSON document.
///
/// Keys are the named-namespace class names; the underlying `BTreeMap`
/// makes the serialized key order deterministic.
pub fn write_abstraction_manifest(
    manifest: &AbstractionManifest,
    path: &Path,
) -> Result<(), ManifestError> {
    let json = serde_json::to_string_pretty(manifest)
        .map_err(|e| ManifestError::Serialization {
            reason: e.to_string(),
        })?;
    write_atomic(path, json.as_bytes())
}

/// Persists the runtime manifest as a flat `key=value` document.
///
/// One line per class, sorted by key; no comments or timestamps, so
/// identical inputs always produce byte-identical files.
pub fn write_runtime_manifest(
    manifest: &RuntimeManifest,
    path: &Path,
) -> Result<(), ManifestError> {
    let mut out = Vec::with_capacity(manifest.len() * 64);
    for (intermediate, api_class) in manifest {
        writeln!(out, "{intermediate}={api_class}").map_err(|e| ManifestError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    write_atomic(path, &out)
}

/// Creates parent directories and writes the document.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ManifestError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ManifestError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, bytes).map_err(|e| ManifestError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use veneer_engine::{ApiClassInfo, ApiClassKind};

    fn abstraction() -> AbstractionManifest {
        let mut manifest = AbstractionManifest::new();
        for name in ["z/Last", "a/First"] {
            manifest.insert(
                name.to_string(),
                ApiClassInfo {
                    api_class_name: format!("api/v1_0_0/{name}"),
                    kind: ApiClassKind::Interface,
                },
            );
        }
        manifest
    }

    #[test]
    fn abstraction_manifest_roundtrips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abstraction-manifest.json");
        write_abstraction_manifest(&abstraction(), &path).unwrap();

        let back: AbstractionManifest =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, abstraction());
    }

    #[test]
    fn abstraction_manifest_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        write_abstraction_manifest(&abstraction(), &a).unwrap();
        write_abstraction_manifest(&abstraction(), &b).unwrap();
        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }

    #[test]
    fn runtime_manifest_is_flat_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runtime-manifest.properties");
        let mut runtime = RuntimeManifest::new();
        runtime.insert("class_9".to_string(), "api/v1_0_0/Z".to_string());
        runtime.insert("class_1".to_string(), "api/v1_0_0/A".to_string());

        write_runtime_manifest(&runtime, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "class_1=api/v1_0_0/A\nclass_9=api/v1_0_0/Z\n");
    }

    #[test]
    fn runtime_manifest_is_byte_identical_across_writes() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.properties");
        let b = dir.path().join("b.properties");
        let mut runtime = RuntimeManifest::new();
        runtime.insert("class_1".to_string(), "api/v1_0_0/World".to_string());

        write_runtime_manifest(&runtime, &a).unwrap();
        write_runtime_manifest(&runtime, &b).unwrap();
        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }

    #[test]
    fn writers_create_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("runtime.properties");
        write_runtime_manifest(&RuntimeManifest::new(), &path).unwrap();
        assert!(path.exists());
    }
}
