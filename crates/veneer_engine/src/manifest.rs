//! Abstraction engine configuration and its emitted manifest.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Per-invocation configuration of the abstraction engine.
///
/// The three pipeline passes derive from one base configuration by
/// toggling `fit_to_public_api` and `raw_output`; everything else is
/// identical so the three outputs describe the same logical class set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractionConfig {
    /// The reserved version package generated classes live under,
    /// e.g. `v1_16_4`.
    pub version_package: String,

    /// Restrict the output to the public-API surface.
    pub fit_to_public_api: bool,

    /// Emit raw binary classes rather than source-level output.
    pub raw_output: bool,
}

impl AbstractionConfig {
    /// The base configuration for a version package: full output, binary.
    pub fn base(version_package: impl Into<String>) -> Self {
        Self {
            version_package: version_package.into(),
            fit_to_public_api: false,
            raw_output: true,
        }
    }

    /// This configuration with `fit_to_public_api` replaced.
    pub fn with_public_api(mut self, fit: bool) -> Self {
        self.fit_to_public_api = fit;
        self
    }

    /// This configuration with `raw_output` replaced.
    pub fn with_raw_output(mut self, raw: bool) -> Self {
        self.raw_output = raw;
        self
    }
}

/// What kind of synthetic type the engine generated for a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiClassKind {
    /// A generated public interface.
    Interface,
    /// A generated open base class.
    BaseClass,
}

/// The engine's per-class output record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiClassInfo {
    /// Slashed name of the generated API class, under the version package,
    /// e.g. `api/v1_16_4/core/world/World`.
    pub api_class_name: String,

    /// The kind of generated type.
    pub kind: ApiClassKind,
}

/// The abstraction manifest: named-namespace class → generated API class.
///
/// A `BTreeMap` so iteration and persistence order are deterministic.
pub type AbstractionManifest = BTreeMap<String, ApiClassInfo>;

/// Loads an abstraction manifest emitted by the engine.
pub fn load_manifest(path: &Path) -> Result<AbstractionManifest, EngineError> {
    let content = std::fs::read_to_string(path).map_err(|e| EngineError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| EngineError::Manifest {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_config_toggles() {
        let base = AbstractionConfig::base("v1_16_4");
        assert!(!base.fit_to_public_api);
        assert!(base.raw_output);

        let api = base.clone().with_public_api(true);
        assert!(api.fit_to_public_api);
        let sources = api.clone().with_raw_output(false);
        assert!(!sources.raw_output);
        assert_eq!(sources.version_package, "v1_16_4");
    }

    #[test]
    fn load_manifest_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(
            &path,
            r#"{
                "core/world/World": {
                    "api_class_name": "api/v1_16_4/core/world/World",
                    "kind": "interface"
                },
                "core/entity/Entity": {
                    "api_class_name": "api/v1_16_4/core/entity/Entity",
                    "kind": "base_class"
                }
            }"#,
        )
        .unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(
            manifest["core/world/World"].api_class_name,
            "api/v1_16_4/core/world/World"
        );
        assert_eq!(manifest["core/entity/Entity"].kind, ApiClassKind::BaseClass);
    }

    #[test]
    fn manifest_iteration_is_sorted() {
        let mut manifest = AbstractionManifest::new();
        for name in ["z/Last", "a/First", "m/Middle"] {
            manifest.insert(
                name.to_string(),
                ApiClassInfo {
                    api_class_name: format!("api/v1/{name}"),
                    kind: ApiClassKind::Interface,
                },
            );
        }
        let keys: Vec<_> = manifest.keys().collect();
        assert_eq!(keys, vec!["a/First", "m/Middle", "z/Last"]);
    }

    #[test]
    fn malformed_manifest_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, "not json").unwrap();
        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, EngineError::Manifest { .. }));
    }

    #[test]
    fn missing_manifest_is_io_error() {
        let err = load_manifest(Path::new("/nonexistent/manifest.json")).unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }
}
