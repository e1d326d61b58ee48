//! Configuration data structures for `veneer.toml`.

use serde::{Deserialize, Serialize};

/// Top-level structure of a `veneer.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VeneerConfig {
    /// The pinned version coordinate for this run.
    pub coordinate: VersionCoordinate,

    /// Remote endpoints the fetcher pulls from.
    pub remote: RemoteConfig,

    /// External engine commands.
    pub tools: ToolsConfig,

    /// Selection-policy document locations.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Output tree locations.
    #[serde(default)]
    pub output: OutputConfig,
}

/// The immutable version coordinate pinning one pipeline run.
///
/// The coordinate is the sole cache key: every derived path incorporates
/// all three fields, so runs with different coordinates never share output
/// locations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionCoordinate {
    /// Version of the upstream distribution.
    pub distribution_version: String,

    /// Build number of the mapping bundle.
    pub mappings_build: u32,

    /// Build number of the generated API.
    pub api_build: u32,
}

impl VersionCoordinate {
    /// A filesystem-safe identifier incorporating all three fields.
    ///
    /// Used as the per-run directory name, e.g. `1.16.4-m7-a3`.
    pub fn slug(&self) -> String {
        format!(
            "{}-m{}-a{}",
            self.distribution_version, self.mappings_build, self.api_build
        )
    }

    /// The reserved version-package name for staged implementation classes.
    ///
    /// The distribution version with `.` and `-` replaced by `_`, under the
    /// reserved `v` prefix, e.g. `v1_16_4`.
    pub fn version_package(&self) -> String {
        let mut name = String::with_capacity(self.distribution_version.len() + 1);
        name.push('v');
        for c in self.distribution_version.chars() {
            name.push(if c == '.' || c == '-' { '_' } else { c });
        }
        name
    }
}

/// Remote endpoints for artifact acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// URL of the distribution version index document.
    pub version_index_url: String,

    /// URL template for the mapping bundle. `{version}` and `{build}` are
    /// substituted from the coordinate.
    pub mappings_bundle_url: String,
}

impl RemoteConfig {
    /// Resolves the mapping-bundle URL for a coordinate.
    pub fn mappings_bundle_url_for(&self, coordinate: &VersionCoordinate) -> String {
        self.mappings_bundle_url
            .replace("{version}", &coordinate.distribution_version)
            .replace("{build}", &coordinate.mappings_build.to_string())
    }
}

/// Command lines for the external engines.
///
/// Each value is a program followed by leading arguments, whitespace
/// separated; the pipeline appends engine-specific arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Binary merge engine command.
    pub merge: String,

    /// Symbol remapping engine command.
    pub remap: String,

    /// Abstraction engine command.
    #[serde(rename = "abstract")]
    pub abstractor: String,

    /// Structural class verifier command.
    pub verify: String,
}

/// Locations of the four declarative selection-policy documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Pattern rules selecting classes exposed on the public API surface.
    pub exposed_rules: String,

    /// Pattern rules selecting classes that get synthetic base classes.
    pub base_class_rules: String,

    /// Relation file attaching extra members to generated interfaces.
    pub interface_members: String,

    /// Relation file attaching base interfaces to generated interfaces.
    pub interface_bases: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            exposed_rules: "policy/exposed.rules".to_string(),
            base_class_rules: "policy/base-classes.rules".to_string(),
            interface_members: "policy/interface-members.relations".to_string(),
            interface_bases: "policy/interface-bases.relations".to_string(),
        }
    }
}

/// Output tree locations, all relative to the project root unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Working directory holding per-coordinate pipeline state.
    pub work_dir: String,

    /// The consuming project's compiled-class output tree, where the
    /// implementation classes are staged under the version package.
    pub classes_dir: String,

    /// The consuming project's build-time resource tree, where the runtime
    /// manifest is written.
    pub resources_dir: String,

    /// Fixed path for the development-convenience copy of the API archive.
    pub dev_api_archive: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            work_dir: "build/veneer".to_string(),
            classes_dir: "target/classes".to_string(),
            resources_dir: "target/resources".to_string(),
            dev_api_archive: "dev/test-api.tar.gz".to_string(),
        }
    }
}
