//! The assembled, immutable selection policy.

use std::collections::HashMap;
use std::path::Path;

use crate::error::PolicyError;
use crate::pattern::PatternTree;
use crate::relations::parse_relations;

/// The selection policy for one run.
///
/// Drives which classes become public API and which synthetic interfaces
/// and base classes the abstraction engine generates. Immutable for the
/// run; all three abstraction passes receive the identical policy.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    /// Selector for classes exposed on the public API surface.
    pub exposed: PatternTree,

    /// Selector for classes that get synthetic base classes.
    pub base_classes: PatternTree,

    /// Generated interface → extra member names.
    pub interface_members: HashMap<String, Vec<String>>,

    /// Generated interface → base interface names.
    pub interface_bases: HashMap<String, Vec<String>>,

    /// The verbatim rule documents, kept so the abstraction engine can be
    /// handed the declarative rules exactly as written.
    pub sources: PolicySources,
}

/// The four raw policy documents as loaded.
#[derive(Debug, Clone, Default)]
pub struct PolicySources {
    /// The exposed-class selector document.
    pub exposed_rules: String,

    /// The synthetic-base-class selector document.
    pub base_class_rules: String,

    /// The interface → members relation document.
    pub interface_members: String,

    /// The interface → base-interfaces relation document.
    pub interface_bases: String,
}

impl SelectionPolicy {
    /// Loads the policy from its four source files.
    pub fn load(
        exposed_rules: &Path,
        base_class_rules: &Path,
        interface_members: &Path,
        interface_bases: &Path,
    ) -> Result<Self, PolicyError> {
        Self::from_strs(
            &read(exposed_rules)?,
            &read(base_class_rules)?,
            &read(interface_members)?,
            &read(interface_bases)?,
        )
    }

    /// Builds the policy from in-memory documents.
    pub fn from_strs(
        exposed_rules: &str,
        base_class_rules: &str,
        interface_members: &str,
        interface_bases: &str,
    ) -> Result<Self, PolicyError> {
        Ok(Self {
            exposed: PatternTree::parse(exposed_rules)?,
            base_classes: PatternTree::parse(base_class_rules)?,
            interface_members: parse_relations(interface_members)?,
            interface_bases: parse_relations(interface_bases)?,
            sources: PolicySources {
                exposed_rules: exposed_rules.to_string(),
                base_class_rules: base_class_rules.to_string(),
                interface_members: interface_members.to_string(),
                interface_bases: interface_bases.to_string(),
            },
        })
    }

    /// Returns `true` when the class is selected for the public API surface.
    pub fn is_exposed(&self, class_name: &str) -> bool {
        self.exposed.matches(class_name)
    }

    /// Returns `true` when the class gets a synthetic base class.
    pub fn has_base_class(&self, class_name: &str) -> bool {
        self.base_classes.matches(class_name)
    }
}

fn read(path: &Path) -> Result<String, PolicyError> {
    std::fs::read_to_string(path).map_err(|e| PolicyError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_from_strings() {
        let policy = SelectionPolicy::from_strs(
            "core/world/**\ncore/entity/*\n",
            "core/entity/*\n",
            "api/Tickable=tick\n",
            "api/Tickable=api/Base\n",
        )
        .unwrap();

        assert!(policy.is_exposed("core/world/World"));
        assert!(policy.is_exposed("core/entity/Player"));
        assert!(!policy.is_exposed("internal/Helper"));
        assert!(policy.has_base_class("core/entity/Player"));
        assert!(!policy.has_base_class("core/world/World"));
        assert_eq!(policy.interface_members["api/Tickable"], vec!["tick"]);
        assert_eq!(policy.interface_bases["api/Tickable"], vec!["api/Base"]);
    }

    #[test]
    fn sources_kept_verbatim() {
        let policy = SelectionPolicy::from_strs(
            "core/world/**\n",
            "",
            "api/Tickable=tick\n",
            "",
        )
        .unwrap();
        assert_eq!(policy.sources.exposed_rules, "core/world/**\n");
        assert_eq!(policy.sources.interface_members, "api/Tickable=tick\n");
    }

    #[test]
    fn load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, content: &str| {
            let path = dir.path().join(name);
            std::fs::write(&path, content).unwrap();
            path
        };
        let exposed = write("exposed.rules", "core/world/**\n");
        let bases = write("baseclasses.rules", "core/entity/*\n");
        let members = write("members.relations", "api/Tickable=tick\n");
        let ibases = write("bases.relations", "api/Tickable=api/Base\n");

        let policy = SelectionPolicy::load(&exposed, &bases, &members, &ibases).unwrap();
        assert!(policy.is_exposed("core/world/World"));
    }

    #[test]
    fn missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("exposed.rules");
        std::fs::write(&present, "core/**\n").unwrap();
        let err = SelectionPolicy::load(
            &present,
            &dir.path().join("missing.rules"),
            &present,
            &present,
        )
        .unwrap_err();
        assert!(matches!(err, PolicyError::Io { .. }));
    }

    #[test]
    fn rule_syntax_error_is_fatal() {
        let err = SelectionPolicy::from_strs("core//world\n", "", "", "").unwrap_err();
        assert!(matches!(err, PolicyError::Pattern { .. }));
    }

    #[test]
    fn relation_syntax_error_is_fatal() {
        let err = SelectionPolicy::from_strs("", "", "no equals sign", "").unwrap_err();
        assert!(matches!(err, PolicyError::Relation { .. }));
    }
}
