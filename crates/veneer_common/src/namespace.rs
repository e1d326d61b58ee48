//! The three symbolic naming schemes and class-name form helpers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three parallel naming schemes for classes and members.
///
/// Every class in the distribution carries a name in all three namespaces.
/// The official namespace is the opaque one shipped with the distribution,
/// the intermediate namespace is machine-generated and stable across
/// versions, and the named namespace is the human-readable one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// The opaque namespace shipped with the distribution.
    Official,
    /// The machine-generated, version-stable namespace.
    Intermediate,
    /// The human-readable namespace.
    Named,
}

impl Namespace {
    /// All namespaces, in mapping-table column order.
    pub const ALL: [Namespace; 3] = [Namespace::Official, Namespace::Intermediate, Namespace::Named];

    /// The column index of this namespace in a mapping record.
    pub fn index(self) -> usize {
        match self {
            Namespace::Official => 0,
            Namespace::Intermediate => 1,
            Namespace::Named => 2,
        }
    }

    /// Parses a namespace tag as it appears in a mapping-bundle header.
    pub fn parse(tag: &str) -> Option<Namespace> {
        match tag {
            "official" => Some(Namespace::Official),
            "intermediate" => Some(Namespace::Intermediate),
            "named" => Some(Namespace::Named),
            _ => None,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Namespace::Official => "official",
            Namespace::Intermediate => "intermediate",
            Namespace::Named => "named",
        };
        f.write_str(tag)
    }
}

/// Converts a slash-separated class name to its dotted form.
///
/// Runtime consumers key the manifest by dotted names; the mapping table
/// stores slashed names.
pub fn dotted(class_name: &str) -> String {
    class_name.replace('/', ".")
}

/// Converts a dotted class name to its slash-separated form.
pub fn slashed(class_name: &str) -> String {
    class_name.replace('.', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_tags() {
        assert_eq!(Namespace::parse("official"), Some(Namespace::Official));
        assert_eq!(Namespace::parse("intermediate"), Some(Namespace::Intermediate));
        assert_eq!(Namespace::parse("named"), Some(Namespace::Named));
    }

    #[test]
    fn parse_unknown_tag() {
        assert_eq!(Namespace::parse("obfuscated"), None);
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for ns in Namespace::ALL {
            assert_eq!(Namespace::parse(&ns.to_string()), Some(ns));
        }
    }

    #[test]
    fn column_indexes_are_distinct() {
        assert_eq!(Namespace::Official.index(), 0);
        assert_eq!(Namespace::Intermediate.index(), 1);
        assert_eq!(Namespace::Named.index(), 2);
    }

    #[test]
    fn dotted_and_slashed() {
        assert_eq!(dotted("core/world/World"), "core.world.World");
        assert_eq!(slashed("core.world.World"), "core/world/World");
        assert_eq!(dotted("TopLevel"), "TopLevel");
    }
}
