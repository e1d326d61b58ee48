//! The in-memory mapping table and its lookup operations.

use std::collections::HashMap;
use std::path::Path;

use veneer_common::Namespace;

use crate::error::MappingError;
use crate::parser;

/// A field or method record with its signature and three names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    /// The member's type descriptor, in the official namespace.
    pub descriptor: String,

    /// The member's name in each namespace, indexed by [`Namespace::index`].
    pub names: [String; 3],
}

impl MemberRecord {
    /// The member's name in the given namespace.
    pub fn name(&self, namespace: Namespace) -> &str {
        &self.names[namespace.index()]
    }
}

/// One class with its three names and member records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    /// The class's slashed name in each namespace, indexed by
    /// [`Namespace::index`].
    pub names: [String; 3],

    /// Field records.
    pub fields: Vec<MemberRecord>,

    /// Method records.
    pub methods: Vec<MemberRecord>,
}

impl ClassRecord {
    /// The class's name in the given namespace.
    pub fn name(&self, namespace: Namespace) -> &str {
        &self.names[namespace.index()]
    }
}

/// The loaded cross-namespace mapping table.
///
/// An ordered collection of class records with a per-namespace reverse
/// index, built once per run and read-only afterwards.
#[derive(Debug)]
pub struct MappingTable {
    classes: Vec<ClassRecord>,
    indexes: [HashMap<String, usize>; 3],
}

impl MappingTable {
    /// Builds a table from parsed class records.
    ///
    /// Fails on a duplicate class name within any namespace, since a
    /// duplicate would make reverse lookups ambiguous.
    pub(crate) fn from_records(classes: Vec<ClassRecord>) -> Result<Self, MappingError> {
        let mut indexes: [HashMap<String, usize>; 3] = Default::default();
        for (i, record) in classes.iter().enumerate() {
            for ns in Namespace::ALL {
                let name = record.name(ns);
                if indexes[ns.index()].insert(name.to_string(), i).is_some() {
                    return Err(MappingError::Record {
                        line: 0,
                        reason: format!("duplicate {ns} class name '{name}'"),
                    });
                }
            }
        }
        Ok(Self { classes, indexes })
    }

    /// Loads the table from an extracted table file.
    pub fn load(path: &Path) -> Result<Self, MappingError> {
        let content = std::fs::read_to_string(path).map_err(|e| MappingError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        parser::parse(&content)
    }

    /// Parses the table from in-memory text.
    pub fn parse(content: &str) -> Result<Self, MappingError> {
        parser::parse(content)
    }

    /// Translates a class name between namespaces.
    ///
    /// Returns `None` when the name is absent in the source namespace
    /// rather than guessing.
    pub fn translate(&self, name: &str, from: Namespace, to: Namespace) -> Option<&str> {
        let i = *self.indexes[from.index()].get(name)?;
        Some(self.classes[i].name(to))
    }

    /// The full record for a class named in the given namespace.
    pub fn class(&self, name: &str, namespace: Namespace) -> Option<&ClassRecord> {
        let i = *self.indexes[namespace.index()].get(name)?;
        Some(&self.classes[i])
    }

    /// All class records in table order.
    pub fn classes(&self) -> &[ClassRecord] {
        &self.classes
    }

    /// Number of class records.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` when the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
