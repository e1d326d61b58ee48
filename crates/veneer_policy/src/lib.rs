//! The declarative selection policy driving the abstraction stage.
//!
//! Two pattern-tree rule documents select which classes are exposed as
//! public API and which get synthetic base classes; two delimited relation
//! files attach extra members and base interfaces to generated interfaces.
//! Everything is parsed once into immutable structures at load time and
//! never validated against the actual classpath — unresolved relations
//! surface later as abstraction-engine failures.

#![warn(missing_docs)]

mod error;
mod pattern;
mod policy;
mod relations;

pub use error::PolicyError;
pub use pattern::PatternTree;
pub use policy::{PolicySources, SelectionPolicy};
pub use relations::parse_relations;
