//! The cross-namespace mapping table.
//!
//! Loads the namespace-tagged tabular mapping format shipped in the
//! mapping bundle, answers bidirectional lookups between the official,
//! intermediate, and named namespaces, and derives the two-column mapping
//! view consumed by the external remapping engine.
//!
//! The table is loaded once per run and read-only afterwards. A record
//! missing any of the three namespaces is a fatal format error, and every
//! later manifest entry must resolve against the table.

#![warn(missing_docs)]

mod bundle;
mod error;
mod parser;
mod table;
mod view;

pub use bundle::extract_table;
pub use error::MappingError;
pub use table::{ClassRecord, MappingTable, MemberRecord};
pub use view::write_mapping_view;
