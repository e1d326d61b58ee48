//! The runtime manifest projection.

use std::collections::BTreeMap;

use veneer_common::{dotted, Namespace};
use veneer_engine::AbstractionManifest;
use veneer_mappings::MappingTable;

use crate::error::ManifestError;

/// Intermediate-namespace dotted class name → generated API class name.
///
/// A `BTreeMap` so persistence is byte-identical for identical inputs.
pub type RuntimeManifest = BTreeMap<String, String>;

/// Builds the runtime manifest from the abstraction manifest and the
/// mapping table.
///
/// A pure function of its two inputs. Every abstraction-manifest key is
/// resolved from the named namespace to the intermediate namespace; a key
/// the table does not know is a fatal integrity error, as is an empty API
/// class name.
pub fn build_runtime_manifest(
    abstraction: &AbstractionManifest,
    table: &MappingTable,
) -> Result<RuntimeManifest, ManifestError> {
    let mut runtime = RuntimeManifest::new();

    for (named_class, info) in abstraction {
        let intermediate = table
            .translate(named_class, Namespace::Named, Namespace::Intermediate)
            .ok_or_else(|| ManifestError::Unresolved {
                class: named_class.clone(),
            })?;
        if info.api_class_name.is_empty() {
            return Err(ManifestError::EmptyApiClass {
                class: named_class.clone(),
            });
        }
        runtime.insert(dotted(intermediate), info.api_class_name.clone());
    }

    Ok(runtime)
}
