//! Mapping-bundle extraction.
//!
//! The mapping bundle is fetched as a gzip-compressed tar archive holding
//! the table at a well-known entry path. Extraction copies that single
//! entry to a flat path in the run's working tree.

use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::MappingError;

/// Archive entry path of the mapping table inside the bundle.
const TABLE_ENTRY: &str = "mappings/mappings.ntab";

/// Extracts the mapping table from `bundle_path` to `dest_path`.
///
/// Fails when the archive is unreadable or lacks the table entry. Parent
/// directories of `dest_path` are created as needed.
pub fn extract_table(bundle_path: &Path, dest_path: &Path) -> Result<(), MappingError> {
    let file = std::fs::File::open(bundle_path).map_err(|e| MappingError::Io {
        path: bundle_path.to_path_buf(),
        source: e,
    })?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));

    let entries = archive.entries().map_err(|e| MappingError::Bundle {
        path: bundle_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    for entry in entries {
        let mut entry = entry.map_err(|e| MappingError::Bundle {
            path: bundle_path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let entry_path = entry.path().map_err(|e| MappingError::Bundle {
            path: bundle_path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if entry_path.as_ref() != Path::new(TABLE_ENTRY) {
            continue;
        }

        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MappingError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let mut out = std::fs::File::create(dest_path).map_err(|e| MappingError::Io {
            path: dest_path.to_path_buf(),
            source: e,
        })?;
        std::io::copy(&mut entry, &mut out).map_err(|e| MappingError::Io {
            path: dest_path.to_path_buf(),
            source: e,
        })?;
        return Ok(());
    }

    Err(MappingError::Bundle {
        path: bundle_path.to_path_buf(),
        reason: format!("bundle has no '{TABLE_ENTRY}' entry"),
    })
}
