//! Staging of implementation classes into the consumer classes directory.

use std::path::Path;

use crate::error::PackageError;

/// Removes version-package directories from `classes_dir`.
///
/// Only directories whose name is a `v` followed by a digit are removed
/// (`v1_16_4`, `v2_0`). Anything else in the directory is left alone, so
/// unrelated build outputs sharing the tree survive a restage.
pub fn purge_versioned_dirs(classes_dir: &Path) -> Result<(), PackageError> {
    if !classes_dir.is_dir() {
        return Ok(());
    }
    for entry in std::fs::read_dir(classes_dir).map_err(|e| PackageError::io(classes_dir, e))? {
        let entry = entry.map_err(|e| PackageError::io(classes_dir, e))?;
        let path = entry.path();
        if path.is_dir() && is_version_package(&entry.file_name().to_string_lossy()) {
            std::fs::remove_dir_all(&path).map_err(|e| PackageError::io(&path, e))?;
        }
    }
    Ok(())
}

/// Copies the implementation class tree into
/// `classes_dir/<version_package>`, after purging any stale
/// version-package directories from previous coordinates.
pub fn stage_impl_classes(
    impl_dir: &Path,
    classes_dir: &Path,
    version_package: &str,
) -> Result<(), PackageError> {
    if !impl_dir.is_dir() {
        return Err(PackageError::MissingSource {
            path: impl_dir.to_path_buf(),
        });
    }
    purge_versioned_dirs(classes_dir)?;

    let dest = classes_dir.join(version_package);
    copy_tree(impl_dir, &dest)
}

fn is_version_package(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('v') && chars.next().is_some_and(|c| c.is_ascii_digit())
}

fn copy_tree(source: &Path, dest: &Path) -> Result<(), PackageError> {
    std::fs::create_dir_all(dest).map_err(|e| PackageError::io(dest, e))?;
    for entry in std::fs::read_dir(source).map_err(|e| PackageError::io(source, e))? {
        let entry = entry.map_err(|e| PackageError::io(source, e))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        if from.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            std::fs::copy(&from, &to).map_err(|e| PackageError::io(&from, e))?;
        }
    }
    Ok(())
}
