//! Gzip-compressed tar archives of generated trees.

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tar::Builder;

use crate::error::PackageError;

/// Archives a directory tree into a `.tar.gz` at `dest`.
///
/// Entries are added in sorted path order so identical trees produce
/// archives with identical entry sequences.
pub fn archive_dir(source: &Path, dest: &Path) -> Result<(), PackageError> {
    if !source.is_dir() {
        return Err(PackageError::MissingSource {
            path: source.to_path_buf(),
        });
    }
    let mut builder = open_builder(dest)?;

    let mut files = Vec::new();
    collect_files(source, &mut files)?;
    files.sort();

    for path in &files {
        let relative = path
            .strip_prefix(source)
            .map_err(|_| PackageError::MissingSource { path: path.clone() })?;
        let mut file = File::open(path).map_err(|e| PackageError::io(path, e))?;
        builder
            .append_file(relative, &mut file)
            .map_err(|e| PackageError::io(path, e))?;
    }

    finish_builder(builder, dest)
}

/// Archives a single file into a `.tar.gz` at `dest`, stored under its
/// file name.
pub fn archive_file(source: &Path, dest: &Path) -> Result<(), PackageError> {
    if !source.is_file() {
        return Err(PackageError::MissingSource {
            path: source.to_path_buf(),
        });
    }
    let name = source
        .file_name()
        .ok_or_else(|| PackageError::MissingSource {
            path: source.to_path_buf(),
        })?;

    let mut builder = open_builder(dest)?;
    let mut file = File::open(source).map_err(|e| PackageError::io(source, e))?;
    builder
        .append_file(Path::new(name), &mut file)
        .map_err(|e| PackageError::io(source, e))?;
    finish_builder(builder, dest)
}

fn open_builder(dest: &Path) -> Result<Builder<GzEncoder<File>>, PackageError> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PackageError::io(parent, e))?;
    }
    let file = File::create(dest).map_err(|e| PackageError::io(dest, e))?;
    Ok(Builder::new(GzEncoder::new(file, Compression::default())))
}

fn finish_builder(builder: Builder<GzEncoder<File>>, dest: &Path) -> Result<(), PackageError> {
    let encoder = builder
        .into_inner()
        .map_err(|e| PackageError::io(dest, e))?;
    encoder
        .finish()
        .map_err(|e| PackageError::io(dest, e))?;
    Ok(())
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), PackageError> {
    for entry in std::fs::read_dir(dir).map_err(|e| PackageError::io(dir, e))? {
        let entry = entry.map_err(|e| PackageError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}
