//! Non-class resource carry-over for the remap stage.
//!
//! The remap engine only translates class entries; everything else in the
//! merged archive (assets, metadata, data files) is copied verbatim into
//! the named tree so downstream stages see a complete tree.

use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::PipelineError;

/// Extracts every non-class entry of the merged archive into `named_dir`.
pub(crate) fn copy_resources(merged: &Path, named_dir: &Path) -> Result<(), PipelineError> {
    let file = std::fs::File::open(merged).map_err(|e| PipelineError::io(merged, e))?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));

    let entries = archive
        .entries()
        .map_err(|e| PipelineError::io(merged, e))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| PipelineError::io(merged, e))?;
        let path = entry
            .path()
            .map_err(|e| PipelineError::io(merged, e))?
            .into_owned();
        if path.extension().is_some_and(|ext| ext == "class") {
            continue;
        }
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let dest = named_dir.join(&path);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        }
        let mut out =
            std::fs::File::create(&dest).map_err(|e| PipelineError::io(&dest, e))?;
        std::io::copy(&mut entry, &mut out).map_err(|e| PipelineError::io(&dest, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;

    fn write_archive(path: &Path, entries: &[(&str, &[u8])]) {
        let file = std::fs::File::create(path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, content) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, *content).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn copies_resources_and_skips_classes() {
        let dir = tempfile::tempdir().unwrap();
        let merged = dir.path().join("merged.bin");
        write_archive(
            &merged,
            &[
                ("core/world/World.class", b"class bytes"),
                ("assets/lang/en.json", b"{}"),
                ("version.txt", b"1.16.4"),
            ],
        );

        let named = dir.path().join("named");
        copy_resources(&merged, &named).unwrap();

        assert!(!named.join("core/world/World.class").exists());
        assert_eq!(std::fs::read(named.join("assets/lang/en.json")).unwrap(), b"{}");
        assert_eq!(std::fs::read(named.join("version.txt")).unwrap(), b"1.16.4");
    }

    #[test]
    fn missing_archive_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_resources(&dir.path().join("absent.bin"), dir.path()).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
