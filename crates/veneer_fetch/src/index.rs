//! Distribution version index and per-version metadata documents.
//!
//! The index lists every published version with the URL of its metadata
//! document; the metadata document names the client and server binary
//! downloads and the dependency libraries.

use std::path::Path;

use serde::Deserialize;

use crate::error::FetchError;

/// The top-level version index document.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionIndex {
    /// All published versions.
    pub versions: Vec<VersionEntry>,
}

/// One entry in the version index.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionEntry {
    /// The version identifier, e.g. `1.16.4`.
    pub id: String,

    /// URL of the per-version metadata document.
    pub url: String,
}

/// Per-version metadata naming the downloadable artifacts.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionMetadata {
    /// The distribution binary downloads.
    pub downloads: Downloads,

    /// Dependency libraries required on the classpath.
    #[serde(default)]
    pub libraries: Vec<Library>,
}

/// Client and server binary downloads for a version.
#[derive(Debug, Clone, Deserialize)]
pub struct Downloads {
    /// The client binary.
    pub client: DownloadEntry,

    /// The server binary.
    pub server: DownloadEntry,
}

/// One downloadable artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadEntry {
    /// The remote URL.
    pub url: String,
}

/// One dependency library.
#[derive(Debug, Clone, Deserialize)]
pub struct Library {
    /// The library's coordinate-style name, e.g. `org.example:core:1.2`.
    pub name: String,

    /// The remote URL.
    pub url: String,

    /// Repository-relative path for the local copy.
    pub path: String,
}

impl VersionIndex {
    /// Loads the index from a fetched local document.
    pub fn load(path: &Path) -> Result<Self, FetchError> {
        parse_document(path)
    }

    /// Finds the entry for a pinned version.
    pub fn find(&self, version: &str) -> Result<&VersionEntry, FetchError> {
        self.versions
            .iter()
            .find(|e| e.id == version)
            .ok_or_else(|| FetchError::VersionNotFound {
                version: version.to_string(),
            })
    }
}

impl VersionMetadata {
    /// Loads per-version metadata from a fetched local document.
    pub fn load(path: &Path) -> Result<Self, FetchError> {
        parse_document(path)
    }
}

/// Reads and parses a JSON document, mapping failures to fetch errors.
fn parse_document<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, FetchError> {
    let content = std::fs::read_to_string(path).map_err(|e| FetchError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| FetchError::MalformedIndex {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"{
        "versions": [
            {"id": "1.16.3", "url": "https://dist.example/1.16.3.json"},
            {"id": "1.16.4", "url": "https://dist.example/1.16.4.json"}
        ]
    }"#;

    const METADATA: &str = r#"{
        "downloads": {
            "client": {"url": "https://dist.example/1.16.4/client.bin"},
            "server": {"url": "https://dist.example/1.16.4/server.bin"}
        },
        "libraries": [
            {
                "name": "org.example:core:1.2",
                "url": "https://libs.example/org/example/core/1.2/core-1.2.bin",
                "path": "org/example/core/1.2/core-1.2.bin"
            }
        ]
    }"#;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_index_and_find_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "index.json", INDEX);
        let index = VersionIndex::load(&path).unwrap();
        let entry = index.find("1.16.4").unwrap();
        assert_eq!(entry.url, "https://dist.example/1.16.4.json");
    }

    #[test]
    fn find_unknown_version_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "index.json", INDEX);
        let index = VersionIndex::load(&path).unwrap();
        let err = index.find("1.99").unwrap_err();
        assert!(matches!(err, FetchError::VersionNotFound { .. }));
    }

    #[test]
    fn load_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "1.16.4.json", METADATA);
        let meta = VersionMetadata::load(&path).unwrap();
        assert_eq!(
            meta.downloads.client.url,
            "https://dist.example/1.16.4/client.bin"
        );
        assert_eq!(meta.libraries.len(), 1);
        assert_eq!(meta.libraries[0].path, "org/example/core/1.2/core-1.2.bin");
    }

    #[test]
    fn metadata_without_libraries() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "meta.json",
            r#"{"downloads": {"client": {"url": "c"}, "server": {"url": "s"}}}"#,
        );
        let meta = VersionMetadata::load(&path).unwrap();
        assert!(meta.libraries.is_empty());
    }

    #[test]
    fn malformed_document_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "index.json", "{not json");
        let err = VersionIndex::load(&path).unwrap_err();
        assert!(matches!(err, FetchError::MalformedIndex { .. }));
    }

    #[test]
    fn missing_document_is_io_error() {
        let err = VersionIndex::load(Path::new("/nonexistent/index.json")).unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
    }
}
