//! Content hashing for download freshness checks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A 128-bit XXH3 content hash.
///
/// Two artifacts with the same `ContentHash` are assumed to have identical
/// bytes. The fetcher compares the hash of a freshly transferred body against
/// the local copy to decide whether the local file may be left untouched.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }

    /// Computes the content hash of a file on disk.
    ///
    /// Returns `None` when the file cannot be read, which callers treat as
    /// "no local copy" rather than an error.
    pub fn of_file(path: &Path) -> Option<Self> {
        let content = std::fs::read(path).ok()?;
        Some(Self::from_bytes(&content))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = ContentHash::from_bytes(b"artifact bytes");
        let b = ContentHash::from_bytes(b"artifact bytes");
        assert_eq!(a, b);
    }

    #[test]
    fn different_inputs_differ() {
        let a = ContentHash::from_bytes(b"client");
        let b = ContentHash::from_bytes(b"server");
        assert_ne!(a, b);
    }

    #[test]
    fn of_file_matches_from_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifact.bin");
        std::fs::write(&path, b"payload").unwrap();
        assert_eq!(
            ContentHash::of_file(&path),
            Some(ContentHash::from_bytes(b"payload"))
        );
    }

    #[test]
    fn of_file_missing_is_none() {
        assert!(ContentHash::of_file(Path::new("/nonexistent/artifact")).is_none());
    }

    #[test]
    fn display_is_hex() {
        let h = ContentHash::from_bytes(b"x");
        let s = format!("{h}");
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn serde_roundtrip() {
        let h = ContentHash::from_bytes(b"serde");
        let json = serde_json::to_string(&h).unwrap();
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}
