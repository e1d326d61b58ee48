//! Conditional fetch logic and concurrent multi-artifact acquisition.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use veneer_common::ContentHash;

use crate::error::FetchError;
use crate::transport::{FetchOutcome, Transport, Validator};

/// Extension of the sidecar file holding the persisted validator.
const VALIDATOR_EXT: &str = "validator";

/// One remote artifact and where its local copy lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    /// The remote URL.
    pub url: String,

    /// The local path the artifact is written to.
    pub local_path: PathBuf,
}

impl ArtifactDescriptor {
    /// Creates a descriptor.
    pub fn new(url: impl Into<String>, local_path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            local_path: local_path.into(),
        }
    }

    /// Path of the validator sidecar for this artifact.
    fn validator_path(&self) -> PathBuf {
        let mut name = self
            .local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        name.push('.');
        name.push_str(VALIDATOR_EXT);
        self.local_path.with_file_name(name)
    }
}

/// What a single fetch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// The remote confirmed the local copy current; nothing transferred.
    Skipped,

    /// A body was transferred but matched the local bytes; file untouched.
    Unchanged,

    /// The local copy was written (new or replaced).
    Downloaded,
}

/// Conditional artifact fetcher.
///
/// Safe to repeat: fetching an artifact whose remote content is unchanged
/// performs no redundant transfer (given validators) and never rewrites
/// local bytes. Independent descriptors share no mutable state and are
/// fetched concurrently by [`Fetcher::fetch_all`].
pub struct Fetcher {
    transport: Arc<dyn Transport>,
}

impl Fetcher {
    /// Creates a fetcher over the given transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetches one artifact, conditionally.
    ///
    /// The persisted validator is only replayed while the local copy still
    /// exists; a deleted local file forces a full transfer.
    pub fn fetch(&self, descriptor: &ArtifactDescriptor) -> Result<FetchStatus, FetchError> {
        let validator = if descriptor.local_path.exists() {
            load_validator(&descriptor.validator_path())
        } else {
            None
        };

        match self.transport.fetch(&descriptor.url, validator.as_ref())? {
            FetchOutcome::Unchanged => Ok(FetchStatus::Skipped),
            FetchOutcome::Fetched { body, validator } => {
                let status = self.write_if_changed(descriptor, &body)?;
                if !validator.is_empty() {
                    store_validator(&descriptor.validator_path(), &validator)?;
                }
                Ok(status)
            }
        }
    }

    /// Fetches all descriptors concurrently and joins on every transfer.
    ///
    /// Returns the per-descriptor statuses in input order. The first error
    /// encountered is returned after all threads have finished; no stage
    /// may proceed on partially fetched inputs.
    pub fn fetch_all(
        &self,
        descriptors: &[ArtifactDescriptor],
    ) -> Result<Vec<FetchStatus>, FetchError> {
        let mut results: Vec<Option<Result<FetchStatus, FetchError>>> =
            descriptors.iter().map(|_| None).collect();

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(descriptors.len());
            for descriptor in descriptors {
                handles.push(scope.spawn(move || self.fetch(descriptor)));
            }
            for (slot, handle) in results.iter_mut().zip(handles) {
                // A panicking fetch thread is a bug in the transport; surface it.
                *slot = Some(handle.join().expect("fetch thread panicked"));
            }
        });

        results
            .into_iter()
            .map(|r| r.expect("all fetch threads joined"))
            .collect()
    }

    /// Writes the body only when it differs from the existing local copy.
    fn write_if_changed(
        &self,
        descriptor: &ArtifactDescriptor,
        body: &[u8],
    ) -> Result<FetchStatus, FetchError> {
        if let Some(existing) = ContentHash::of_file(&descriptor.local_path) {
            if existing == ContentHash::from_bytes(body) {
                return Ok(FetchStatus::Unchanged);
            }
        }

        if let Some(parent) = descriptor.local_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FetchError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(&descriptor.local_path, body).map_err(|e| FetchError::Io {
            path: descriptor.local_path.clone(),
            source: e,
        })?;
        Ok(FetchStatus::Downloaded)
    }
}

/// Loads a persisted validator, treating any problem as "no validator".
fn load_validator(path: &Path) -> Option<Validator> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Persists a validator sidecar.
fn store_validator(path: &Path, validator: &Validator) -> Result<(), FetchError> {
    let json = serde_json::to_string(validator).map_err(|e| FetchError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;
    std::fs::write(path, json).map_err(|e| FetchError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
