//! The transport seam between fetch logic and the actual HTTP client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Freshness validators returned by a previous successful transfer.
///
/// Persisted as a sidecar file next to each fetched artifact and replayed
/// on the next fetch as a conditional request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    /// The entity tag reported by the remote, if any.
    pub etag: Option<String>,

    /// The last-modified timestamp reported by the remote, if any.
    pub last_modified: Option<String>,
}

impl Validator {
    /// Returns `true` if this validator carries nothing to condition on.
    pub fn is_empty(&self) -> bool {
        self.etag.is_none() && self.last_modified.is_none()
    }
}

/// Result of a conditional fetch.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The remote confirmed the cached copy is current; no body transferred.
    Unchanged,

    /// The remote sent a (possibly identical) body.
    Fetched {
        /// The transferred bytes.
        body: Vec<u8>,
        /// Validators to persist for the next conditional request.
        validator: Validator,
    },
}

/// A conditional byte transfer from a remote URL.
///
/// One production implementation ([`HttpTransport`]) and test doubles in
/// the fetcher's tests. Implementations must not retry internally; a
/// transfer failure is fatal to the run.
pub trait Transport: Send + Sync {
    /// Fetches `url`, conditioned on `validator` when present.
    fn fetch(&self, url: &str, validator: Option<&Validator>)
        -> Result<FetchOutcome, FetchError>;
}

/// Production transport over a blocking HTTP client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Creates a transport with conservative connect/request timeouts.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| FetchError::Transfer {
                url: String::new(),
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn fetch(
        &self,
        url: &str,
        validator: Option<&Validator>,
    ) -> Result<FetchOutcome, FetchError> {
        let mut request = self.client.get(url);
        if let Some(v) = validator {
            if let Some(ref etag) = v.etag {
                request = request.header(reqwest::header::IF_NONE_MATCH, etag.as_str());
            }
            if let Some(ref lm) = v.last_modified {
                request = request.header(reqwest::header::IF_MODIFIED_SINCE, lm.as_str());
            }
        }

        let response = request.send().map_err(|e| FetchError::Transfer {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_MODIFIED {
            return Ok(FetchOutcome::Unchanged);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let header_string = |name: reqwest::header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let validator = Validator {
            etag: header_string(reqwest::header::ETAG),
            last_modified: header_string(reqwest::header::LAST_MODIFIED),
        };

        let body = response
            .bytes()
            .map_err(|e| FetchError::Transfer {
                url: url.to_string(),
                reason: e.to_string(),
            })?
            .to_vec();

        Ok(FetchOutcome::Fetched { body, validator })
    }
}
