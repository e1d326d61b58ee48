//! Conditional, idempotent remote-artifact acquisition.
//!
//! The fetcher transfers a remote artifact only when its content has
//! changed since the local copy was written. Freshness is decided by HTTP
//! validators (ETag / Last-Modified) persisted in a sidecar next to each
//! artifact, with a content-hash comparison as the final guard so local
//! bytes are never rewritten when the remote content is unchanged.
//!
//! The HTTP layer sits behind the [`Transport`] trait so the fetch logic
//! can be tested without a network.

#![warn(missing_docs)]

mod error;
mod fetcher;
mod index;
mod transport;

pub use error::FetchError;
pub use fetcher::{ArtifactDescriptor, FetchStatus, Fetcher};
pub use index::{DownloadEntry, Library, VersionEntry, VersionIndex, VersionMetadata};
pub use transport::{FetchOutcome, HttpTransport, Transport, Validator};
