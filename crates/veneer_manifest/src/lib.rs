//! The dual-namespace manifest contract to downstream consumers.
//!
//! The abstraction manifest (named-namespace keys, build-time consumers)
//! is persisted as a structured JSON document; the runtime manifest
//! (intermediate-namespace dotted keys, runtime consumers) is a pure
//! projection of the abstraction manifest through the mapping table,
//! persisted as a flat key=value document. Both persisted forms are
//! deterministic, including key order.

#![warn(missing_docs)]

mod error;
mod persist;
mod runtime;

pub use error::ManifestError;
pub use persist::{write_abstraction_manifest, write_runtime_manifest};
pub use runtime::{build_runtime_manifest, RuntimeManifest};
