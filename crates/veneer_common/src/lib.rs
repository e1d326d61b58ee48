//! Shared primitives for the Veneer assembly pipeline.
//!
//! Contains the content hash used for fetch freshness checks and the
//! three-namespace vocabulary shared by the mapping table, the remap
//! stage, and the manifest builder.

#![warn(missing_docs)]

mod hash;
mod namespace;

pub use hash::ContentHash;
pub use namespace::{dotted, slashed, Namespace};
