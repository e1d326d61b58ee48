//! Narrow interfaces over the external binary-transformation engines.
//!
//! The pipeline never parses class-file binaries itself; merging,
//! remapping, abstraction, and structural verification are delegated to
//! external engines. Each engine sits behind a one-method trait with one
//! production implementation (invoking a configured command) so the
//! pipeline's sequencing and error propagation can be tested with doubles.

#![warn(missing_docs)]

mod command;
mod error;
mod manifest;
mod tools;
mod traits;

pub use command::ToolCommand;
pub use error::EngineError;
pub use manifest::{
    load_manifest, AbstractionConfig, AbstractionManifest, ApiClassInfo, ApiClassKind,
};
pub use tools::{CommandAbstractor, CommandMerger, CommandRemapper, CommandVerifier};
pub use traits::{Abstractor, ClassVerifier, Merger, Remapper};
