//! The assembly pipeline orchestrator.
//!
//! Sequences the fixed stage order — fetch, merge, mappings, remap,
//! policy, abstract, manifest, package — over the external engines and
//! the per-coordinate working tree. Each stage declares its filesystem
//! inputs and outputs; a thin driver verifies every declared input exists
//! before a stage runs and aborts the whole run on the first error.
//! Concurrent runs against the same coordinate are excluded by an
//! advisory file lock.

#![warn(missing_docs)]

mod assembly;
mod error;
mod lock;
mod paths;
mod resources;
mod stage;

pub use assembly::{Assembly, Engines};
pub use error::PipelineError;
pub use lock::RunLock;
pub use paths::RunPaths;
pub use stage::{run_stages, RunState, Stage};
