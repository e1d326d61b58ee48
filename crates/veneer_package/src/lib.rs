//! Packaging of pipeline outputs: gzip-compressed archives of the
//! generated trees, and staging of implementation classes into the
//! consumer-visible classes directory.

#![warn(missing_docs)]

mod archive;
mod error;
mod stage;

pub use archive::{archive_dir, archive_file};
pub use error::PackageError;
pub use stage::{purge_versioned_dirs, stage_impl_classes};
