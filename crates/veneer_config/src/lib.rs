//! Project configuration for the Veneer assembly pipeline.
//!
//! Loads and validates `veneer.toml`, which pins the version coordinate,
//! names the remote endpoints, and configures the external engine commands
//! and output locations.

#![warn(missing_docs)]

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{
    OutputConfig, PolicyConfig, RemoteConfig, ToolsConfig, VeneerConfig, VersionCoordinate,
};
