//! Heuristic constants of the planning pipeline, loaded from `tessera.toml`.
//!
//! Every threshold, scaling factor, physics bound and lookup table used by the
//! feasibility, topology and floorplan stages lives in one strongly-typed
//! [`SynthesisConfig`]. All fields have defaults, so an empty file (or no file
//! at all) yields the built-in behavior; a partial file overrides only what it
//! names.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, load_project_config, CONFIG_FILE_NAME};
pub use types::*;
