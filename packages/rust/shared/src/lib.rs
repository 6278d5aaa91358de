//! Shared types, error model, and configuration for Galaxy.
//!
//! This crate is the foundation depended on by all other Galaxy crates.
//! It provides:
//! - [`GalaxyError`]: the unified error type
//! - Artifact types ([`GraphData`], [`GraphNode`], [`GraphLink`])
//! - Configuration ([`AppConfig`], [`GraphConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, ContentConfig, GraphConfig, OutputConfig, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{GalaxyError, Result};
pub use types::{BASE_WEIGHT, DEFAULT_CATEGORY, GraphData, GraphLink, GraphNode};
