//! Shared types, error model, and configuration for taxsubset.
//!
//! This crate is the foundation depended on by the other taxsubset crates.
//! It provides:
//! - [`TaxsubsetError`] — the unified error type
//! - The output record type ([`TaxonomySubset`])
//! - Configuration ([`AppConfig`], [`RunConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_SOURCE_URL, OutputConfig, RunConfig, SourceConfig, SubsetConfig,
    config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, TaxsubsetError};
pub use types::TaxonomySubset;
