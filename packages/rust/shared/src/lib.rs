//! Shared types, error model, and configuration for the job carousel feed.
//!
//! This crate is the foundation depended on by all other crates.
//! It provides:
//! - [`JobCarouselError`] — the unified error type
//! - Domain types ([`Job`], inspection-type icons)
//! - Configuration ([`AppConfig`], [`UndatedPolicy`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CarouselConfig, DEFAULT_CSV_URL, DEFAULT_SHEET_URL, IngestConfig, SourceConfig,
    UndatedPolicy, config_dir, config_file_path, init_config, load_config, load_config_from,
    validate_config,
};
pub use error::{JobCarouselError, Result};
pub use types::{DEFAULT_ICON, INSPECTION_ICONS, Job, icon_for};
