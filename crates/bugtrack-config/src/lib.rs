//! Configuration for bugtrack
//!
//! This crate provides:
//! - Config directory paths
//! - Config file discovery (TOML)
//! - Application settings (`Settings`) with environment overrides

pub mod config_file;
pub mod error;
pub mod paths;
pub mod settings;

pub use config_file::load_config_file;
pub use error::ConfigError;
pub use paths::{app_config_path, config_dir};
pub use settings::Settings;

/// Default base address of the bug tracker API
pub const DEFAULT_BASE_URL: &str = "http://localhost:9001/api";
