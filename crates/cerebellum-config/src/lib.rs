// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Cerebellum Configuration System
//!
//! Type-safe configuration loader for the cerebellum stimulation devices with
//! support for:
//! - TOML file parsing
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cerebellum_config::{load_config, validate_config};
//!
//! // Load configuration with automatic file discovery and overrides
//! let config = load_config(None, None).expect("Failed to load config");
//! validate_config(&config).expect("Invalid config");
//!
//! println!("Resolution: {} ms", config.simulation.resolution_ms);
//! println!("Min delay: {} steps", config.simulation.min_delay_steps);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "std")]
pub mod loader;

pub mod types;
pub mod validation;

#[cfg(feature = "std")]
pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_config};

pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Re-export for convenience
pub use serde;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[cfg(feature = "std")]
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[cfg(feature = "std")]
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "std")]
    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(feature = "std")]
impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
