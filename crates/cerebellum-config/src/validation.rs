//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! consistent and within valid ranges.

use crate::{CerebellumConfig, ConfigError, ConfigResult};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Kernel timing (resolution, delays, lanes)
/// - Required fields
/// - Generator default parameters
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation
pub fn validate_config(config: &CerebellumConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_simulation(config, &mut errors);
    validate_required_fields(config, &mut errors);
    validate_generator_defaults(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn invalid(field: &str, reason: &str) -> ConfigValidationError {
    ConfigValidationError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_simulation(config: &CerebellumConfig, errors: &mut Vec<ConfigValidationError>) {
    let sim = &config.simulation;

    if !sim.resolution_ms.is_finite() || sim.resolution_ms <= 0.0 {
        errors.push(invalid("simulation.resolution_ms", "must be positive"));
    }
    if sim.min_delay_steps < 1 {
        errors.push(invalid("simulation.min_delay_steps", "must be at least 1"));
    }
    if sim.max_delay_steps < sim.min_delay_steps {
        errors.push(invalid(
            "simulation.max_delay_steps",
            "must not be smaller than min_delay_steps",
        ));
    }
    if sim.worker_lanes == 0 {
        errors.push(invalid("simulation.worker_lanes", "must be at least 1"));
    }
}

fn validate_required_fields(config: &CerebellumConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.logging.level.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "logging.level".to_string(),
        });
    }
}

fn validate_generator_defaults(config: &CerebellumConfig, errors: &mut Vec<ConfigValidationError>) {
    let cd = &config.cd_poisson_generator;
    if cd.min_rate < 0.0 || cd.max_rate < 0.0 {
        errors.push(invalid(
            "cd_poisson_generator.min_rate/max_rate",
            "rates cannot be negative",
        ));
    }
    if cd.max_current <= cd.min_current {
        errors.push(invalid(
            "cd_poisson_generator.max_current",
            "must be strictly greater than min_current",
        ));
    }

    let rbf = &config.rbf_poisson_generator;
    if rbf.min_rate < 0.0 || rbf.max_rate < 0.0 || rbf.min_rate > rbf.max_rate {
        errors.push(invalid(
            "rbf_poisson_generator.min_rate/max_rate",
            "rates cannot be negative and min_rate cannot exceed max_rate",
        ));
    }
    if rbf.sigma_current <= 0.0 {
        errors.push(invalid("rbf_poisson_generator.sigma_current", "must be positive"));
    }
}
