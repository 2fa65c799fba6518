// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `cerebellum_configuration.toml`.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CerebellumConfig {
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
    pub cd_poisson_generator: CdPoissonGeneratorConfig,
    pub rbf_poisson_generator: RbfPoissonGeneratorConfig,
}

/// Discrete-time kernel configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Step size in milliseconds
    pub resolution_ms: f64,
    /// Minimum inter-device delay; also the length of a processing slice
    pub min_delay_steps: i64,
    /// Longest delay a current event may declare
    pub max_delay_steps: i64,
    /// Master seed for the per-lane random sources
    pub seed: u64,
    /// Number of independently seeded worker lanes
    pub worker_lanes: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            resolution_ms: 0.1,
            min_delay_steps: 10,
            max_delay_steps: 100,
            seed: 12345,
            worker_lanes: 1,
        }
    }
}

impl SimulationConfig {
    /// Ring buffer capacity needed to hold every in-flight current event
    pub fn buffer_capacity(&self) -> usize {
        (self.min_delay_steps.max(0) + self.max_delay_steps.max(0)).max(1) as usize
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive (trace, debug, info, warn, error)
    pub level: String,
    /// Base directory for per-run log folders (file logging only)
    pub log_dir: String,
    pub retention_days: u64,
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: "./logs".to_string(),
            retention_days: 30,
            retention_runs: 10,
        }
    }
}

/// Default parameters for new `cd_poisson_generator` devices
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CdPoissonGeneratorConfig {
    pub min_rate: f64,
    pub max_rate: f64,
    pub min_current: f64,
    pub max_current: f64,
}

impl Default for CdPoissonGeneratorConfig {
    fn default() -> Self {
        Self {
            min_rate: 1.0,
            max_rate: 10.0,
            min_current: 0.0,
            max_current: 1.0,
        }
    }
}

/// Default parameters for new `rbf_poisson_generator` devices
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RbfPoissonGeneratorConfig {
    pub min_rate: f64,
    pub max_rate: f64,
    pub mean_current: f64,
    pub sigma_current: f64,
}

impl Default for RbfPoissonGeneratorConfig {
    fn default() -> Self {
        Self {
            min_rate: 1.0,
            max_rate: 10.0,
            mean_current: 0.0,
            sigma_current: 1.0,
        }
    }
}
