// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{CerebellumConfig, ConfigError, ConfigResult};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "cerebellum_configuration.toml";

/// Find the configuration file
///
/// Search order:
/// 1. `CEREBELLUM_CONFIG_PATH` environment variable
/// 2. Current working directory: `./cerebellum_configuration.toml`
/// 3. Parent directories (up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("CEREBELLUM_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by CEREBELLUM_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Configuration file '{}' not found in any of these locations:\n{}\n\nSet CEREBELLUM_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML.
/// Value validation is left to [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<CerebellumConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: CerebellumConfig = toml::from_str(&content)?;

    // Apply overrides in order
    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `CEREBELLUM_RESOLUTION_MS` -> `simulation.resolution_ms`
/// - `CEREBELLUM_MIN_DELAY` -> `simulation.min_delay_steps`
/// - `CEREBELLUM_MAX_DELAY` -> `simulation.max_delay_steps`
/// - `CEREBELLUM_SEED` -> `simulation.seed`
/// - `CEREBELLUM_WORKER_LANES` -> `simulation.worker_lanes`
/// - `CEREBELLUM_LOG_LEVEL` -> `logging.level`
///
/// Values that fail to parse are ignored.
pub fn apply_environment_overrides(config: &mut CerebellumConfig) {
    if let Ok(value) = env::var("CEREBELLUM_RESOLUTION_MS") {
        if let Ok(ms) = value.parse::<f64>() {
            config.simulation.resolution_ms = ms;
        }
    }
    if let Ok(value) = env::var("CEREBELLUM_MIN_DELAY") {
        if let Ok(steps) = value.parse::<i64>() {
            config.simulation.min_delay_steps = steps;
        }
    }
    if let Ok(value) = env::var("CEREBELLUM_MAX_DELAY") {
        if let Ok(steps) = value.parse::<i64>() {
            config.simulation.max_delay_steps = steps;
        }
    }
    if let Ok(value) = env::var("CEREBELLUM_SEED") {
        if let Ok(seed) = value.parse::<u64>() {
            config.simulation.seed = seed;
        }
    }
    if let Ok(value) = env::var("CEREBELLUM_WORKER_LANES") {
        if let Ok(lanes) = value.parse::<usize>() {
            config.simulation.worker_lanes = lanes;
        }
    }
    if let Ok(value) = env::var("CEREBELLUM_LOG_LEVEL") {
        config.logging.level = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"seed": "7", "min_delay": "5"}`)
pub fn apply_cli_overrides(config: &mut CerebellumConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("resolution_ms") {
        if let Ok(ms) = value.parse::<f64>() {
            config.simulation.resolution_ms = ms;
        }
    }
    if let Some(value) = cli_args.get("min_delay") {
        if let Ok(steps) = value.parse::<i64>() {
            config.simulation.min_delay_steps = steps;
        }
    }
    if let Some(value) = cli_args.get("max_delay") {
        if let Ok(steps) = value.parse::<i64>() {
            config.simulation.max_delay_steps = steps;
        }
    }
    if let Some(value) = cli_args.get("seed") {
        if let Ok(seed) = value.parse::<u64>() {
            config.simulation.seed = seed;
        }
    }
    if let Some(value) = cli_args.get("worker_lanes") {
        if let Ok(lanes) = value.parse::<usize>() {
            config.simulation.worker_lanes = lanes;
        }
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("CEREBELLUM_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("CEREBELLUM_CONFIG_PATH");

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing_file() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("does_not_exist.toml");

        env::set_var("CEREBELLUM_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("CEREBELLUM_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::remove_var("CEREBELLUM_MIN_DELAY");
        env::remove_var("CEREBELLUM_SEED");
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[simulation]").unwrap();
        writeln!(file, "min_delay_steps = 4").unwrap();
        writeln!(file, "[rbf_poisson_generator]").unwrap();
        writeln!(file, "sigma_current = 0.25").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.simulation.min_delay_steps, 4);
        assert_eq!(config.simulation.seed, 12345);
        assert_eq!(config.rbf_poisson_generator.sigma_current, 0.25);
        assert_eq!(config.rbf_poisson_generator.max_rate, 10.0);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[simulation").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = CerebellumConfig::default();

        env::set_var("CEREBELLUM_RESOLUTION_MS", "0.5");
        env::set_var("CEREBELLUM_SEED", "99");
        env::set_var("CEREBELLUM_WORKER_LANES", "not-a-number");

        apply_environment_overrides(&mut config);

        env::remove_var("CEREBELLUM_RESOLUTION_MS");
        env::remove_var("CEREBELLUM_SEED");
        env::remove_var("CEREBELLUM_WORKER_LANES");

        assert_eq!(config.simulation.resolution_ms, 0.5);
        assert_eq!(config.simulation.seed, 99);
        assert_eq!(config.simulation.worker_lanes, 1);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = CerebellumConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("min_delay".to_string(), "3".to_string());
        cli_args.insert("log_level".to_string(), "debug".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.simulation.min_delay_steps, 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        // CLI overrides take precedence over environment variables
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[simulation]").unwrap();
        writeln!(file, "seed = 1").unwrap();
        writeln!(file, "min_delay_steps = 8").unwrap();

        env::set_var("CEREBELLUM_SEED", "2");
        env::set_var("CEREBELLUM_MIN_DELAY", "6");

        let mut cli_args = HashMap::new();
        cli_args.insert("seed".to_string(), "3".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("CEREBELLUM_SEED");
        env::remove_var("CEREBELLUM_MIN_DELAY");

        // CLI wins for seed, env wins for min delay (no CLI override)
        assert_eq!(config.simulation.seed, 3);
        assert_eq!(config.simulation.min_delay_steps, 6);
    }
}
