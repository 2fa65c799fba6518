//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-cerebellum-npu-devices` to raise the log level
//! of a single crate.

use std::collections::HashMap;
use std::env;

use crate::KNOWN_CRATES;

/// Parse debug flags from command-line arguments
///
/// # Example
/// ```rust
/// use cerebellum_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-cerebellum-config".to_string()]);
/// assert!(flags.is_enabled("cerebellum-config"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}` pattern.
    /// Also supports `--debug-all` to enable all crates.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut enabled_crates = HashMap::new();
        let mut debug_all = false;

        for arg in args {
            if arg == "--debug-all" {
                debug_all = true;
                continue;
            }

            if let Some(crate_name) = arg.strip_prefix("--debug-") {
                enabled_crates.insert(crate_name.to_string(), true);
            }
        }

        if debug_all {
            for crate_name in KNOWN_CRATES {
                enabled_crates.insert(crate_name.to_string(), true);
            }
        }

        CrateDebugFlags { enabled_crates }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains_key(crate_name)
    }

    /// Check if debug is enabled for any crate
    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// Get log level for a crate
    ///
    /// Returns `tracing::Level::DEBUG` if enabled, `tracing::Level::INFO` otherwise.
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Create a tracing filter from debug flags
    ///
    /// Crate names are converted to their module-path form (`-` → `_`) so the
    /// directives match event targets. `default_level` applies to everything
    /// else. Format: `cerebellum_npu_devices=debug,info`.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates
            .keys()
            .map(|crate_name| format!("{}=debug", crate_name.replace('-', "_")))
            .collect();
        filters.sort();
        filters.push(default_level.to_string());
        filters.join(",")
    }
}

/// Parse debug flags from the process arguments and environment
///
/// Checks both command-line arguments and the `CEREBELLUM_DEBUG` environment
/// variable (comma-separated crate names, or `all`).
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(env_var) = env::var("CEREBELLUM_DEBUG") {
        merge_env_flags(&mut flags, &env_var);
    }
    flags
}

fn merge_env_flags(flags: &mut CrateDebugFlags, env_var: &str) {
    if env_var == "all" {
        for crate_name in KNOWN_CRATES {
            flags.enabled_crates.insert(crate_name.to_string(), true);
        }
        return;
    }
    for crate_name in env_var.split(',') {
        let crate_name = crate_name.trim();
        if !crate_name.is_empty() {
            flags.enabled_crates.insert(crate_name.to_string(), true);
        }
    }
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  CEREBELLUM_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  CEREBELLUM_DEBUG=all                               Enable debug for all crates
"#,
        KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-cerebellum-config".to_string()]);
        assert!(flags.is_enabled("cerebellum-config"));
        assert!(!flags.is_enabled("cerebellum-npu-devices"));
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_non_flag_arguments_are_ignored() {
        let flags = CrateDebugFlags::from_args(vec![
            "run_generators".to_string(),
            "--steps".to_string(),
            "100".to_string(),
        ]);
        assert!(!flags.any_enabled());
    }

    #[test]
    fn test_filter_string_uses_module_paths() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-cerebellum-npu-devices".to_string()]);
        let filter = flags.to_filter_string("warn");
        assert_eq!(filter, "cerebellum_npu_devices=debug,warn");
    }

    #[test]
    fn test_empty_filter_string_is_default_level() {
        let flags = CrateDebugFlags::default();
        assert_eq!(flags.to_filter_string("info"), "info");
    }

    #[test]
    fn test_env_flags_merge() {
        let mut flags = CrateDebugFlags::default();
        merge_env_flags(&mut flags, "cerebellum-config, cerebellum-npu-neural,");
        assert!(flags.is_enabled("cerebellum-config"));
        assert!(flags.is_enabled("cerebellum-npu-neural"));
        assert_eq!(flags.enabled_crates.len(), 2);
    }

    #[test]
    fn test_log_level() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-cerebellum-config".to_string()]);
        assert_eq!(flags.log_level("cerebellum-config"), tracing::Level::DEBUG);
        assert_eq!(flags.log_level("cerebellum-npu-neural"), tracing::Level::INFO);
    }
}
