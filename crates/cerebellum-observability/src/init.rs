// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output is always on. With the `file-logging` feature and a
//! `log_dir`, a JSON log file is also written into a timestamped run folder:
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       └── cerebellum.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingOptions};

/// Keeps background log writers alive; drop it last
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving log files, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Build the filter for the given flags and default level
pub fn build_env_filter(debug_flags: &CrateDebugFlags, options: &LoggingOptions) -> Result<EnvFilter> {
    let filter = debug_flags.to_filter_string(&options.level);
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter: {}", filter))
}

/// Initialize the global subscriber
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags for filtering
/// * `options` - Level, console format and file output settings
///
/// # Errors
/// Fails on an invalid filter, an unwritable log directory, or when a global
/// subscriber is already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, options: &LoggingOptions) -> Result<LoggingGuard> {
    let env_filter = build_env_filter(debug_flags, options)?;

    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer: BoxedLayer = match options.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(env_filter)
            .boxed(),
    };
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let (file_guards, log_dir) = match &options.log_dir {
        Some(base) => {
            let (layer, guard, run_folder) = file_layer(base, debug_flags, options)?;
            layers.push(layer);
            (vec![guard], Some(run_folder))
        }
        None => (Vec::new(), None),
    };
    #[cfg(not(feature = "file-logging"))]
    let log_dir = None;

    Registry::default()
        .with(layers)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir,
    })
}

/// Initialize console logging at the default level
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, &LoggingOptions::default())
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[cfg(feature = "file-logging")]
fn file_layer(
    base_log_dir: &Path,
    debug_flags: &CrateDebugFlags,
    options: &LoggingOptions,
) -> Result<(BoxedLayer, tracing_appender::non_blocking::WorkerGuard, PathBuf)> {
    use chrono::Utc;
    use tracing_appender::rolling;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let run_folder = base_log_dir.join(format!("run_{}", timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    cleanup_old_logs(base_log_dir, options.retention_days, options.retention_runs)?;

    let appender = rolling::daily(&run_folder, "cerebellum.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_filter(build_env_filter(debug_flags, options)?)
        .boxed();

    Ok((layer, guard, run_folder))
}

/// Remove run folders older than `retention_days`, then all but the newest
/// `retention_runs`
#[cfg(feature = "file-logging")]
pub fn cleanup_old_logs(base_log_dir: &Path, retention_days: u64, retention_runs: usize) -> Result<()> {
    use chrono::{NaiveDateTime, Utc};

    if !base_log_dir.exists() {
        return Ok(());
    }

    let cutoff = Utc::now().naive_utc() - chrono::Duration::days(retention_days as i64);

    let mut runs: Vec<(PathBuf, NaiveDateTime)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let stamp = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix("run_"))
            .and_then(|s| NaiveDateTime::parse_from_str(s, "%Y%m%d_%H%M%S").ok());
        if let Some(stamp) = stamp {
            runs.push((path, stamp));
        }
    }

    // Oldest first
    runs.sort_by_key(|(_, stamp)| *stamp);

    let mut kept: Vec<&PathBuf> = Vec::new();
    for (path, stamp) in &runs {
        if *stamp < cutoff {
            if let Err(e) = std::fs::remove_dir_all(path) {
                tracing::warn!("Failed to remove old log directory {}: {}", path.display(), e);
            }
        } else {
            kept.push(path);
        }
    }

    if kept.len() > retention_runs {
        let excess = kept.len() - retention_runs;
        for path in kept.into_iter().take(excess) {
            if let Err(e) = std::fs::remove_dir_all(path) {
                tracing::warn!("Failed to remove old log directory {}: {}", path.display(), e);
            }
        }
    }

    Ok(())
}
