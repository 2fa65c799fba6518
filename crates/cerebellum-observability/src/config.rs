//! Observability configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingOptions {
    /// Default level for crates without a debug flag (trace, debug, info, warn, error)
    pub level: String,

    /// Console format
    pub format: LogFormat,

    /// Base directory for run folders (used with the `file-logging` feature)
    pub log_dir: Option<PathBuf>,

    /// Keep run folders for N days
    pub retention_days: u64,

    /// Keep the N most recent run folders
    pub retention_runs: usize,
}

/// Log format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    Text,
    Json,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        LoggingOptions {
            level: "info".to_string(),
            format: LogFormat::Text,
            log_dir: None,
            retention_days: 30,
            retention_runs: 10,
        }
    }
}
