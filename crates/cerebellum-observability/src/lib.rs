// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # cerebellum-observability
//!
//! Logging infrastructure shared by the cerebellum crates and tools.
//!
//! Provides consistent `tracing` setup with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: JSON log files in timestamped run folders with retention

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use config::*;
pub use init::*;

/// Known crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "cerebellum",
    "cerebellum-config",
    "cerebellum-npu-neural",
    "cerebellum-npu-devices",
];
