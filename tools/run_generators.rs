// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Drive both Poisson generators with a current ramp and report spike totals.
//!
//! Configuration comes from `cerebellum_configuration.toml` (if found), then
//! `CEREBELLUM_*` environment variables, then the flags below.
//!
//! ```text
//! run_generators --steps 20000 --ramp-start 0 --ramp-end 2 --blocks 8
//! run_generators --seed 7 --worker-lanes 4 --debug-cerebellum-npu-devices
//! ```

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use cerebellum_config::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    validate_config, CerebellumConfig,
};
use cerebellum_npu_devices::defaults::{gaussian_parameters, linear_parameters};
use cerebellum_npu_devices::{KernelConfig, LoggingRequest, SimulationKernel};
use cerebellum_npu_neural::{DeviceId, GaussianRateModel, LinearRateModel, Step};
use cerebellum_observability::{
    debug_flags_help, init_logging, parse_debug_flags, LogFormat, LoggingOptions,
};
use clap::{Parser, ValueEnum};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConsoleFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "run_generators",
    version,
    about = "Drive cd/rbf Poisson generators with a current ramp",
    after_help = debug_flags_help()
)]
struct Args {
    /// Configuration file (default: discovered cerebellum_configuration.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Total simulated steps
    #[arg(long, default_value_t = 10_000)]
    steps: u64,

    /// Current (nA) during the first ramp block
    #[arg(long, default_value_t = 0.0)]
    ramp_start: f64,

    /// Current (nA) during the last ramp block
    #[arg(long, default_value_t = 1.0)]
    ramp_end: f64,

    /// Number of constant-current blocks in the ramp
    #[arg(long, default_value_t = 10)]
    blocks: u64,

    /// Generators of each kind
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Recording interval in steps for the per-device rate trace (0 = off)
    #[arg(long, default_value_t = 0)]
    record_interval: Step,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    worker_lanes: Option<usize>,

    #[arg(long)]
    resolution_ms: Option<f64>,

    #[arg(long)]
    min_delay: Option<i64>,

    #[arg(long)]
    max_delay: Option<i64>,

    /// Default log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[arg(long, value_enum, default_value_t = ConsoleFormat::Text)]
    log_format: ConsoleFormat,
}

impl Args {
    fn overrides(&self) -> HashMap<String, String> {
        let mut cli = HashMap::new();
        let mut put = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                cli.insert(key.to_string(), value);
            }
        };
        put("seed", self.seed.map(|v| v.to_string()));
        put("worker_lanes", self.worker_lanes.map(|v| v.to_string()));
        put("resolution_ms", self.resolution_ms.map(|v| v.to_string()));
        put("min_delay", self.min_delay.map(|v| v.to_string()));
        put("max_delay", self.max_delay.map(|v| v.to_string()));
        put("log_level", self.log_level.clone());
        cli
    }
}

fn resolve_config(args: &Args) -> Result<CerebellumConfig> {
    let cli = args.overrides();
    let path = args.config.clone().or_else(|| find_config_file().ok());
    let config = match path {
        Some(path) => load_config(Some(path.as_path()), Some(&cli))
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => {
            let mut config = CerebellumConfig::default();
            apply_environment_overrides(&mut config);
            apply_cli_overrides(&mut config, &cli);
            config
        }
    };
    validate_config(&config).context("Invalid configuration")?;
    Ok(config)
}

fn ramp_amplitude(args: &Args, block: u64) -> f64 {
    if args.blocks <= 1 {
        return args.ramp_start;
    }
    let t = block as f64 / (args.blocks - 1) as f64;
    args.ramp_start + t * (args.ramp_end - args.ramp_start)
}

/// Hold `amplitude` on every device for `steps` steps
///
/// Before each slice, one event per upcoming step is scheduled so the drained
/// current stays constant across the block.
fn hold_current(kernel: &mut SimulationKernel, ids: &[DeviceId], amplitude: f64, steps: u64) -> Result<()> {
    let min_delay = kernel.config().min_delay;
    let mut remaining = steps;
    while remaining > 0 {
        let chunk = remaining.min(min_delay as u64);
        for &id in ids {
            for delay in 1..=chunk as Step {
                if let Err(e) = kernel.deliver_current(id, amplitude, 1.0, delay) {
                    warn!(device = %id, delay, error = %e, "current event dropped");
                }
            }
        }
        kernel.simulate(chunk)?;
        remaining -= chunk;
    }
    Ok(())
}

fn main() -> Result<()> {
    // --debug-* flags belong to the logging layer, not to clap
    let debug_flags = parse_debug_flags();
    let args = Args::parse_from(env::args().filter(|arg| !arg.starts_with("--debug-")));

    let config = resolve_config(&args)?;

    let options = LoggingOptions {
        level: config.logging.level.clone(),
        format: match args.log_format {
            ConsoleFormat::Text => LogFormat::Text,
            ConsoleFormat::Json => LogFormat::Json,
        },
        log_dir: cfg!(feature = "file-logging").then(|| PathBuf::from(&config.logging.log_dir)),
        retention_days: config.logging.retention_days,
        retention_runs: config.logging.retention_runs,
    };
    let _logging = init_logging(&debug_flags, &options)?;

    let kernel_config = KernelConfig::from_simulation(&config.simulation)?;
    let mut kernel = SimulationKernel::new(kernel_config);

    let linear = linear_parameters(&config.cd_poisson_generator)?;
    let gaussian = gaussian_parameters(&config.rbf_poisson_generator)?;
    let mut ids = Vec::with_capacity(args.count * 2);
    for _ in 0..args.count {
        ids.push(kernel.create::<LinearRateModel>(linear)?);
        ids.push(kernel.create::<GaussianRateModel>(gaussian)?);
    }

    if args.record_interval > 0 {
        let request = LoggingRequest::new(["rate"], args.record_interval);
        for &id in &ids {
            kernel.connect_logger(id, &request)?;
        }
    }

    info!(
        devices = ids.len(),
        steps = args.steps,
        blocks = args.blocks,
        seed = kernel_config.seed,
        "starting ramp"
    );

    let blocks = args.blocks.max(1);
    let per_block = args.steps / blocks;
    for block in 0..blocks {
        // Last block absorbs the remainder
        let steps = if block + 1 == blocks {
            args.steps - per_block * (blocks - 1)
        } else {
            per_block
        };
        let amplitude = ramp_amplitude(&args, block);
        hold_current(&mut kernel, &ids, amplitude, steps)?;
        debug!(block, amplitude, clock = kernel.clock(), "ramp block done");
    }

    let seconds = kernel_config.resolution.steps_to_ms(kernel.clock()) / 1000.0;
    println!(
        "{:<10} {:<24} {:>10} {:>14} {:>12}",
        "device", "model", "spikes", "mean rate(Hz)", "final rate"
    );
    for &id in &ids {
        let status = kernel.get_status(id)?;
        let model = status
            .get("model")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();
        let spikes = kernel.spike_count(id);
        let mean_rate = if seconds > 0.0 { spikes as f64 / seconds } else { 0.0 };
        println!(
            "{:<10} {:<24} {:>10} {:>14.2} {:>12.2}",
            id.to_string(),
            model,
            spikes,
            mean_rate,
            kernel.rate(id)?
        );

        if args.record_interval > 0 {
            for record in kernel.take_records(id)? {
                debug!(device = %id, step = record.step, rate = record.values[0], "rate sample");
            }
        }
    }

    Ok(())
}
