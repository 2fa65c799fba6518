// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Cerebellum Stimulation Devices
//!
//! Current-driven Poisson spike generators and the machinery around them:
//! - **Generator**: `PoissonGenerator<M>` shared by both rate models
//!   (`cd_poisson_generator`, `rbf_poisson_generator`)
//! - **Status**: key/value get/set with validate-then-commit
//! - **Recordables / Logger**: read-only state accessors and per-step rows
//! - **Kernel**: slice scheduler with one seeded RNG per worker lane
//!
//! ## Example
//! ```rust
//! use cerebellum_npu_devices::{CdPoissonGenerator, SimulationKernel, KernelConfig};
//! use cerebellum_npu_neural::LinearRateParameters;
//!
//! let mut kernel = SimulationKernel::new(KernelConfig::default());
//! let id = kernel.create::<cerebellum_npu_neural::LinearRateModel>(LinearRateParameters::default()).unwrap();
//! kernel.deliver_current(id, 0.5, 1.0, 1).unwrap();
//! kernel.simulate(100).unwrap();
//! assert!(kernel.get_status(id).unwrap().contains_key("rate"));
//! # let _ = CdPoissonGenerator::default();
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod defaults;
pub mod device;
pub mod emitter;
pub mod generator;
pub mod kernel;
pub mod logger;
pub mod recordables;
pub mod status;

pub use device::{Device, UpdateContext};
pub use emitter::{SpikeCounter, SpikeSink};
pub use generator::{CdPoissonGenerator, GeneratorState, PoissonGenerator, RbfPoissonGenerator};
pub use kernel::{KernelConfig, KernelError, SimulationKernel};
pub use logger::{DataLogger, LogRecord, LoggingRequest};
pub use recordables::{RecordableAccessor, RecordableModel, RecordablesMap};
pub use status::StatusDict;
