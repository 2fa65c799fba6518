// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Cerebellum - Current-Driven Poisson Stimulation
//!
//! Spike generators that turn an accumulated input current into an
//! inhomogeneous Poisson spike train, for driving cerebellar network models.
//!
//! | Device                  | Current → rate                     |
//! |-------------------------|------------------------------------|
//! | `cd_poisson_generator`  | linear, saturating at both ends    |
//! | `rbf_poisson_generator` | Gaussian tuning of the slice mean  |
//!
//! ## Quick Start
//!
//! ```rust
//! use cerebellum::prelude::*;
//!
//! let mut kernel = SimulationKernel::new(KernelConfig::default());
//! let cd = kernel.create::<LinearRateModel>(LinearRateParameters::default())?;
//! let rbf = kernel.create::<GaussianRateModel>(GaussianRateParameters::default())?;
//!
//! kernel.deliver_current(cd, 0.5, 1.0, 1)?;
//! kernel.deliver_current(rbf, 0.5, 1.0, 1)?;
//! kernel.simulate(1_000)?;
//!
//! println!("cd spikes: {}", kernel.spike_count(cd));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: cerebellum-config, cerebellum-observability│
//! │  (TOML + env + CLI configuration, tracing setup)        │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Core: cerebellum-npu-neural                            │
//! │  (rate models, Poisson sampler, ring buffer, events)    │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Devices: cerebellum-npu-devices                        │
//! │  (generators, status, data logger, slice scheduler)     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

pub use cerebellum_config as config;
pub use cerebellum_npu_devices as devices;
pub use cerebellum_npu_neural as neural;
pub use cerebellum_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::neural::{
        CurrentEvent, DeviceError, DeviceId, GaussianRateModel, GaussianRateParameters,
        LinearRateModel, LinearRateParameters, ModelParameters, RateModel, Resolution, SpikeEvent,
        Step,
    };

    pub use crate::devices::{
        CdPoissonGenerator, Device, KernelConfig, KernelError, LoggingRequest, RbfPoissonGenerator,
        SimulationKernel, StatusDict, UpdateContext,
    };

    pub use crate::config::{load_config, validate_config, CerebellumConfig};
}
