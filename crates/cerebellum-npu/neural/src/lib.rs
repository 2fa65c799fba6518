// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Cerebellum Neural Computation
//!
//! The building blocks of the current-driven stimulation devices:
//! - **Types**: Device ids, simulation time, spike/current events, errors
//! - **Buffer**: Offset-indexed ring buffer accumulating delayed currents
//! - **Models**: Current → rate mappings (linear saturation, Gaussian RBF)
//! - **Sampling**: Per-step Poisson spike counts
//!
//! Nothing here knows about scheduling or recording; those live in
//! `cerebellum-npu-devices`.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core type definitions
pub mod types;

// Delayed current accumulation
pub mod buffer;

// Current → rate models
pub mod models;

// Poisson spike counts
pub mod sampling;

// Re-export types
pub use types::{
    CurrentEvent, DeviceError, DeviceId, Resolution, Result, SpikeEvent, Step, RECEPTOR_PORT,
};

pub use buffer::RingBuffer;

// Re-export rate models
pub use models::{
    GaussianRateModel, GaussianRateParameters, LinearRateModel, LinearRateParameters,
    ModelParameters, RateModel, RateUpdatePolicy,
};

pub use sampling::PoissonSampler;
