// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Stochastic spike-count sampling

pub mod poisson;

pub use poisson::{rate_to_lambda, PoissonSampler};
