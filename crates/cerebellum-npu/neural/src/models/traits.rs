// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Traits shared by all current → rate models

use core::fmt::Debug;

use crate::types::Result;

/// When a generator recomputes its rate from the accumulated current
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateUpdatePolicy {
    /// Once per step, and only when the drained current changed
    PerStep,
    /// Once at the end of every slice, from the slice-averaged current
    PerSlice,
}

/// Parameter set of a rate model
///
/// Parameters are addressed by name so that generators can expose them through
/// a key/value status interface. `set` never validates; callers set values on
/// a copy, call `validate`, and only then replace the live parameters.
pub trait ModelParameters: Debug + Clone + PartialEq + Send + Sync + 'static {
    /// Check the whole parameter set for consistency
    ///
    /// # Errors
    /// `DeviceError::BadProperty` describing the first violated constraint
    fn validate(&self) -> Result<()>;

    /// Names of all parameters, in reporting order
    fn parameter_names() -> &'static [&'static str];

    /// Read a parameter by name
    fn get(&self, name: &str) -> Option<f64>;

    /// Write a parameter by name; returns `false` for unknown names
    fn set(&mut self, name: &str, value: f64) -> bool;

    fn parameter_count() -> usize {
        Self::parameter_names().len()
    }
}

/// Current → rate mapping of a Poisson generator
pub trait RateModel: Debug + Clone + Copy + Default + Send + Sync + 'static {
    type Parameters: ModelParameters + Default;

    /// When the rate is recomputed
    const UPDATE_POLICY: RateUpdatePolicy;

    /// Whether the last drained current is part of the device state (`I`)
    const TRACKS_INPUT_CURRENT: bool;

    /// Device model name, e.g. `cd_poisson_generator`
    fn model_name(&self) -> &'static str;

    /// Instantaneous firing rate (Hz) for the given input current (nA)
    fn compute_rate(&self, current: f64, params: &Self::Parameters) -> f64;
}
