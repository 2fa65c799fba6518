// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Linear (Current-Driven) Rate Model
//!
//! Rate model of the `cd_poisson_generator`.
//!
//! ## Model Dynamics
//!
//! ```text
//! Rate mapping:
//!     I ≤ I_min:          rate = r_min
//!     I ≥ I_max:          rate = r_max
//!     otherwise:          rate = (I - I_min) / (I_max - I_min) × (r_max - r_min) + r_min
//!
//! Update policy:
//!     Recomputed once per step, only when the drained current differs from
//!     the previously stored one.
//! ```

use super::traits::{ModelParameters, RateModel, RateUpdatePolicy};
use crate::types::{DeviceError, Result};

/// Linear saturating current → rate model
#[derive(Debug, Clone, Copy)]
pub struct LinearRateModel;

impl LinearRateModel {
    /// Create a new linear model instance
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinearRateModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RateModel for LinearRateModel {
    type Parameters = LinearRateParameters;

    const UPDATE_POLICY: RateUpdatePolicy = RateUpdatePolicy::PerStep;
    const TRACKS_INPUT_CURRENT: bool = true;

    fn model_name(&self) -> &'static str {
        "cd_poisson_generator"
    }

    #[inline]
    fn compute_rate(&self, current: f64, params: &LinearRateParameters) -> f64 {
        if current <= params.min_current {
            params.min_rate
        } else if current >= params.max_current {
            params.max_rate
        } else {
            (current - params.min_current) / (params.max_current - params.min_current)
                * (params.max_rate - params.min_rate)
                + params.min_rate
        }
    }
}

/// Linear model parameters
///
/// `min_rate > max_rate` is allowed and gives a decreasing current → rate map.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearRateParameters {
    /// Rate (Hz) at and below `min_current`
    pub min_rate: f64,
    /// Rate (Hz) at and above `max_current`
    pub max_rate: f64,
    /// Lower end of the saturation interval (nA)
    pub min_current: f64,
    /// Upper end of the saturation interval (nA)
    pub max_current: f64,
}

impl LinearRateParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(min_rate: f64, max_rate: f64, min_current: f64, max_current: f64) -> Self {
        Self {
            min_rate,
            max_rate,
            min_current,
            max_current,
        }
    }
}

impl Default for LinearRateParameters {
    fn default() -> Self {
        Self {
            min_rate: 1.0,     // Hz
            max_rate: 10.0,    // Hz
            min_current: 0.0,  // nA
            max_current: 1.0,  // nA
        }
    }
}

const LINEAR_PARAMETER_NAMES: &[&str] = &["min_rate", "max_rate", "min_current", "max_current"];

impl ModelParameters for LinearRateParameters {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("min_rate", self.min_rate),
            ("max_rate", self.max_rate),
            ("min_current", self.min_current),
            ("max_current", self.max_current),
        ] {
            if !value.is_finite() {
                return Err(DeviceError::BadProperty(format!("{} must be finite.", name)));
            }
        }
        if self.min_rate < 0.0 || self.max_rate < 0.0 {
            return Err(DeviceError::BadProperty(
                "The min_rate and max_rate parameters cannot be negative.".to_string(),
            ));
        }
        // Zero-width interval would divide by zero in the interpolation
        if self.max_current <= self.min_current {
            return Err(DeviceError::BadProperty(
                "max_current must be strictly greater than min_current.".to_string(),
            ));
        }
        Ok(())
    }

    fn parameter_names() -> &'static [&'static str] {
        LINEAR_PARAMETER_NAMES
    }

    fn get(&self, name: &str) -> Option<f64> {
        match name {
            "min_rate" => Some(self.min_rate),
            "max_rate" => Some(self.max_rate),
            "min_current" => Some(self.min_current),
            "max_current" => Some(self.max_current),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, value: f64) -> bool {
        match name {
            "min_rate" => self.min_rate = value,
            "max_rate" => self.max_rate = value,
            "min_current" => self.min_current = value,
            "max_current" => self.max_current = value,
            _ => return false,
        }
        true
    }
}
