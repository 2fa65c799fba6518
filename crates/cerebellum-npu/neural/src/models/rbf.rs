// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Gaussian (RBF) Rate Model
//!
//! Rate model of the `rbf_poisson_generator`. The generator acts as a
//! radial-basis-function unit tuned to `mean_current`.
//!
//! ## Model Dynamics
//!
//! ```text
//! Slice average:
//!     Ī = Σ drained currents over the slice / number of steps in the slice
//!
//! Rate mapping:
//!     g    = exp(-(Ī - μ)² / (2σ²))
//!     rate = r_min + g × (r_max - r_min)
//!
//! Update policy:
//!     Recomputed once at the end of every slice; the new rate drives the
//!     next slice.
//! ```

use super::traits::{ModelParameters, RateModel, RateUpdatePolicy};
use crate::types::{DeviceError, Result};

/// Gaussian tuning-curve current → rate model
#[derive(Debug, Clone, Copy)]
pub struct GaussianRateModel;

impl GaussianRateModel {
    /// Create a new Gaussian model instance
    pub fn new() -> Self {
        Self
    }

    /// Gaussian tuning term in `(0, 1]`
    #[inline]
    pub fn gaussian(current: f64, params: &GaussianRateParameters) -> f64 {
        let delta = current - params.mean_current;
        (-(delta * delta) / (2.0 * params.sigma_current * params.sigma_current)).exp()
    }
}

impl Default for GaussianRateModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RateModel for GaussianRateModel {
    type Parameters = GaussianRateParameters;

    const UPDATE_POLICY: RateUpdatePolicy = RateUpdatePolicy::PerSlice;
    const TRACKS_INPUT_CURRENT: bool = false;

    fn model_name(&self) -> &'static str {
        "rbf_poisson_generator"
    }

    #[inline]
    fn compute_rate(&self, current: f64, params: &GaussianRateParameters) -> f64 {
        params.min_rate + Self::gaussian(current, params) * (params.max_rate - params.min_rate)
    }
}

/// Gaussian model parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussianRateParameters {
    /// Rate (Hz) far away from `mean_current`
    pub min_rate: f64,
    /// Rate (Hz) at `mean_current`
    pub max_rate: f64,
    /// Preferred current (nA)
    pub mean_current: f64,
    /// Tuning width (nA)
    pub sigma_current: f64,
}

impl GaussianRateParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(min_rate: f64, max_rate: f64, mean_current: f64, sigma_current: f64) -> Self {
        Self {
            min_rate,
            max_rate,
            mean_current,
            sigma_current,
        }
    }
}

impl Default for GaussianRateParameters {
    fn default() -> Self {
        Self {
            min_rate: 1.0,      // Hz
            max_rate: 10.0,     // Hz
            mean_current: 0.0,  // nA
            sigma_current: 1.0, // nA
        }
    }
}

const GAUSSIAN_PARAMETER_NAMES: &[&str] = &["min_rate", "max_rate", "mean_current", "sigma_current"];

impl ModelParameters for GaussianRateParameters {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("min_rate", self.min_rate),
            ("max_rate", self.max_rate),
            ("mean_current", self.mean_current),
            ("sigma_current", self.sigma_current),
        ] {
            if !value.is_finite() {
                return Err(DeviceError::BadProperty(format!("{} must be finite.", name)));
            }
        }
        if self.min_rate < 0.0 || self.max_rate < 0.0 || self.min_rate > self.max_rate {
            return Err(DeviceError::BadProperty(
                "The min_rate and max_rate parameters cannot be negative and min_rate cannot exceed max_rate."
                    .to_string(),
            ));
        }
        if self.sigma_current <= 0.0 {
            return Err(DeviceError::BadProperty(
                "sigma_current must be positive.".to_string(),
            ));
        }
        Ok(())
    }

    fn parameter_names() -> &'static [&'static str] {
        GAUSSIAN_PARAMETER_NAMES
    }

    fn get(&self, name: &str) -> Option<f64> {
        match name {
            "min_rate" => Some(self.min_rate),
            "max_rate" => Some(self.max_rate),
            "mean_current" => Some(self.mean_current),
            "sigma_current" => Some(self.sigma_current),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, value: f64) -> bool {
        match name {
            "min_rate" => self.min_rate = value,
            "max_rate" => self.max_rate = value,
            "mean_current" => self.mean_current = value,
            "sigma_current" => self.sigma_current = value,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> GaussianRateParameters {
        GaussianRateParameters::with_values(1.0, 10.0, 0.0, 1.0)
    }

    #[test]
    fn test_peak_rate_at_mean_current() {
        let model = GaussianRateModel::new();
        assert_eq!(model.compute_rate(0.0, &params()), 10.0);
    }

    #[test]
    fn test_rate_approaches_min_far_from_mean() {
        let model = GaussianRateModel::new();
        let far = model.compute_rate(50.0, &params());
        assert!((far - 1.0).abs() < 1e-12);
        let far_negative = model.compute_rate(-50.0, &params());
        assert!((far_negative - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_one_sigma_away() {
        let model = GaussianRateModel::new();
        let expected = 1.0 + (-0.5f64).exp() * 9.0;
        assert!((model.compute_rate(1.0, &params()) - expected).abs() < 1e-12);
        assert!((model.compute_rate(-1.0, &params()) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_parameters_validation() {
        assert!(params().validate().is_ok());

        let negative = GaussianRateParameters::with_values(-1.0, 10.0, 0.0, 1.0);
        assert!(matches!(negative.validate(), Err(DeviceError::BadProperty(_))));

        let inverted = GaussianRateParameters::with_values(10.0, 1.0, 0.0, 1.0);
        assert!(inverted.validate().is_err());

        let zero_sigma = GaussianRateParameters::with_values(1.0, 10.0, 0.0, 0.0);
        assert!(zero_sigma.validate().is_err());

        let equal_rates = GaussianRateParameters::with_values(5.0, 5.0, 0.0, 1.0);
        assert!(equal_rates.validate().is_ok());
    }

    #[test]
    fn test_named_access() {
        let mut p = params();
        assert!(p.set("sigma_current", 0.5));
        assert_eq!(p.get("sigma_current"), Some(0.5));
        assert!(!p.set("min_current", 0.5));
    }
}
