// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Discrete simulation time

use super::error::{DeviceError, Result};

/// Absolute or relative simulation step count.
///
/// Lags inside a slice, slice origins and event stamps are all expressed in
/// steps of the kernel resolution.
pub type Step = i64;

/// Duration of one simulation step in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution(f64);

impl Resolution {
    /// Create a resolution, rejecting non-positive or non-finite step sizes
    pub fn from_ms(ms: f64) -> Result<Self> {
        if !ms.is_finite() || ms <= 0.0 {
            return Err(DeviceError::InvalidResolution(ms));
        }
        Ok(Self(ms))
    }

    /// Step size in milliseconds
    #[inline]
    pub fn ms(&self) -> f64 {
        self.0
    }

    /// Convert a step count to milliseconds
    #[inline]
    pub fn steps_to_ms(&self, steps: Step) -> f64 {
        steps as f64 * self.0
    }
}

impl Default for Resolution {
    /// 0.1 ms, the usual kernel default
    fn default() -> Self {
        Self(0.1)
    }
}
