// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Events crossing the device boundary
//!
//! Inbound currents arrive as [`CurrentEvent`]s and are accumulated into the
//! device ring buffer. Outbound spikes leave as [`SpikeEvent`]s, at most one
//! per device and step.

use super::ids::{DeviceId, RECEPTOR_PORT};
use super::time::Step;

/// Weighted current contribution scheduled for delivery after a delay
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrentEvent {
    /// Current amplitude (nA)
    pub amplitude: f64,
    /// Connection weight applied to the amplitude
    pub weight: f64,
    /// Step at which the event was emitted
    pub stamp: Step,
    /// Declared transmission delay in steps (must be positive)
    pub delay_steps: Step,
    /// Receptor port on the receiving device
    pub receptor: u32,
}

impl CurrentEvent {
    pub fn new(amplitude: f64, weight: f64, stamp: Step, delay_steps: Step) -> Self {
        Self {
            amplitude,
            weight,
            stamp,
            delay_steps,
            receptor: RECEPTOR_PORT,
        }
    }

    /// Absolute step at which the contribution becomes visible
    #[inline]
    pub fn delivery_step(&self) -> Step {
        self.stamp + self.delay_steps
    }

    /// Contribution added to the accumulator: `weight × amplitude`
    #[inline]
    pub fn weighted_current(&self) -> f64 {
        self.weight * self.amplitude
    }

    /// Delivery offset relative to a slice origin
    #[inline]
    pub fn rel_delivery_steps(&self, slice_origin: Step) -> Step {
        self.delivery_step() - slice_origin
    }
}

/// A single spike event standing for `multiplicity` simultaneous spikes.
///
/// Generators never emit an event with multiplicity 0; `n` spikes within one
/// step are coalesced into one event with `multiplicity == n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpikeEvent {
    pub sender: DeviceId,
    /// Lag within the slice the spike was generated in
    pub lag: Step,
    /// Absolute step (slice origin + lag)
    pub stamp: Step,
    pub multiplicity: u32,
}

impl SpikeEvent {
    pub fn new(sender: DeviceId, slice_origin: Step, lag: Step, multiplicity: u32) -> Self {
        Self {
            sender,
            lag,
            stamp: slice_origin + lag,
            multiplicity,
        }
    }
}
