// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for device operations

use super::ids::DeviceId;
use super::time::Step;

/// Error types for device configuration, event handling and updates
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeviceError {
    /// A configuration value was rejected; live parameters are unchanged
    #[error("Bad property: {0}")]
    BadProperty(String),

    #[error("Unknown receptor type {receptor} for model {model}")]
    UnknownReceptorType { receptor: u32, model: &'static str },

    #[error("Unknown recordable '{name}' for model {model}")]
    UnknownRecordable { name: String, model: &'static str },

    #[error("Invalid update range [{from}, {to}) for min_delay {min_delay}")]
    InvalidSliceRange { from: Step, to: Step, min_delay: Step },

    #[error("Current event delay must be positive, got {0} steps")]
    NonPositiveDelay(Step),

    #[error("Delivery offset {offset} outside ring buffer of {capacity} slots")]
    OffsetOutOfRange { offset: Step, capacity: usize },

    #[error("Invalid resolution: {0} ms")]
    InvalidResolution(f64),

    #[error("Device not found: {0}")]
    DeviceNotFound(DeviceId),
}

pub type Result<T> = core::result::Result<T, DeviceError>;
