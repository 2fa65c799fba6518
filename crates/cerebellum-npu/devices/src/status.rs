// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Key/value status dictionaries
//!
//! Devices expose parameters and state as a JSON object map. Reads always
//! report every key; writes only touch the keys present.

use cerebellum_npu_neural::{DeviceError, Result};
use serde_json::{Map, Value};

pub type StatusDict = Map<String, Value>;

/// Well-known status keys
pub mod names {
    pub const RATE: &str = "rate";
    pub const INPUT_CURRENT: &str = "I";
    pub const MODEL: &str = "model";
    pub const RECORDABLES: &str = "recordables";
    pub const GLOBAL_ID: &str = "global_id";
}

/// Insert a numeric entry
#[inline]
pub fn def(dict: &mut StatusDict, key: &str, value: f64) {
    dict.insert(key.to_string(), Value::from(value));
}

/// Read a numeric entry if the key is present
///
/// # Errors
/// `BadProperty` if the key holds anything but a number
pub fn update_value(dict: &StatusDict, key: &str) -> Result<Option<f64>> {
    match dict.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| DeviceError::BadProperty(format!("{} must be a number, got {}.", key, value))),
    }
}
