// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Device Types Module
//!
//! Core type definitions shared by the devices and their collaborators.

pub mod error;
pub mod events;
pub mod ids;
pub mod time;

// Re-export commonly used types
pub use error::{DeviceError, Result};
pub use events::{CurrentEvent, SpikeEvent};
pub use ids::{DeviceId, RECEPTOR_PORT};
pub use time::{Resolution, Step};
