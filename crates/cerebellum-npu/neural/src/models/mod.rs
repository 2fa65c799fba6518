// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Rate Model Architecture
//!
//! A rate model maps the current accumulated by a generator to an
//! instantaneous firing rate (Hz). Each model also declares *when* the rate is
//! recomputed: every step (linear) or once per processing slice (RBF).
//!
//! ## Adding a New Rate Model
//!
//! 1. Create `src/models/your_model.rs`
//! 2. Implement `ModelParameters` for its parameter struct
//! 3. Implement `RateModel`
//! 4. Add tests
//! 5. Export in `mod.rs`

pub mod linear;
pub mod rbf;
pub mod traits;

// Re-export core types
pub use linear::{LinearRateModel, LinearRateParameters};
pub use rbf::{GaussianRateModel, GaussianRateParameters};
pub use traits::{ModelParameters, RateModel, RateUpdatePolicy};
