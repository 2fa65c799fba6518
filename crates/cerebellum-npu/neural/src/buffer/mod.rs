// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Delayed input accumulation

pub mod ring;

pub use ring::RingBuffer;
