// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Current Ring Buffer
//!
//! Fixed-capacity accumulator for weighted current contributions, indexed by
//! step offset relative to the current slice origin.
//!
//! ```text
//!   origin                     origin + capacity - 1
//!     │                                  │
//!     ▼                                  ▼
//!   [ s0 | s1 | s2 | ... | s(cap-1) ]  (rotates as the origin advances)
//!     ▲
//!    head
//! ```
//!
//! - `add_value(offset, v)` sums into slot `origin + offset`
//! - `get_value(lag)` returns and clears slot `origin + lag`
//! - `advance_to(origin)` moves the window forward, clearing slots it passes
//!
//! Capacity must cover `min_delay + max_delay` steps so that an event emitted
//! anywhere in a slice with the longest delay still lands inside the window.

use crate::types::{DeviceError, Result, Step};

#[derive(Debug, Clone)]
pub struct RingBuffer {
    slots: Vec<f64>,
    head: usize,
    origin: Step,
}

impl RingBuffer {
    /// Create an empty buffer with `capacity` slots (at least one)
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![0.0; capacity.max(1)],
            head: 0,
            origin: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Absolute step of offset 0
    #[inline]
    pub fn origin(&self) -> Step {
        self.origin
    }

    #[inline]
    fn slot(&self, offset: Step) -> usize {
        (self.head + offset as usize) % self.slots.len()
    }

    /// Add `value` to the slot `offset` steps after the origin
    ///
    /// Contributions landing on the same offset are summed.
    ///
    /// # Errors
    /// `OffsetOutOfRange` if `offset` is negative or not below `capacity`
    pub fn add_value(&mut self, offset: Step, value: f64) -> Result<()> {
        if offset < 0 || offset as usize >= self.slots.len() {
            return Err(DeviceError::OffsetOutOfRange {
                offset,
                capacity: self.slots.len(),
            });
        }
        let idx = self.slot(offset);
        self.slots[idx] += value;
        Ok(())
    }

    /// Drain the slot at `lag` steps after the origin
    ///
    /// Returns the accumulated value (0.0 if nothing arrived) and clears the
    /// slot for reuse. `lag` must lie in `[0, capacity)`; callers obtain it
    /// from a validated update range.
    #[inline]
    pub fn get_value(&mut self, lag: Step) -> f64 {
        let idx = (self.head as Step + lag).rem_euclid(self.slots.len() as Step) as usize;
        core::mem::take(&mut self.slots[idx])
    }

    /// Read a slot without draining it
    #[inline]
    pub fn peek_value(&self, lag: Step) -> f64 {
        let idx = (self.head as Step + lag).rem_euclid(self.slots.len() as Step) as usize;
        self.slots[idx]
    }

    /// Move the window origin forward to `origin`
    ///
    /// Slots that fall behind the new origin are cleared. Moving backwards
    /// is a no-op.
    pub fn advance_to(&mut self, origin: Step) {
        if origin <= self.origin {
            return;
        }
        let steps = (origin - self.origin) as u64;
        if steps >= self.slots.len() as u64 {
            self.slots.iter_mut().for_each(|s| *s = 0.0);
            self.head = 0;
        } else {
            for _ in 0..steps {
                self.slots[self.head] = 0.0;
                self.head = (self.head + 1) % self.slots.len();
            }
        }
        self.origin = origin;
    }

    /// Drop all pending contributions and rewind the origin to step 0
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = 0.0);
        self.head = 0;
        self.origin = 0;
    }

    /// Change capacity; pending contributions are discarded
    pub fn resize(&mut self, capacity: usize) {
        self.slots = vec![0.0; capacity.max(1)];
        self.head = 0;
        self.origin = 0;
    }
}

impl Default for RingBuffer {
    fn default() -> Self {
        Self::new(1)
    }
}
