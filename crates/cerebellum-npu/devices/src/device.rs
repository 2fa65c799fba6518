// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Object-safe device interface used by the kernel

use core::fmt::Debug;

use cerebellum_npu_neural::{CurrentEvent, DeviceId, Resolution, Result, Step};
use rand::RngCore;

use crate::emitter::SpikeSink;
use crate::logger::{LogRecord, LoggingRequest};
use crate::status::StatusDict;

/// Everything a device borrows from its worker for one update call
pub struct UpdateContext<'a> {
    /// Random source of the calling worker lane
    pub rng: &'a mut dyn RngCore,
    /// Destination of emitted spikes
    pub spikes: &'a mut dyn SpikeSink,
    /// Slice length; `to` may not exceed it
    pub min_delay: Step,
}

impl<'a> UpdateContext<'a> {
    pub fn new(rng: &'a mut dyn RngCore, spikes: &'a mut dyn SpikeSink, min_delay: Step) -> Self {
        Self {
            rng,
            spikes,
            min_delay,
        }
    }
}

/// A stimulation device driven slice by slice
///
/// Lifecycle: `init_buffers` → `calibrate` → (`handle_current`* `update`)*.
/// `save_state` marks the state a run starts from; `restore_state` rewinds to it.
pub trait Device: Send + Debug {
    fn id(&self) -> DeviceId;

    fn set_id(&mut self, id: DeviceId);

    fn model_name(&self) -> &'static str;

    /// Accept an incoming current connection on `receptor`
    fn handles_current_test_event(&self, receptor: u32) -> Result<u32>;

    /// Attach a recording device
    fn handles_logging_test_event(&mut self, request: &LoggingRequest) -> Result<u32>;

    /// Size and clear the current accumulator with its window at `origin`,
    /// drop recorded rows
    fn init_buffers(&mut self, capacity: usize, origin: Step);

    fn save_state(&mut self);

    fn restore_state(&mut self);

    /// Re-derive rate and lambda for the given resolution
    fn calibrate(&mut self, resolution: Resolution);

    /// Schedule a weighted current contribution
    fn handle_current(&mut self, event: &CurrentEvent) -> Result<()>;

    /// Advance over steps `[from, to)` of the slice starting at `origin`
    fn update(&mut self, ctx: &mut UpdateContext<'_>, origin: Step, from: Step, to: Step) -> Result<()>;

    fn get_status(&self) -> StatusDict;

    /// Apply a status dictionary atomically
    fn set_status(&mut self, dict: &StatusDict) -> Result<()>;

    /// Current firing rate (Hz)
    fn rate(&self) -> f64;

    fn take_records(&mut self) -> Vec<LogRecord>;
}
