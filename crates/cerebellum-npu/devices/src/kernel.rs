// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Slice Scheduler
//!
//! Minimal driver for stimulation devices. Time advances in slices of
//! `min_delay` steps; each slice every device is updated over the same
//! `[from, to)` range.
//!
//! ```text
//! origin=0          origin=min_delay     origin=2·min_delay
//!   |---- slice 0 ----|---- slice 1 ----|-- partial --|
//! ```
//!
//! Devices are spread over `worker_lanes` lanes by creation order. A lane owns
//! one `StdRng` seeded from the master seed and its index, so spike trains
//! depend only on `(seed, worker_lanes)`, never on thread scheduling. Lanes
//! run in parallel with rayon; devices inside a lane run in creation order.

use ahash::AHashMap;
use cerebellum_config::SimulationConfig;
use cerebellum_npu_neural::{CurrentEvent, DeviceError, DeviceId, Resolution, SpikeEvent, Step};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::device::{Device, UpdateContext};
use crate::generator::PoissonGenerator;
use crate::logger::{LogRecord, LoggingRequest};
use crate::recordables::RecordableModel;
use crate::status::StatusDict;

// Golden-ratio increment decorrelating lane seeds
const LANE_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("Invalid kernel configuration: {0}")]
    InvalidConfig(String),

    #[error("Current delay {delay} exceeds max_delay {max_delay}")]
    DelayTooLong { delay: Step, max_delay: Step },
}

pub type Result<T> = std::result::Result<T, KernelError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConfig {
    pub resolution: Resolution,
    /// Slice length in steps
    pub min_delay: Step,
    pub max_delay: Step,
    pub seed: u64,
    pub worker_lanes: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            min_delay: 10,
            max_delay: 100,
            seed: 12345,
            worker_lanes: 1,
        }
    }
}

impl KernelConfig {
    /// Build from the `[simulation]` configuration section
    pub fn from_simulation(config: &SimulationConfig) -> Result<Self> {
        let resolution = Resolution::from_ms(config.resolution_ms)?;
        if config.min_delay_steps < 1 {
            return Err(KernelError::InvalidConfig(format!(
                "min_delay_steps must be at least 1, got {}",
                config.min_delay_steps
            )));
        }
        if config.max_delay_steps < config.min_delay_steps {
            return Err(KernelError::InvalidConfig(format!(
                "max_delay_steps ({}) must not be below min_delay_steps ({})",
                config.max_delay_steps, config.min_delay_steps
            )));
        }
        if config.worker_lanes == 0 {
            return Err(KernelError::InvalidConfig(
                "worker_lanes must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            resolution,
            min_delay: config.min_delay_steps,
            max_delay: config.max_delay_steps,
            seed: config.seed,
            worker_lanes: config.worker_lanes,
        })
    }

    /// Accumulator slots covering a full slice plus the longest delay
    pub fn buffer_capacity(&self) -> usize {
        (self.min_delay + self.max_delay).max(1) as usize
    }
}

#[derive(Debug)]
struct WorkerLane {
    rng: StdRng,
    devices: Vec<Box<dyn Device>>,
    spikes: Vec<SpikeEvent>,
}

impl WorkerLane {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            devices: Vec::new(),
            spikes: Vec::new(),
        }
    }

    fn update(&mut self, origin: Step, from: Step, to: Step, min_delay: Step) {
        let WorkerLane { rng, devices, spikes } = self;
        for device in devices.iter_mut() {
            let mut ctx = UpdateContext::new(&mut *rng, &mut *spikes, min_delay);
            if let Err(e) = device.update(&mut ctx, origin, from, to) {
                warn!(device = %device.id(), error = %e, "device update skipped");
            }
        }
    }
}

/// Owns devices and drives them slice by slice
#[derive(Debug)]
pub struct SimulationKernel {
    config: KernelConfig,
    lanes: Vec<WorkerLane>,
    // DeviceId → (lane, position in lane)
    index: AHashMap<DeviceId, (usize, usize)>,
    next_id: u32,
    clock: Step,
    origin: Step,
    spike_log: Vec<SpikeEvent>,
}

impl SimulationKernel {
    pub fn new(config: KernelConfig) -> Self {
        let worker_lanes = config.worker_lanes.max(1);
        let lanes = (0..worker_lanes)
            .map(|lane| WorkerLane::new(lane_seed(config.seed, lane)))
            .collect();
        info!(
            resolution_ms = config.resolution.ms(),
            min_delay = config.min_delay,
            max_delay = config.max_delay,
            worker_lanes,
            "simulation kernel created"
        );
        Self {
            config: KernelConfig {
                worker_lanes,
                ..config
            },
            lanes,
            index: AHashMap::new(),
            next_id: 1,
            clock: 0,
            origin: 0,
            spike_log: Vec::new(),
        }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Current absolute step
    pub fn clock(&self) -> Step {
        self.clock
    }

    /// Origin of the slice containing `clock`
    pub fn slice_origin(&self) -> Step {
        self.origin
    }

    pub fn device_count(&self) -> usize {
        self.index.len()
    }

    /// Ids of all devices, ascending
    pub fn device_ids(&self) -> Vec<DeviceId> {
        let mut ids: Vec<DeviceId> = self.index.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Create a Poisson generator with the given parameters
    pub fn create<M: RecordableModel>(&mut self, params: M::Parameters) -> Result<DeviceId> {
        let generator = PoissonGenerator::<M>::with_parameters(DeviceId::default(), params)?;
        Ok(self.add_device(Box::new(generator)))
    }

    /// Register a device; it receives the next id and fresh buffers
    ///
    /// The buffer window starts at the current slice origin, so a device
    /// added mid-run accepts every delay in `[1, max_delay]` right away.
    pub fn add_device(&mut self, mut device: Box<dyn Device>) -> DeviceId {
        let id = DeviceId(self.next_id);
        self.next_id += 1;

        device.set_id(id);
        device.init_buffers(self.config.buffer_capacity(), self.origin);
        device.save_state();
        device.calibrate(self.config.resolution);

        let lane = self.index.len() % self.lanes.len();
        let slot = self.lanes[lane].devices.len();
        debug!(device = %id, model = device.model_name(), lane, "device created");
        self.lanes[lane].devices.push(device);
        self.index.insert(id, (lane, slot));
        id
    }

    fn device(&self, id: DeviceId) -> Result<&dyn Device> {
        let &(lane, slot) = self.index.get(&id).ok_or(DeviceError::DeviceNotFound(id))?;
        Ok(self.lanes[lane].devices[slot].as_ref())
    }

    fn device_mut(&mut self, id: DeviceId) -> Result<&mut Box<dyn Device>> {
        let &(lane, slot) = self.index.get(&id).ok_or(DeviceError::DeviceNotFound(id))?;
        Ok(&mut self.lanes[lane].devices[slot])
    }

    pub fn get_status(&self, id: DeviceId) -> Result<StatusDict> {
        Ok(self.device(id)?.get_status())
    }

    pub fn set_status(&mut self, id: DeviceId, dict: &StatusDict) -> Result<()> {
        Ok(self.device_mut(id)?.set_status(dict)?)
    }

    pub fn rate(&self, id: DeviceId) -> Result<f64> {
        Ok(self.device(id)?.rate())
    }

    /// Attach a recorder to a device
    pub fn connect_logger(&mut self, id: DeviceId, request: &LoggingRequest) -> Result<u32> {
        Ok(self.device_mut(id)?.handles_logging_test_event(request)?)
    }

    /// Drain the rows recorded for a device
    pub fn take_records(&mut self, id: DeviceId) -> Result<Vec<LogRecord>> {
        Ok(self.device_mut(id)?.take_records())
    }

    /// Inject `weight * amplitude` into `target`, arriving `delay` steps from now
    ///
    /// # Errors
    /// - `DeviceNotFound` for an unknown target
    /// - `NonPositiveDelay` / `DelayTooLong` for a delay outside `[1, max_delay]`
    pub fn deliver_current(&mut self, target: DeviceId, amplitude: f64, weight: f64, delay: Step) -> Result<()> {
        if delay < 1 {
            return Err(DeviceError::NonPositiveDelay(delay).into());
        }
        if delay > self.config.max_delay {
            return Err(KernelError::DelayTooLong {
                delay,
                max_delay: self.config.max_delay,
            });
        }
        let event = CurrentEvent::new(amplitude, weight, self.clock, delay);
        let device = self.device_mut(target)?;
        device.handles_current_test_event(event.receptor)?;
        device.handle_current(&event)?;
        Ok(())
    }

    /// Advance the simulation by `steps` steps
    ///
    /// Devices are recalibrated first. A run starting at step 0 also marks
    /// the state that `reset` returns to. The last slice may end before its
    /// `min_delay` boundary; the next call resumes inside it.
    ///
    /// # Errors
    /// `InvalidConfig` if the clock would overflow `Step`
    pub fn simulate(&mut self, steps: u64) -> Result<()> {
        let steps = Step::try_from(steps)
            .ok()
            .filter(|steps| self.clock.checked_add(*steps).is_some())
            .ok_or_else(|| {
                KernelError::InvalidConfig(format!(
                    "cannot simulate {} steps from step {}",
                    steps, self.clock
                ))
            })?;

        let resolution = self.config.resolution;
        let run_start = self.clock == 0;
        for lane in &mut self.lanes {
            for device in &mut lane.devices {
                if run_start {
                    device.save_state();
                }
                device.calibrate(resolution);
            }
        }

        info!(
            from_ms = resolution.steps_to_ms(self.clock),
            to_ms = resolution.steps_to_ms(self.clock + steps),
            devices = self.device_count(),
            "simulating"
        );

        let min_delay = self.config.min_delay;
        let mut remaining = steps;
        while remaining > 0 {
            let origin = self.origin;
            let from = self.clock - origin;
            let to = (from + remaining).min(min_delay);

            self.lanes
                .par_iter_mut()
                .for_each(|lane| lane.update(origin, from, to, min_delay));

            let emitted_from = self.spike_log.len();
            for lane in &mut self.lanes {
                self.spike_log.append(&mut lane.spikes);
            }
            self.spike_log[emitted_from..].sort_by_key(|event| (event.stamp, event.sender));
            debug!(
                origin,
                from,
                to,
                events = self.spike_log.len() - emitted_from,
                "slice complete"
            );

            self.clock += to - from;
            remaining -= to - from;
            if to == min_delay {
                self.origin += min_delay;
            }
        }
        Ok(())
    }

    /// Rewind to step 0, dropping pending currents, recorded rows and spikes
    ///
    /// Device state returns to what it was when the run started, so the
    /// next `simulate` replays the previous one.
    pub fn reset(&mut self) {
        let capacity = self.config.buffer_capacity();
        for (lane_idx, lane) in self.lanes.iter_mut().enumerate() {
            lane.rng = StdRng::seed_from_u64(lane_seed(self.config.seed, lane_idx));
            lane.spikes.clear();
            for device in &mut lane.devices {
                device.init_buffers(capacity, 0);
                device.restore_state();
            }
        }
        self.clock = 0;
        self.origin = 0;
        self.spike_log.clear();
        info!("simulation kernel reset");
    }

    /// All spikes emitted so far, ordered by (stamp, sender)
    pub fn spike_log(&self) -> &[SpikeEvent] {
        &self.spike_log
    }

    pub fn take_spikes(&mut self) -> Vec<SpikeEvent> {
        std::mem::take(&mut self.spike_log)
    }

    /// Spikes (sum of multiplicities) emitted by `id`
    pub fn spike_count(&self, id: DeviceId) -> u64 {
        self.spike_log
            .iter()
            .filter(|event| event.sender == id)
            .map(|event| event.multiplicity as u64)
            .sum()
    }
}

fn lane_seed(seed: u64, lane: usize) -> u64 {
    seed ^ (lane as u64).wrapping_mul(LANE_SEED_STRIDE)
}
