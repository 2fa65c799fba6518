// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Current-Driven Poisson Generator
//!
//! One device type generic over its current → rate model:
//!
//! | Alias                 | Model               | Rate recomputed          |
//! |-----------------------|---------------------|--------------------------|
//! | `CdPoissonGenerator`  | `LinearRateModel`   | per step, on change of I |
//! | `RbfPoissonGenerator` | `GaussianRateModel` | per slice, from mean I   |
//!
//! Per step the generator drains its current accumulator, draws
//! `n ~ Poisson(λ)` and emits one spike event with multiplicity `n` when
//! `n > 0`. Steps with a zero draw emit nothing.

use cerebellum_npu_neural::{
    CurrentEvent, DeviceError, DeviceId, GaussianRateModel, LinearRateModel, ModelParameters,
    PoissonSampler, RateModel, RateUpdatePolicy, Resolution, Result, RingBuffer, SpikeEvent, Step,
    RECEPTOR_PORT,
};
use serde_json::Value;
use tracing::{debug, trace};

use crate::device::{Device, UpdateContext};
use crate::logger::{DataLogger, LogRecord, LoggingRequest};
use crate::recordables::RecordableModel;
use crate::status::{self, names, StatusDict};

/// Linear current → rate generator (`cd_poisson_generator`)
pub type CdPoissonGenerator = PoissonGenerator<LinearRateModel>;

/// Gaussian current → rate generator (`rbf_poisson_generator`)
pub type RbfPoissonGenerator = PoissonGenerator<GaussianRateModel>;

/// Mutable device state, read by recordables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorState {
    /// Instantaneous firing rate (Hz)
    pub rate: f64,
    /// Last drained current (nA); only meaningful for models that track it
    pub input_current: f64,
}

impl GeneratorState {
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    #[inline]
    pub fn input_current(&self) -> f64 {
        self.input_current
    }
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self {
            rate: 5.0,          // Hz
            input_current: 0.0, // nA
        }
    }
}

// Derived quantities, never configured directly
#[derive(Debug, Clone, Default)]
struct Variables {
    sampler: PoissonSampler,
    slice_average: f64,
}

#[derive(Debug, Clone)]
pub struct PoissonGenerator<M: RecordableModel> {
    id: DeviceId,
    model: M,
    params: M::Parameters,
    state: GeneratorState,
    // State at the start of the current run
    saved_state: GeneratorState,
    vars: Variables,
    currents: RingBuffer,
    logger: DataLogger,
    resolution: Resolution,
}

impl<M: RecordableModel> Default for PoissonGenerator<M> {
    fn default() -> Self {
        Self::new(DeviceId::default())
    }
}

impl<M: RecordableModel> PoissonGenerator<M> {
    /// Generator with default parameters and state
    pub fn new(id: DeviceId) -> Self {
        Self {
            id,
            model: M::default(),
            params: M::Parameters::default(),
            state: GeneratorState::default(),
            saved_state: GeneratorState::default(),
            vars: Variables::default(),
            currents: RingBuffer::default(),
            logger: DataLogger::new(),
            resolution: Resolution::default(),
        }
    }

    /// Generator with validated parameters
    ///
    /// # Errors
    /// `BadProperty` if `params` fail validation
    pub fn with_parameters(id: DeviceId, params: M::Parameters) -> Result<Self> {
        params.validate()?;
        let mut generator = Self::new(id);
        generator.params = params;
        Ok(generator)
    }

    pub fn parameters(&self) -> &M::Parameters {
        &self.params
    }

    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    /// Expected spike count per step
    pub fn lambda(&self) -> f64 {
        self.vars.sampler.lambda()
    }

    /// Mean drained current of the last completed update (per-slice models)
    pub fn slice_average(&self) -> f64 {
        self.vars.slice_average
    }

    pub fn logger(&self) -> &DataLogger {
        &self.logger
    }

    /// Copy state from a prototype device
    pub fn init_state(&mut self, prototype: &Self) {
        self.state = prototype.state;
    }

    fn refresh_rate(&mut self, current: f64) {
        self.state.rate = self.model.compute_rate(current, &self.params);
        self.vars.sampler.set_rate(self.state.rate, self.resolution);
    }

    // Draw and emit for one step; returns the drawn count
    #[inline]
    fn emit(&self, ctx: &mut UpdateContext<'_>, origin: Step, lag: Step) -> u32 {
        if self.state.rate <= 0.0 {
            return 0;
        }
        let n = self.vars.sampler.sample(&mut *ctx.rng);
        if n > 0 {
            trace!(device = %self.id, step = origin + lag, multiplicity = n, "spike");
            ctx.spikes.send(SpikeEvent::new(self.id, origin, lag, n));
        }
        n
    }

    fn update_per_step(&mut self, ctx: &mut UpdateContext<'_>, origin: Step, from: Step, to: Step) -> u64 {
        let mut spikes = 0u64;
        for lag in from..to {
            let current = self.currents.get_value(lag);
            // Exact comparison: recompute only when the drained value moved
            if current != self.state.input_current {
                self.state.input_current = current;
                self.refresh_rate(current);
            }
            spikes += self.emit(ctx, origin, lag) as u64;
            self.logger.record_data(origin + lag, &self.state);
        }
        spikes
    }

    fn update_per_slice(&mut self, ctx: &mut UpdateContext<'_>, origin: Step, from: Step, to: Step) -> u64 {
        let mut spikes = 0u64;
        let mut current_sum = 0.0;
        // Steps of this slice still use the λ of the previous slice
        for lag in from..to {
            current_sum += self.currents.get_value(lag);
            spikes += self.emit(ctx, origin, lag) as u64;
            self.logger.record_data(origin + lag, &self.state);
        }
        let average = current_sum / (to - from) as f64;
        self.vars.slice_average = average;
        self.refresh_rate(average);
        spikes
    }
}

impl<M: RecordableModel> Device for PoissonGenerator<M> {
    fn id(&self) -> DeviceId {
        self.id
    }

    fn set_id(&mut self, id: DeviceId) {
        self.id = id;
    }

    fn model_name(&self) -> &'static str {
        self.model.model_name()
    }

    fn handles_current_test_event(&self, receptor: u32) -> Result<u32> {
        if receptor != RECEPTOR_PORT {
            return Err(DeviceError::UnknownReceptorType {
                receptor,
                model: self.model_name(),
            });
        }
        Ok(RECEPTOR_PORT)
    }

    fn handles_logging_test_event(&mut self, request: &LoggingRequest) -> Result<u32> {
        let model = self.model_name();
        self.logger.connect_logging_device(request, M::recordables(), model)
    }

    fn init_buffers(&mut self, capacity: usize, origin: Step) {
        self.currents.resize(capacity);
        self.currents.advance_to(origin);
        self.logger.init();
    }

    fn save_state(&mut self) {
        self.saved_state = self.state;
    }

    fn restore_state(&mut self) {
        self.state = self.saved_state;
        self.vars = Variables::default();
    }

    fn calibrate(&mut self, resolution: Resolution) {
        self.resolution = resolution;
        if M::TRACKS_INPUT_CURRENT {
            self.state.rate = self.model.compute_rate(self.state.input_current, &self.params);
        }
        self.vars.sampler.set_rate(self.state.rate, resolution);
        debug!(
            device = %self.id,
            model = self.model_name(),
            rate = self.state.rate,
            lambda = self.vars.sampler.lambda(),
            "calibrated"
        );
    }

    fn handle_current(&mut self, event: &CurrentEvent) -> Result<()> {
        if event.receptor != RECEPTOR_PORT {
            return Err(DeviceError::UnknownReceptorType {
                receptor: event.receptor,
                model: self.model_name(),
            });
        }
        if event.delay_steps < 1 {
            return Err(DeviceError::NonPositiveDelay(event.delay_steps));
        }
        let offset = event.rel_delivery_steps(self.currents.origin());
        self.currents.add_value(offset, event.weighted_current())
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>, origin: Step, from: Step, to: Step) -> Result<()> {
        if from < 0 || to <= from || to > ctx.min_delay {
            return Err(DeviceError::InvalidSliceRange {
                from,
                to,
                min_delay: ctx.min_delay,
            });
        }
        self.currents.advance_to(origin);

        let spikes = match M::UPDATE_POLICY {
            RateUpdatePolicy::PerStep => self.update_per_step(ctx, origin, from, to),
            RateUpdatePolicy::PerSlice => self.update_per_slice(ctx, origin, from, to),
        };

        // Slice complete: the next one starts min_delay steps later
        if to == ctx.min_delay {
            self.currents.advance_to(origin + ctx.min_delay);
        }

        debug!(
            device = %self.id,
            origin,
            from,
            to,
            spikes,
            rate = self.state.rate,
            "slice updated"
        );
        Ok(())
    }

    fn get_status(&self) -> StatusDict {
        let mut dict = StatusDict::new();
        for name in <M::Parameters as ModelParameters>::parameter_names() {
            if let Some(value) = self.params.get(name) {
                status::def(&mut dict, name, value);
            }
        }
        status::def(&mut dict, names::RATE, self.state.rate);
        if M::TRACKS_INPUT_CURRENT {
            status::def(&mut dict, names::INPUT_CURRENT, self.state.input_current);
        }
        dict.insert(names::MODEL.to_string(), Value::from(self.model_name()));
        dict.insert(
            names::RECORDABLES.to_string(),
            Value::from(M::recordables().names().to_vec()),
        );
        dict.insert(names::GLOBAL_ID.to_string(), Value::from(self.id.0));
        dict
    }

    fn set_status(&mut self, dict: &StatusDict) -> Result<()> {
        let mut params = self.params.clone();
        for name in <M::Parameters as ModelParameters>::parameter_names() {
            if let Some(value) = status::update_value(dict, name)? {
                params.set(name, value);
            }
        }
        params.validate()?;

        let mut state = self.state;
        if let Some(rate) = status::update_value(dict, names::RATE)? {
            if !rate.is_finite() || rate < 0.0 {
                return Err(DeviceError::BadProperty(
                    "The rate cannot be negative.".to_string(),
                ));
            }
            state.rate = rate;
        }
        if M::TRACKS_INPUT_CURRENT {
            if let Some(current) = status::update_value(dict, names::INPUT_CURRENT)? {
                if !current.is_finite() {
                    return Err(DeviceError::BadProperty("I must be finite.".to_string()));
                }
                state.input_current = current;
            }
        }

        // All checks passed
        self.params = params;
        self.state = state;
        self.vars.sampler.set_rate(self.state.rate, self.resolution);
        Ok(())
    }

    fn rate(&self) -> f64 {
        self.state.rate
    }

    fn take_records(&mut self) -> Vec<LogRecord> {
        self.logger.take_records()
    }
}
