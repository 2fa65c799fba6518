// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-device data logger
//!
//! A recording device connects with a [`LoggingRequest`]; afterwards the
//! generator calls [`DataLogger::record_data`] once per step and the logger
//! keeps one row per recording interval.

use cerebellum_npu_neural::{DeviceError, Result, Step, RECEPTOR_PORT};

use crate::generator::GeneratorState;
use crate::recordables::{RecordableAccessor, RecordablesMap};

/// What a recording device wants to sample
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingRequest {
    pub recordables: Vec<String>,
    /// Steps between rows (at least 1)
    pub interval_steps: Step,
    pub receptor: u32,
}

impl LoggingRequest {
    pub fn new<S: Into<String>>(recordables: impl IntoIterator<Item = S>, interval_steps: Step) -> Self {
        Self {
            recordables: recordables.into_iter().map(Into::into).collect(),
            interval_steps,
            receptor: RECEPTOR_PORT,
        }
    }
}

/// One recorded row
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub step: Step,
    /// Values in the order of the request's recordables
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct DataLogger {
    names: Vec<String>,
    accessors: Vec<RecordableAccessor>,
    interval: Step,
    records: Vec<LogRecord>,
}

impl DataLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a recording request
    ///
    /// Replaces any previous request and drops rows recorded so far.
    ///
    /// # Errors
    /// - `UnknownReceptorType` for a receptor other than port 0
    /// - `UnknownRecordable` for a name the model does not expose
    /// - `BadProperty` for a non-positive interval
    pub fn connect_logging_device(
        &mut self,
        request: &LoggingRequest,
        recordables: &RecordablesMap,
        model: &'static str,
    ) -> Result<u32> {
        if request.receptor != RECEPTOR_PORT {
            return Err(DeviceError::UnknownReceptorType {
                receptor: request.receptor,
                model,
            });
        }
        if request.interval_steps < 1 {
            return Err(DeviceError::BadProperty(format!(
                "Recording interval must be at least one step, got {}.",
                request.interval_steps
            )));
        }

        let accessors = request
            .recordables
            .iter()
            .map(|name| {
                recordables.get(name).ok_or_else(|| DeviceError::UnknownRecordable {
                    name: name.clone(),
                    model,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.names = request.recordables.clone();
        self.accessors = accessors;
        self.interval = request.interval_steps;
        self.records.clear();
        Ok(RECEPTOR_PORT)
    }

    pub fn is_connected(&self) -> bool {
        !self.accessors.is_empty()
    }

    /// Recorded channel names
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Drop recorded rows, keep the connection
    pub fn init(&mut self) {
        self.records.clear();
    }

    /// Append a row for `step` if it falls on the recording interval
    pub fn record_data(&mut self, step: Step, state: &GeneratorState) {
        if !self.is_connected() || step.rem_euclid(self.interval) != 0 {
            return;
        }
        let values = self.accessors.iter().map(|read| read(state)).collect();
        self.records.push(LogRecord { step, values });
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn take_records(&mut self) -> Vec<LogRecord> {
        std::mem::take(&mut self.records)
    }
}
