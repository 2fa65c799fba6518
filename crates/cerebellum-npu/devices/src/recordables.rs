// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Read-only accessors for loggable device state
//!
//! Each rate model owns one immutable map from recordable name to accessor,
//! built on first use and shared process-wide.

use std::sync::OnceLock;

use ahash::AHashMap;
use cerebellum_npu_neural::{GaussianRateModel, LinearRateModel, RateModel};

use crate::generator::GeneratorState;
use crate::status::names;

/// Reads one value out of a generator's committed state
pub type RecordableAccessor = fn(&GeneratorState) -> f64;

#[derive(Debug, Clone, Default)]
pub struct RecordablesMap {
    // Insertion order is the reporting order
    names: Vec<&'static str>,
    accessors: AHashMap<&'static str, RecordableAccessor>,
}

impl RecordablesMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, accessor: RecordableAccessor) {
        if self.accessors.insert(name, accessor).is_none() {
            self.names.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<RecordableAccessor> {
        self.accessors.get(name).copied()
    }

    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Rate model with a recordables registry
pub trait RecordableModel: RateModel {
    fn recordables() -> &'static RecordablesMap;
}

impl RecordableModel for LinearRateModel {
    fn recordables() -> &'static RecordablesMap {
        static MAP: OnceLock<RecordablesMap> = OnceLock::new();
        MAP.get_or_init(|| {
            let mut map = RecordablesMap::new();
            map.insert(names::RATE, GeneratorState::rate);
            map.insert(names::INPUT_CURRENT, GeneratorState::input_current);
            map
        })
    }
}

impl RecordableModel for GaussianRateModel {
    fn recordables() -> &'static RecordablesMap {
        static MAP: OnceLock<RecordablesMap> = OnceLock::new();
        MAP.get_or_init(|| {
            let mut map = RecordablesMap::new();
            map.insert(names::RATE, GeneratorState::rate);
            map
        })
    }
}
