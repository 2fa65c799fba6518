// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Behavioural properties of both Poisson generators
//!
//! Rate laws are checked through the device (delivered current → recorded
//! rate), not only through the rate models in isolation.

use cerebellum_npu_devices::{
    CdPoissonGenerator, Device, LoggingRequest, RbfPoissonGenerator, SpikeCounter, StatusDict,
    UpdateContext,
};
use cerebellum_npu_neural::{
    CurrentEvent, DeviceError, DeviceId, GaussianRateParameters, LinearRateParameters, Resolution,
    Step,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

const MIN_DELAY: Step = 10;
const CAPACITY: usize = 20;

fn prepared<D: Device>(mut device: D) -> D {
    device.init_buffers(CAPACITY, 0);
    device.calibrate(Resolution::default());
    device
}

/// Drive one full slice with a single current injected at lag 0
fn rate_after_current<D: Device>(device: &mut D, current: f64, rng: &mut StdRng) -> f64 {
    // Stamp -1 with delay 1 lands on lag 0 of the slice at origin 0
    device.handle_current(&CurrentEvent::new(current, 1.0, -1, 1)).unwrap();
    let request = LoggingRequest::new(["rate"], 1);
    device.handles_logging_test_event(&request).unwrap();

    let mut counter = SpikeCounter::default();
    let mut ctx = UpdateContext::new(rng, &mut counter, MIN_DELAY);
    device.update(&mut ctx, 0, 0, 1).unwrap();
    device.take_records()[0].values[0]
}

#[test]
fn test_linear_saturation_law() {
    let mut rng = StdRng::seed_from_u64(1);
    for current in [-5.0, -0.1, 1.0, 1.5, 100.0] {
        let mut generator = prepared(CdPoissonGenerator::new(DeviceId(1)));
        let rate = rate_after_current(&mut generator, current, &mut rng);
        let expected = if current <= 0.0 { 1.0 } else { 10.0 };
        assert_eq!(rate, expected, "current {}", current);
    }
}

#[test]
fn test_linear_interpolation() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut generator = prepared(CdPoissonGenerator::new(DeviceId(1)));
    assert_eq!(rate_after_current(&mut generator, 0.5, &mut rng), 5.5);

    // Monotone inside the interval
    let mut previous = 1.0;
    for step in 1..10 {
        let mut generator = prepared(CdPoissonGenerator::new(DeviceId(1)));
        let rate = rate_after_current(&mut generator, step as f64 / 10.0, &mut rng);
        assert!(rate >= previous);
        previous = rate;
    }
}

#[test]
fn test_gaussian_law() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut generator = prepared(RbfPoissonGenerator::new(DeviceId(2)));
    let request = LoggingRequest::new(["rate"], 1);
    generator.handles_logging_test_event(&request).unwrap();

    let mut counter = SpikeCounter::default();
    let mut ctx = UpdateContext::new(&mut rng, &mut counter, MIN_DELAY);
    generator.update(&mut ctx, 0, 0, MIN_DELAY).unwrap();
    // Zero average current sits on the mean
    assert_eq!(generator.rate(), 10.0);

    let mut far = prepared(RbfPoissonGenerator::new(DeviceId(3)));
    for lag in 0..MIN_DELAY {
        far.handle_current(&CurrentEvent::new(50.0, 1.0, lag - 1, 1)).unwrap();
    }
    let mut ctx = UpdateContext::new(&mut rng, &mut counter, MIN_DELAY);
    far.update(&mut ctx, 0, 0, MIN_DELAY).unwrap();
    assert!((far.rate() - 1.0).abs() < 1e-9);
}

#[test]
fn test_spike_count_matches_lambda() {
    // λ = 0.3 spikes per step
    let params = LinearRateParameters::with_values(3_000.0, 3_000.0, 0.0, 1.0);
    let mut generator = prepared(CdPoissonGenerator::with_parameters(DeviceId(1), params).unwrap());
    let lambda = generator.lambda();

    let mut rng = StdRng::seed_from_u64(2024);
    let mut counter = SpikeCounter::default();
    let slices = 2_000;
    for slice in 0..slices {
        let mut ctx = UpdateContext::new(&mut rng, &mut counter, MIN_DELAY);
        generator.update(&mut ctx, slice * MIN_DELAY, 0, MIN_DELAY).unwrap();
    }

    let n = (slices * MIN_DELAY) as f64;
    let mean = counter.spikes as f64 / n;
    assert!(
        (mean - lambda).abs() < 3.0 * (lambda / n).sqrt(),
        "mean {} vs lambda {}",
        mean,
        lambda
    );
    // Coalescing: fewer events than spikes once multiplicities exceed one
    assert!(counter.events <= counter.spikes);
}

#[test]
fn test_accumulated_contributions_sum() {
    let mut generator = prepared(CdPoissonGenerator::new(DeviceId(1)));
    generator.handle_current(&CurrentEvent::new(0.2, 0.5, 0, 3)).unwrap();
    generator.handle_current(&CurrentEvent::new(0.3, 2.0, 1, 2)).unwrap();
    let request = LoggingRequest::new(["I"], 1);
    generator.handles_logging_test_event(&request).unwrap();

    let mut rng = StdRng::seed_from_u64(1);
    let mut counter = SpikeCounter::default();
    let mut ctx = UpdateContext::new(&mut rng, &mut counter, MIN_DELAY);
    generator.update(&mut ctx, 0, 0, 5).unwrap();

    let values: Vec<f64> = generator.take_records().iter().map(|r| r.values[0]).collect();
    // 0.5 * 0.2 + 2.0 * 0.3 at step 3, nothing elsewhere
    assert_eq!(values.len(), 5);
    assert!((values[3] - 0.7).abs() < 1e-12);
    assert_eq!(values[0], 0.0);
    assert_eq!(values[4], 0.0);
}

#[test]
fn test_configuration_atomicity_for_both_models() {
    let mut linear = prepared(CdPoissonGenerator::new(DeviceId(1)));
    let mut rbf = prepared(RbfPoissonGenerator::new(DeviceId(2)));

    let mut bad = StatusDict::new();
    bad.insert("min_rate".to_string(), json!(-1.0));
    assert!(matches!(linear.set_status(&bad), Err(DeviceError::BadProperty(_))));
    assert!(matches!(rbf.set_status(&bad), Err(DeviceError::BadProperty(_))));
    assert_eq!(*linear.parameters(), LinearRateParameters::default());
    assert_eq!(*rbf.parameters(), GaussianRateParameters::default());

    let mut good = StatusDict::new();
    good.insert("min_rate".to_string(), json!(0.5));
    good.insert("max_rate".to_string(), json!(4.0));
    good.insert("mean_current".to_string(), json!(2.0));
    linear.set_status(&good).unwrap();
    rbf.set_status(&good).unwrap();
    assert_eq!(linear.get_status()["max_rate"], json!(4.0));
    assert_eq!(*rbf.parameters(), GaussianRateParameters::with_values(0.5, 4.0, 2.0, 1.0));
}
