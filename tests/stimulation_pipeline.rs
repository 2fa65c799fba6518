// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end: configuration file → kernel → generators → spike statistics

use std::fs::File;
use std::io::Write;

use cerebellum::config::{load_config, validate_config, CerebellumConfig};
use cerebellum::devices::defaults::{gaussian_parameters, linear_parameters};
use cerebellum::prelude::*;
use serde_json::json;
use tempfile::tempdir;

fn write_config(body: &str) -> CerebellumConfig {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cerebellum_configuration.toml");
    let mut file = File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    let config = load_config(Some(path.as_path()), None).unwrap();
    validate_config(&config).unwrap();
    config
}

/// Keep `amplitude` on every step of the next `steps` steps
fn hold(kernel: &mut SimulationKernel, id: DeviceId, amplitude: f64, steps: u64) {
    let min_delay = kernel.config().min_delay as u64;
    let mut remaining = steps;
    while remaining > 0 {
        let chunk = remaining.min(min_delay);
        for delay in 1..=chunk as Step {
            kernel.deliver_current(id, amplitude, 1.0, delay).unwrap();
        }
        kernel.simulate(chunk).unwrap();
        remaining -= chunk;
    }
}

const CONFIG: &str = r#"
[simulation]
resolution_ms = 0.1
min_delay_steps = 10
max_delay_steps = 20
seed = 4242

[cd_poisson_generator]
min_rate = 100.0
max_rate = 2000.0
min_current = 0.0
max_current = 1.0

[rbf_poisson_generator]
min_rate = 100.0
max_rate = 2000.0
mean_current = 1.0
sigma_current = 0.2
"#;

#[test]
fn test_saturated_linear_generator_fires_at_max_rate() {
    let config = write_config(CONFIG);
    let mut kernel = SimulationKernel::new(KernelConfig::from_simulation(&config.simulation).unwrap());
    let id = kernel
        .create::<LinearRateModel>(linear_parameters(&config.cd_poisson_generator).unwrap())
        .unwrap();

    // 2 s at 2 kHz: about 4000 spikes, sd about 63
    hold(&mut kernel, id, 5.0, 20_000);
    assert_eq!(kernel.rate(id).unwrap(), 2000.0);
    let spikes = kernel.spike_count(id) as f64;
    assert!((spikes - 4000.0).abs() < 300.0, "spikes {}", spikes);
}

#[test]
fn test_linear_rate_tracks_current_level() {
    let config = write_config(CONFIG);
    let mut kernel = SimulationKernel::new(KernelConfig::from_simulation(&config.simulation).unwrap());
    let params = linear_parameters(&config.cd_poisson_generator).unwrap();
    let low = kernel.create::<LinearRateModel>(params).unwrap();
    let high = kernel.create::<LinearRateModel>(params).unwrap();

    let min_delay = kernel.config().min_delay as u64;
    for _ in 0..1_000 {
        for delay in 1..=min_delay as Step {
            kernel.deliver_current(low, 0.1, 1.0, delay).unwrap();
            kernel.deliver_current(high, 0.9, 1.0, delay).unwrap();
        }
        kernel.simulate(min_delay).unwrap();
    }

    assert!((kernel.rate(low).unwrap() - 290.0).abs() < 1e-9);
    assert!((kernel.rate(high).unwrap() - 1810.0).abs() < 1e-9);
    assert!(kernel.spike_count(high) > 3 * kernel.spike_count(low));
}

#[test]
fn test_rbf_generator_tuned_to_mean_current() {
    let config = write_config(CONFIG);
    let mut kernel = SimulationKernel::new(KernelConfig::from_simulation(&config.simulation).unwrap());
    let params = gaussian_parameters(&config.rbf_poisson_generator).unwrap();
    let tuned = kernel.create::<GaussianRateModel>(params).unwrap();
    let detuned = kernel.create::<GaussianRateModel>(params).unwrap();

    let min_delay = kernel.config().min_delay as u64;
    for _ in 0..200 {
        for delay in 1..=min_delay as Step {
            kernel.deliver_current(tuned, 1.0, 1.0, delay).unwrap();
            kernel.deliver_current(detuned, 3.0, 1.0, delay).unwrap();
        }
        kernel.simulate(min_delay).unwrap();
    }

    assert!((kernel.rate(tuned).unwrap() - 2000.0).abs() < 1e-6);
    assert!((kernel.rate(detuned).unwrap() - 100.0).abs() < 1e-6);
}

#[test]
fn test_status_roundtrip_through_kernel() {
    let mut kernel = SimulationKernel::new(KernelConfig::default());
    let id = kernel
        .create::<GaussianRateModel>(GaussianRateParameters::default())
        .unwrap();

    let mut dict = StatusDict::new();
    dict.insert("sigma_current".to_string(), json!(0.0));
    let err = kernel.set_status(id, &dict).unwrap_err();
    assert!(matches!(err, KernelError::Device(DeviceError::BadProperty(_))));

    dict.insert("sigma_current".to_string(), json!(0.5));
    dict.insert("mean_current".to_string(), json!(0.25));
    kernel.set_status(id, &dict).unwrap();

    let status = kernel.get_status(id).unwrap();
    assert_eq!(status["sigma_current"], json!(0.5));
    assert_eq!(status["mean_current"], json!(0.25));
    assert_eq!(status["recordables"], json!(["rate"]));
}

#[test]
fn test_logger_rows_through_kernel() {
    let config = write_config(CONFIG);
    let mut kernel = SimulationKernel::new(KernelConfig::from_simulation(&config.simulation).unwrap());
    let id = kernel
        .create::<LinearRateModel>(linear_parameters(&config.cd_poisson_generator).unwrap())
        .unwrap();
    kernel.connect_logger(id, &LoggingRequest::new(["rate", "I"], 5)).unwrap();

    hold(&mut kernel, id, 0.5, 40);

    let rows = kernel.take_records(id).unwrap();
    let steps: Vec<Step> = rows.iter().map(|r| r.step).collect();
    assert_eq!(steps, vec![0, 5, 10, 15, 20, 25, 30, 35]);
    // Step 0 precedes the first delivery
    assert_eq!(rows[0].values, vec![100.0, 0.0]);
    for row in &rows[1..] {
        assert_eq!(row.values, vec![1050.0, 0.5]);
    }
}
