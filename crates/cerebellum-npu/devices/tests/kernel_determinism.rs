// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Spike trains depend only on seed and lane count

use cerebellum_npu_devices::{KernelConfig, SimulationKernel};
use cerebellum_npu_neural::{
    GaussianRateModel, GaussianRateParameters, LinearRateModel, LinearRateParameters, SpikeEvent,
};

fn run(seed: u64, worker_lanes: usize) -> Vec<SpikeEvent> {
    let config = KernelConfig {
        seed,
        worker_lanes,
        ..KernelConfig::default()
    };
    let mut kernel = SimulationKernel::new(config);
    let linear = LinearRateParameters::with_values(100.0, 800.0, 0.0, 1.0);
    let rbf = GaussianRateParameters::with_values(50.0, 900.0, 0.5, 0.25);

    let mut ids = Vec::new();
    for _ in 0..4 {
        ids.push(kernel.create::<LinearRateModel>(linear).unwrap());
        ids.push(kernel.create::<GaussianRateModel>(rbf).unwrap());
    }

    // Current ramp, injected every 25 steps
    for block in 0..20 {
        for (i, id) in ids.iter().enumerate() {
            let amplitude = (block as f64 / 20.0) + i as f64 * 0.01;
            kernel.deliver_current(*id, amplitude, 1.0, 1 + (i as i64 % 5)).unwrap();
        }
        kernel.simulate(25).unwrap();
    }
    kernel.take_spikes()
}

#[test]
fn test_same_seed_same_spikes() {
    for lanes in [1, 3] {
        let a = run(7, lanes);
        let b = run(7, lanes);
        assert!(!a.is_empty());
        assert_eq!(a, b, "lanes {}", lanes);
    }
}

#[test]
fn test_different_seed_differs() {
    assert_ne!(run(7, 2), run(8, 2));
}
