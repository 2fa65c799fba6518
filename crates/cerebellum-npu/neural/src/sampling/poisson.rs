// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Poisson Spike Sampler
//!
//! Draws the number of spikes a Poisson process with rate `r` (Hz) emits
//! within one simulation step of `dt` ms:
//!
//! ```text
//! λ = dt[ms] × r[Hz] × 1e-3
//! n ~ Poisson(λ)
//! ```
//!
//! The random source is borrowed per draw, so the sampler itself holds no
//! generator state besides λ.

use rand::RngCore;
use rand_distr::{Distribution, Poisson};

use crate::types::Resolution;

/// Expected spike count per step for a rate in Hz
#[inline]
pub fn rate_to_lambda(rate_hz: f64, resolution: Resolution) -> f64 {
    resolution.ms() * rate_hz * 1e-3
}

#[derive(Debug, Clone, Default)]
pub struct PoissonSampler {
    lambda: f64,
    // None when λ is not positive: every draw is 0
    distribution: Option<Poisson<f64>>,
}

impl PoissonSampler {
    pub fn new(lambda: f64) -> Self {
        let mut sampler = Self::default();
        sampler.set_lambda(lambda);
        sampler
    }

    /// Expected spike count per step
    #[inline]
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn set_lambda(&mut self, lambda: f64) {
        self.lambda = lambda;
        self.distribution = if lambda.is_finite() && lambda > 0.0 {
            Poisson::new(lambda).ok()
        } else {
            None
        };
    }

    /// Derive λ from a rate (Hz) at the given resolution
    pub fn set_rate(&mut self, rate_hz: f64, resolution: Resolution) {
        self.set_lambda(rate_to_lambda(rate_hz, resolution));
    }

    /// Draw a spike count for one step
    #[inline]
    pub fn sample(&self, rng: &mut dyn RngCore) -> u32 {
        match &self.distribution {
            Some(distribution) => {
                let n: f64 = Distribution::<f64>::sample(distribution, rng);
                n.min(u32::MAX as f64) as u32
            }
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rate_to_lambda() {
        let res = Resolution::from_ms(0.1).unwrap();
        assert!((rate_to_lambda(10.0, res) - 0.001).abs() < 1e-15);
        let res = Resolution::from_ms(1.0).unwrap();
        assert!((rate_to_lambda(1000.0, res) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_zero_lambda_never_spikes() {
        let sampler = PoissonSampler::new(0.0);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert_eq!(sampler.sample(&mut rng), 0);
        }
    }

    #[test]
    fn test_negative_lambda_is_treated_as_silent() {
        let sampler = PoissonSampler::new(-3.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sampler.sample(&mut rng), 0);
        assert_eq!(sampler.lambda(), -3.0);
    }

    #[test]
    fn test_sample_mean_converges_to_lambda() {
        let lambda = 0.8;
        let n = 50_000;
        let sampler = PoissonSampler::new(lambda);
        let mut rng = StdRng::seed_from_u64(42);

        let total: u64 = (0..n).map(|_| sampler.sample(&mut rng) as u64).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - lambda).abs() < 3.0 * (lambda / n as f64).sqrt());
    }

    #[test]
    fn test_same_seed_reproduces_counts() {
        let sampler = PoissonSampler::new(2.5);
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let xs: Vec<u32> = (0..200).map(|_| sampler.sample(&mut a)).collect();
        let ys: Vec<u32> = (0..200).map(|_| sampler.sample(&mut b)).collect();
        assert_eq!(xs, ys);
    }
}
