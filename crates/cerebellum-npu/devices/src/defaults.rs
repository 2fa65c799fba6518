// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Generator parameters from the configuration file

use cerebellum_config::{CdPoissonGeneratorConfig, RbfPoissonGeneratorConfig};
use cerebellum_npu_neural::{
    GaussianRateParameters, LinearRateParameters, ModelParameters, Result,
};

/// Validated `cd_poisson_generator` parameters
pub fn linear_parameters(config: &CdPoissonGeneratorConfig) -> Result<LinearRateParameters> {
    let params = LinearRateParameters::with_values(
        config.min_rate,
        config.max_rate,
        config.min_current,
        config.max_current,
    );
    params.validate()?;
    Ok(params)
}

/// Validated `rbf_poisson_generator` parameters
pub fn gaussian_parameters(config: &RbfPoissonGeneratorConfig) -> Result<GaussianRateParameters> {
    let params = GaussianRateParameters::with_values(
        config.min_rate,
        config.max_rate,
        config.mean_current,
        config.sigma_current,
    );
    params.validate()?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_match_model_defaults() {
        assert_eq!(
            linear_parameters(&CdPoissonGeneratorConfig::default()).unwrap(),
            LinearRateParameters::default()
        );
        assert_eq!(
            gaussian_parameters(&RbfPoissonGeneratorConfig::default()).unwrap(),
            GaussianRateParameters::default()
        );
    }

    #[test]
    fn test_invalid_table_rejected() {
        let config = RbfPoissonGeneratorConfig {
            sigma_current: 0.0,
            ..Default::default()
        };
        assert!(gaussian_parameters(&config).is_err());
    }
}
