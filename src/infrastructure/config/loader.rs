use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;

use crate::domain::error::ConfigError;
use crate::domain::models::EngineConfig;

/// Tuning-profile loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the engine configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Reference defaults (`EngineConfig::default()`)
    /// 2. `rendezvous.yaml` in the working directory, if present
    /// 3. Environment variables (`RENDEZVOUS_*` prefix, `__` nesting)
    pub fn load() -> Result<EngineConfig> {
        let config: EngineConfig = Figment::new()
            .merge(Serialized::defaults(EngineConfig::default()))
            .merge(Yaml::file("rendezvous.yaml"))
            .merge(Env::prefixed("RENDEZVOUS_").split("__"))
            .extract()
            .context("Failed to extract engine configuration")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load a tuning profile from a specific YAML file, over the defaults.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<EngineConfig> {
        let config: EngineConfig = Figment::new()
            .merge(Serialized::defaults(EngineConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load tuning profile from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate a configuration after loading.
    pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
        let validity = &config.validity;
        if validity.min_speed_mps < 0.0
            || validity.max_speed_mps < 0.0
            || validity.min_speed_mps > validity.max_speed_mps
        {
            return Err(ConfigError::InvalidSpeedWindow {
                min: validity.min_speed_mps,
                max: validity.max_speed_mps,
            });
        }
        if validity.max_age_ms <= 0 {
            return Err(ConfigError::InvalidMaxAge(validity.max_age_ms));
        }
        if !(0.0..=1.0).contains(&validity.min_confidence) {
            return Err(ConfigError::InvalidMinConfidence(validity.min_confidence));
        }
        if !(0.0..=1.0).contains(&config.min_confidence) {
            return Err(ConfigError::InvalidMinConfidence(config.min_confidence));
        }

        if config.pairwise.max_prediction_secs <= 0.0 {
            return Err(ConfigError::InvalidHorizon(
                config.pairwise.max_prediction_secs,
            ));
        }

        for (name, value) in [
            ("pairwise.distance_decay_m", config.pairwise.distance_decay_m),
            ("pairwise.time_decay_secs", config.pairwise.time_decay_secs),
            (
                "magnetism.distance_decay_m",
                config.magnetism.distance_decay_m,
            ),
            (
                "confidence.staleness_decay_ms",
                config.confidence.staleness_decay_ms,
            ),
            ("group.cohesion_decay_m", config.group.cohesion_decay_m),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::InvalidDecay { name, value });
            }
        }

        if config.ranking.max_results == 0 {
            return Err(ConfigError::InvalidMaxResults);
        }
        for (name, value) in [
            ("probability_band", config.ranking.probability_band),
            ("time_band_secs", config.ranking.time_band_secs),
        ] {
            if value < 0.0 {
                return Err(ConfigError::InvalidTieBand { name, value });
            }
        }

        for tier in &config.magnetism.popularity_tiers {
            if tier.weight <= 0.0 {
                return Err(ConfigError::ValidationFailed(format!(
                    "popularity tier weight must be positive, got {}",
                    tier.weight
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = EngineConfig::default();
        ConfigLoader::validate(&config).expect("Reference defaults should validate");
    }

    #[test]
    fn test_load_from_file_overrides() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(
            file,
            "min_confidence: 0.5\nvalidity:\n  max_speed_mps: 25.0\nranking:\n  max_results: 5"
        )
        .unwrap();
        file.flush().unwrap();

        let config = ConfigLoader::load_from_file(file.path()).expect("should load");
        assert!((config.min_confidence - 0.5).abs() < f64::EPSILON);
        assert!((config.validity.max_speed_mps - 25.0).abs() < f64::EPSILON);
        assert_eq!(config.ranking.max_results, 5);
        // Untouched values keep reference defaults.
        assert!((config.validity.min_speed_mps - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_inverted_speed_window() {
        let mut config = EngineConfig::default();
        config.validity.min_speed_mps = 20.0;
        config.validity.max_speed_mps = 10.0;

        let result = ConfigLoader::validate(&config);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidSpeedWindow { .. }
        ));
    }

    #[test]
    fn test_validate_zero_horizon() {
        let mut config = EngineConfig::default();
        config.pairwise.max_prediction_secs = 0.0;

        let result = ConfigLoader::validate(&config);
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidHorizon(_)));
    }

    #[test]
    fn test_validate_zero_decay() {
        let mut config = EngineConfig::default();
        config.pairwise.distance_decay_m = 0.0;

        let result = ConfigLoader::validate(&config);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidDecay { .. }
        ));
    }

    #[test]
    fn test_validate_zero_max_results() {
        let mut config = EngineConfig::default();
        config.ranking.max_results = 0;

        let result = ConfigLoader::validate(&config);
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidMaxResults));
    }

    #[test]
    fn test_validate_out_of_range_threshold() {
        let mut config = EngineConfig::default();
        config.min_confidence = 1.5;

        let result = ConfigLoader::validate(&config);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidMinConfidence(_)
        ));
    }

    #[test]
    fn test_validate_negative_tie_band() {
        let mut config = EngineConfig::default();
        config.ranking.probability_band = -0.1;

        let result = ConfigLoader::validate(&config);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidTieBand { .. }
        ));
    }
}
