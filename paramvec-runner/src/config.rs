//! Runner configuration file.
//!
//! ```toml
//! nsamples = "auto"      # integer or "auto"
//! seed = 42
//! vector_mode = "mixed"  # all | mixed | random_only | directed_only | test
//! vector_name = "zeros"  # or vector_index = 0, not both
//! max_retries = 200
//! missing_filter = "empty"
//! unbound_policy = "draw_once"
//! ```

use std::path::{Path, PathBuf};

use paramvec_core::{SampleCount, UnboundPolicy, VectorFilter, VectorMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::runner::{Invocation, MissingFilterPolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("vector_name and vector_index are mutually exclusive")]
    ConflictingFilters,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    pub nsamples: SampleCount,
    pub seed: Option<u64>,
    pub vector_mode: VectorMode,
    pub vector_name: Option<String>,
    pub vector_index: Option<usize>,
    pub max_retries: Option<u32>,
    pub missing_filter: MissingFilterPolicy,
    pub unbound_policy: Option<UnboundPolicy>,
}

impl RunnerConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.filter()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn filter(&self) -> Result<Option<VectorFilter>, ConfigError> {
        match (&self.vector_name, self.vector_index) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingFilters),
            (Some(name), None) => Ok(Some(VectorFilter::ByName(name.clone()))),
            (None, Some(index)) => Ok(Some(VectorFilter::ByIndex(index))),
            (None, None) => Ok(None),
        }
    }

    pub fn invocation(&self) -> Result<Invocation, ConfigError> {
        Ok(Invocation {
            count: self.nsamples,
            mode: self.vector_mode,
            filter: self.filter()?,
            seed: self.seed,
            max_retries: self.max_retries,
            unbound_policy: self.unbound_policy,
            missing_filter: self.missing_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = RunnerConfig::from_toml("").unwrap();
        assert_eq!(config, RunnerConfig::default());
        let inv = config.invocation().unwrap();
        assert_eq!(inv.count, SampleCount::Count(10));
        assert_eq!(inv.mode, VectorMode::All);
        assert_eq!(inv.missing_filter, MissingFilterPolicy::Error);
    }

    #[test]
    fn full_config_parses() {
        let config = RunnerConfig::from_toml(
            r#"
            nsamples = "auto"
            seed = 42
            vector_mode = "mixed"
            vector_index = 1
            max_retries = 200
            missing_filter = "empty"
            unbound_policy = "draw_once"
            "#,
        )
        .unwrap();
        let inv = config.invocation().unwrap();
        assert_eq!(inv.count, SampleCount::Auto);
        assert_eq!(inv.seed, Some(42));
        assert_eq!(inv.mode, VectorMode::Mixed);
        assert_eq!(inv.filter, Some(VectorFilter::ByIndex(1)));
        assert_eq!(inv.max_retries, Some(200));
        assert_eq!(inv.missing_filter, MissingFilterPolicy::Empty);
        assert_eq!(inv.unbound_policy, Some(UnboundPolicy::DrawOnce));
    }

    #[test]
    fn conflicting_filters_rejected() {
        let err = RunnerConfig::from_toml("vector_name = \"a\"\nvector_index = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingFilters));
    }

    #[test]
    fn bad_values_rejected() {
        assert!(RunnerConfig::from_toml("vector_mode = \"sometimes\"").is_err());
        assert!(RunnerConfig::from_toml("nsamples = \"lots\"").is_err());
        assert!(RunnerConfig::from_toml("nsamples = -3").is_err());
        assert!(RunnerConfig::from_toml("unknown_key = 1").is_err());
    }

    #[test]
    fn toml_round_trip_with_auto() {
        let config = RunnerConfig {
            nsamples: SampleCount::Auto,
            seed: Some(7),
            vector_mode: VectorMode::Test,
            ..RunnerConfig::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(RunnerConfig::from_toml(&text).unwrap(), config);
    }
}
