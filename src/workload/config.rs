use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{fields::BASE_FIELDS_COUNT, workload::Operation};

/// Largest number of operations a single round may generate. The whole round is
/// materialised before it runs.
pub const MAX_OPERATIONS: usize = (1 << 30) / size_of::<Operation>();

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkloadConfigError {
    #[error("{name} must be within {range}, got {value}")]
    OutOfRange {
        name: &'static str,
        range: &'static str,
        value: f64,
    },
    #[error("max_field must exceed {base} when overflow_ratio > 0, got {0}", base = BASE_FIELDS_COUNT)]
    NoOverflowRoom(u16),
    #[error("operations must be at most {max} per round, got {0}", max = MAX_OPERATIONS)]
    TooManyOperations(usize),
}

/// Failure to obtain a usable [`WorkloadConfig`] from a file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("cannot read workload config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse workload config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid workload config")]
    Invalid(#[from] WorkloadConfigError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    pub seed: u64,
    /// Operations generated per round.
    pub operations: usize,
    pub rounds: usize,
    /// Chance that a single-field operation is a clear rather than a set.
    pub clear_probability: f64,
    /// Insert a clear-all after this many operations. `0` disables it.
    pub clear_all_every: usize,
    /// Share of single-field operations aimed at the overflow range.
    pub overflow_ratio: f64,
    /// Success probability of the geometric distribution picking base indices.
    /// Higher means more weight on the lowest fields.
    pub skew: f64,
    /// Exclusive upper bound for overflow indices.
    pub max_field: u16,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        WorkloadConfig {
            seed: 42,
            operations: 100_000,
            rounds: 1,
            clear_probability: 0.3,
            clear_all_every: 1_000,
            overflow_ratio: 0.05,
            skew: 0.1,
            max_field: 1024,
        }
    }
}

impl WorkloadConfig {
    /// Reads a JSON config. Missing keys take their default values. The result is
    /// not validated, so callers can still override fields first.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ConfigLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks ranges that would otherwise make generation panic.
    pub fn validate(&self) -> Result<(), WorkloadConfigError> {
        if self.operations > MAX_OPERATIONS {
            return Err(WorkloadConfigError::TooManyOperations(self.operations));
        }
        let probabilities = [
            ("clear_probability", self.clear_probability),
            ("overflow_ratio", self.overflow_ratio),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(WorkloadConfigError::OutOfRange {
                    name,
                    range: "[0, 1]",
                    value,
                });
            }
        }
        if !(self.skew > 0.0 && self.skew <= 1.0) {
            return Err(WorkloadConfigError::OutOfRange {
                name: "skew",
                range: "(0, 1]",
                value: self.skew,
            });
        }
        if self.overflow_ratio > 0.0 && usize::from(self.max_field) <= BASE_FIELDS_COUNT {
            return Err(WorkloadConfigError::NoOverflowRoom(self.max_field));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(WorkloadConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_probabilities() {
        let config = WorkloadConfig {
            clear_probability: 1.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "clear_probability must be within [0, 1], got 1.5"
        );

        let config = WorkloadConfig {
            overflow_ratio: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = WorkloadConfig {
            skew: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn overflow_needs_room_above_base_range() {
        let config = WorkloadConfig {
            max_field: 128,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(WorkloadConfigError::NoOverflowRoom(128))
        );

        let config = WorkloadConfig {
            max_field: 128,
            overflow_ratio: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_unallocatable_operation_counts() {
        let config = WorkloadConfig {
            operations: usize::MAX,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(WorkloadConfigError::TooManyOperations(usize::MAX))
        );

        let config = WorkloadConfig {
            operations: MAX_OPERATIONS,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));

        let config = WorkloadConfig {
            operations: MAX_OPERATIONS + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_keeps_io_source() {
        let path = std::env::temp_dir().join("dirtyset-config-that-does-not-exist.json");
        let err = WorkloadConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Read { .. }));
        assert!(err.to_string().starts_with("cannot read workload config"));

        let source = std::error::Error::source(&err).unwrap();
        assert!(source.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn malformed_file_keeps_json_source() {
        let path = std::env::temp_dir().join(format!(
            "dirtyset-malformed-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, b"{ \"seed\": ").unwrap();
        let err = WorkloadConfig::from_json_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, ConfigLoadError::Parse { .. }));
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.downcast_ref::<serde_json::Error>().is_some());
    }

    #[test]
    fn reads_config_file() {
        let path = std::env::temp_dir().join(format!(
            "dirtyset-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, br#"{"operations": 500, "skew": 0.5}"#).unwrap();
        let config = WorkloadConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.operations, 500);
        assert_eq!(config.skew, 0.5);
        assert_eq!(config.seed, WorkloadConfig::default().seed);
    }

    #[test]
    fn invalid_config_converts_into_load_error() {
        let err: ConfigLoadError = WorkloadConfigError::NoOverflowRoom(10).into();
        assert_eq!(err.to_string(), "invalid workload config");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: WorkloadConfig = serde_json::from_str(r#"{"seed": 7, "rounds": 3}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.rounds, 3);
        assert_eq!(config.operations, WorkloadConfig::default().operations);
    }
}
