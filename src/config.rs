use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::{SimError, SimResult};

pub const MIN_PATIENTS: usize = 1;
pub const MAX_PATIENTS: usize = 100;
pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 100;

pub const DEFAULT_PATIENTS: usize = 50;
pub const DEFAULT_DAYS: u32 = 15;
pub const DEFAULT_OUTPUT_DIR: &str = "simulator_datasets";
pub const DEFAULT_FILE_NAME: &str = "patients.csv";
pub const DEFAULT_SEED: u64 = 42;

/// Run parameters for one cohort simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub patients_count: usize,
    pub days_interval: u32,
    pub output_dir: PathBuf,
    pub file_name: String,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            patients_count: DEFAULT_PATIENTS,
            days_interval: DEFAULT_DAYS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_name: DEFAULT_FILE_NAME.to_string(),
            seed: Some(DEFAULT_SEED),
        }
    }
}

impl Config {
    /// Parses a JSON run file. Not validated here: command-line overrides
    /// are applied on top first, then the merged config is checked.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Location of the dataset artifact.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    pub fn validate(&self) -> SimResult<()> {
        if !(MIN_PATIENTS..=MAX_PATIENTS).contains(&self.patients_count) {
            return Err(SimError::Configuration(format!(
                "patients_count must be between {} and {}, got {}",
                MIN_PATIENTS, MAX_PATIENTS, self.patients_count
            )));
        }

        if !(MIN_DAYS..=MAX_DAYS).contains(&self.days_interval) {
            return Err(SimError::Configuration(format!(
                "days_interval must be between {} and {}, got {}",
                MIN_DAYS, MAX_DAYS, self.days_interval
            )));
        }

        self.validate_file_name()
    }

    fn validate_file_name(&self) -> SimResult<()> {
        let name = Path::new(&self.file_name);
        // Must be a bare file name so the dataset always lands inside output_dir
        let is_bare = name.file_name().map(|n| n == name.as_os_str()).unwrap_or(false);
        if self.file_name.is_empty() || !is_bare {
            return Err(SimError::Configuration(format!(
                "file_name must be a plain file name, got {:?}",
                self.file_name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.patients_count, 50);
        assert_eq!(config.days_interval, 15);
        assert_eq!(config.output_path(), PathBuf::from("simulator_datasets/patients.csv"));
        assert_eq!(config.seed, Some(DEFAULT_SEED));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_patient_bounds() {
        for (count, ok) in [(0, false), (1, true), (100, true), (101, false)] {
            let config = Config { patients_count: count, ..Config::default() };
            assert_eq!(config.validate().is_ok(), ok, "patients_count = {}", count);
        }
    }

    #[test]
    fn test_day_bounds() {
        for (days, ok) in [(0, false), (1, true), (100, true), (101, false)] {
            let config = Config { days_interval: days, ..Config::default() };
            let result = config.validate();
            assert_eq!(result.is_ok(), ok, "days_interval = {}", days);
            if !ok {
                assert!(matches!(result, Err(SimError::Configuration(_))));
            }
        }
    }

    #[test]
    fn test_file_name_must_be_bare() {
        for name in ["", "nested/patients.csv", "..", "/abs.csv"] {
            let config = Config { file_name: name.to_string(), ..Config::default() };
            assert!(config.validate().is_err(), "file_name = {:?}", name);
        }
    }

    #[test]
    fn test_from_file_partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{ "patients_count": 7, "seed": 42 }"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.patients_count, 7);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.days_interval, DEFAULT_DAYS);
        assert_eq!(config.file_name, DEFAULT_FILE_NAME);
    }

    #[test]
    fn test_from_file_defers_validation_to_merged_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{ "days_interval": 0, "patients_count": 500 }"#).unwrap();

        let mut config = Config::from_file(&path).unwrap();
        assert!(matches!(config.validate(), Err(SimError::Configuration(_))));

        config.days_interval = 2;
        config.patients_count = 2;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_null_seed_in_file_requests_entropy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{ "seed": null }"#).unwrap();

        assert_eq!(Config::from_file(&path).unwrap().seed, None);
    }

    #[test]
    fn test_from_file_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, "{ patients_count: ").unwrap();

        assert!(matches!(Config::from_file(&path), Err(SimError::Json(_))));
    }
}
