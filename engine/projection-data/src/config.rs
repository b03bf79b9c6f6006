//! Configuration for the projection dataset builder

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{ProjectionError, Result};

/// Configuration for one dataset build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Input and output file locations
    pub paths: PathsConfig,

    /// Window building options
    pub window: WindowConfig,
}

/// File locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Raw weekly stats CSV
    pub raw_data: PathBuf,

    /// Training dataset output
    pub training_data: PathBuf,

    /// Testing dataset output
    pub testing_data: PathBuf,

    /// Optional JSON run report output
    pub report: Option<PathBuf>,
}

/// Window building options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Build player windows on a rayon pool
    pub parallel: bool,

    /// Worker count for parallel builds (rayon default when unset)
    pub threads: Option<usize>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_data: PathBuf::from("./raw_data.csv"),
            training_data: PathBuf::from("./model_data.train.csv"),
            testing_data: PathBuf::from("./model_data.test.csv"),
            report: None,
        }
    }
}

impl ProjectionConfig {
    /// Load configuration from a TOML file; missing keys fall back to defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ProjectionConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Override fields from `PROJECTION_*` environment variables when present
    pub fn apply_env(&mut self) {
        if let Ok(path) = std::env::var("PROJECTION_RAW_DATA") {
            self.paths.raw_data = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("PROJECTION_TRAINING_DATA") {
            self.paths.training_data = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("PROJECTION_TESTING_DATA") {
            self.paths.testing_data = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("PROJECTION_REPORT") {
            self.paths.report = Some(PathBuf::from(path));
        }

        if let Ok(parallel) = std::env::var("PROJECTION_PARALLEL") {
            match parallel.parse() {
                Ok(parallel) => self.window.parallel = parallel,
                Err(_) => warn!("Ignoring PROJECTION_PARALLEL={}, expected true or false", parallel),
            }
        }

        if let Ok(threads) = std::env::var("PROJECTION_THREADS") {
            match threads.parse() {
                Ok(threads) => self.window.threads = Some(threads),
                Err(_) => warn!("Ignoring PROJECTION_THREADS={}, expected a count", threads),
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.paths.training_data == self.paths.testing_data {
            return Err(ProjectionError::config(
                "training and testing outputs must be different files",
            ));
        }

        if self.paths.raw_data == self.paths.training_data
            || self.paths.raw_data == self.paths.testing_data
        {
            return Err(ProjectionError::config("outputs must not overwrite the raw data input"));
        }

        if self.window.threads == Some(0) {
            return Err(ProjectionError::config("window threads must be greater than 0"));
        }

        Ok(())
    }

    /// Serialize the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ProjectionError::config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ProjectionConfig::default();
        assert_eq!(config.paths.raw_data, PathBuf::from("./raw_data.csv"));
        assert_eq!(config.paths.training_data, PathBuf::from("./model_data.train.csv"));
        assert_eq!(config.paths.testing_data, PathBuf::from("./model_data.test.csv"));
        assert!(config.paths.report.is_none());
        assert!(!config.window.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[paths]\nraw_data = \"/data/week_stats.csv\"\n\n[window]\nparallel = true\nthreads = 4").unwrap();

        let config = ProjectionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.paths.raw_data, PathBuf::from("/data/week_stats.csv"));
        assert_eq!(config.paths.training_data, PathBuf::from("./model_data.train.csv"));
        assert!(config.window.parallel);
        assert_eq!(config.window.threads, Some(4));
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[window]\nparallel = \"sometimes\"").unwrap();

        let err = ProjectionConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ProjectionError::ConfigParse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ProjectionConfig::default();
        config.paths.report = Some(PathBuf::from("./report.json"));
        config.window.threads = Some(2);

        let text = config.to_toml().unwrap();
        let parsed: ProjectionConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validate_rejects_shared_outputs() {
        let mut config = ProjectionConfig::default();
        config.paths.testing_data = config.paths.training_data.clone();
        assert!(matches!(config.validate(), Err(ProjectionError::Config(_))));

        let mut config = ProjectionConfig::default();
        config.paths.training_data = config.paths.raw_data.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_report_and_threads() {
        // Only this test touches these variables
        std::env::set_var("PROJECTION_REPORT", "/tmp/projection_report.json");
        std::env::set_var("PROJECTION_THREADS", "6");
        std::env::set_var("PROJECTION_PARALLEL", "true");

        let mut config = ProjectionConfig::default();
        config.apply_env();

        std::env::remove_var("PROJECTION_REPORT");
        std::env::remove_var("PROJECTION_THREADS");
        std::env::remove_var("PROJECTION_PARALLEL");

        assert_eq!(config.paths.report, Some(PathBuf::from("/tmp/projection_report.json")));
        assert_eq!(config.window.threads, Some(6));
        assert!(config.window.parallel);
        assert_eq!(config.paths.raw_data, PathBuf::from("./raw_data.csv"));
    }

    #[test]
    fn test_validate_rejects_zero_threads() {
        let mut config = ProjectionConfig::default();
        config.window.threads = Some(0);
        assert!(config.validate().is_err());
    }
}
