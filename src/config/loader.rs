//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! parameters from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{ParametersConfig, StatuteMetadata, StatutoryConfig};

/// Loads and provides access to statutory configuration.
///
/// # Directory Structure
///
/// ```text
/// config/clt/
/// ├── statute.yaml     # Statute metadata
/// └── parameters.yaml  # Notice, accrual, FGTS and fine parameters
/// ```
///
/// # Example
///
/// ```no_run
/// use settlement_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/clt").unwrap();
/// println!("Loaded statute: {}", loader.statute().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, is not valid YAML, lacks a
    /// required field, or holds parameters the engine cannot use.
    ///
    /// ```no_run
    /// use settlement_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/clt")?;
    /// # Ok::<(), settlement_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<StatuteMetadata>(&path.join("statute.yaml"))?;
        let parameters = Self::load_yaml::<ParametersConfig>(&path.join("parameters.yaml"))?;

        let config = StatutoryConfig::new(metadata, parameters);
        config.validate()?;

        debug!(
            path = %path.display(),
            statute = %config.statute().code,
            version = %config.statute().version,
            "Loaded statutory configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: StatutoryConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Returns the statute metadata.
    pub fn statute(&self) -> &StatuteMetadata {
        self.config.statute()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_config(StatutoryConfig::default())
    }
}
