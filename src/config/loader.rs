//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, PayrollPolicy, SeedData, ServerConfig};

/// Loads engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── policy.yaml   # Payroll business rules
/// ├── server.yaml   # HTTP listener settings
/// └── seed.yaml     # Optional accounts for an empty store
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Overtime multiplier: {}", loader.policy().overtime_multiplier);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if a required file is missing, contains invalid YAML,
    /// or holds policy values the engine cannot work with.
    ///
    /// ```no_run
    /// use payslip_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), payslip_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PayrollPolicy>(&path.join("policy.yaml"))?;
        policy.validate()?;

        let server = Self::load_yaml::<ServerConfig>(&path.join("server.yaml"))?;

        Ok(Self {
            config: EngineConfig { policy, server },
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.policy.validate()?;
        Ok(Self { config })
    }

    /// Loads seed accounts. A missing file yields an empty seed.
    pub fn load_seed<P: AsRef<Path>>(path: P) -> EngineResult<SeedData> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(SeedData::default());
        }
        Self::load_yaml::<SeedData>(path)
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

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.config.policy
    }

    /// Returns the HTTP listener settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }
}
