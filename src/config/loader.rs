//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the component
//! catalog, leave types, and engine policy from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveType, SalaryComponent};

use super::catalog::ComponentCatalog;
use super::types::{CatalogConfig, EngineConfig, EnginePolicy, LeaveTypesConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/standard/
/// ├── catalog.yaml      # Predefined salary components
/// ├── leave_types.yaml  # Leave types and annual limits
/// └── policy.yaml       # Statutory and EWA policy
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard").unwrap();
/// let hra = loader.get_component("HRA").unwrap();
/// println!("HRA: {}% of {:?}", hra.value, hra.base_component);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let catalog = Self::load_yaml::<CatalogConfig>(&path.join("catalog.yaml"))?;
        let leave_types = Self::load_yaml::<LeaveTypesConfig>(&path.join("leave_types.yaml"))?;
        let policy = Self::load_yaml::<EnginePolicy>(&path.join("policy.yaml"))?;

        debug!(
            path = %path.display(),
            components = catalog.components.len(),
            leave_types = leave_types.leave_types.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(
                ComponentCatalog::new(catalog.components),
                leave_types.leave_types,
                policy,
            ),
        })
    }

    /// Builds the built-in configuration without touching disk.
    ///
    /// Uses the standard Indian component catalog, the usual casual/sick/earned
    /// leave types, and the default policy.
    pub fn standard() -> Self {
        let leave_types = vec![
            LeaveType {
                id: 1,
                name: "Casual Leave".to_string(),
                code: "CL".to_string(),
                is_paid: true,
                annual_limit: 12,
            },
            LeaveType {
                id: 2,
                name: "Sick Leave".to_string(),
                code: "SL".to_string(),
                is_paid: true,
                annual_limit: 10,
            },
            LeaveType {
                id: 3,
                name: "Earned Leave".to_string(),
                code: "EL".to_string(),
                is_paid: true,
                annual_limit: 15,
            },
        ];

        Self {
            config: EngineConfig::new(
                ComponentCatalog::standard(),
                leave_types,
                EnginePolicy::default(),
            ),
        }
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
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

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the component catalog.
    pub fn catalog(&self) -> &ComponentCatalog {
        self.config.catalog()
    }

    /// Returns the engine policy.
    pub fn policy(&self) -> &EnginePolicy {
        self.config.policy()
    }

    /// Returns the configured leave types.
    pub fn leave_types(&self) -> &[LeaveType] {
        self.config.leave_types()
    }

    /// Gets a catalog component by code or id.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::standard();
    /// let pf = loader.get_component("PF_EMPLOYEE")?;
    /// assert!(pf.is_statutory);
    /// # Ok::<(), salary_engine::error::EngineError>(())
    /// ```
    pub fn get_component(&self, code: &str) -> EngineResult<&SalaryComponent> {
        self.catalog().get(code)
    }
}
