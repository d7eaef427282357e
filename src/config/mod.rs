//! Configuration loading and management for the Salary Engine.
//!
//! This module provides the immutable component catalog, leave types, and
//! engine policy, either loaded from YAML files or built from defaults.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Catalog has {} components", config.catalog().len());
//! ```

mod catalog;
mod loader;
mod types;

pub use catalog::ComponentCatalog;
pub use loader::ConfigLoader;
pub use types::{
    CatalogConfig, EngineConfig, EnginePolicy, EwaPolicy, LeaveTypesConfig, PayrollPolicy,
    ProfessionalTaxSlab, StatutoryPolicy,
};
